//! # settle
//!
//! Micro-benchmarking with confidence intervals and automatic stopping.
//!
//! Give it a zero-argument unit of work (the probe) and it repeatedly
//! executes the probe, reporting a Student's-t confidence interval for the
//! mean running time (or peak memory) and deciding on its own when enough
//! samples have been collected: the run stops as soon as the interval width
//! falls below a configurable percentage of the mean.
//!
//! Three methodologies share one outer loop:
//! - **Startup** — time each probe execution directly; captures cold-start
//!   behavior, first-touch cache misses included.
//! - **Steady** — per outer iteration, run the probe until its recent
//!   timings settle (trailing coefficient of variation below a threshold)
//!   and use the smoothed trailing mean as one sample; approximates
//!   warmed-up performance.
//! - **Memory** — run the probe and sample the process peak working-set
//!   size instead of time.
//!
//! ## Quick start
//!
//! ```
//! use settle::{Bench, Outcome};
//!
//! let outcome = Bench::new()
//!     .confidence_level(0.95)
//!     .stop_threshold_pct(25.0)
//!     .startup(|| {
//!         std::hint::black_box((0..50_000u64).sum::<u64>());
//!     });
//!
//! match outcome {
//!     Outcome::Converged(result) | Outcome::Exhausted(result) => {
//!         println!("mean: {:.4} ms over {} samples", result.mean, result.samples);
//!     }
//!     Outcome::Failed { reason } => eprintln!("measurement failed: {reason}"),
//! }
//! ```
//!
//! ## Probe contract
//!
//! The probe is an opaque `FnMut()` executed purely for its side effects.
//! It may block indefinitely (no timeout is imposed) and may use internal
//! parallelism; both are invisible to the loop. A panicking probe aborts
//! the run with [`Outcome::Failed`] and no partial estimate.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod bench;
mod config;
mod error;
mod result;

pub mod measurement;
pub mod output;
pub mod statistics;

pub use bench::Bench;
pub use config::Config;
pub use error::Error;
pub use measurement::measure_once;
pub use result::{ConfidenceResult, Outcome};
pub use statistics::Stat;
