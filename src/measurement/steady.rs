//! Steady-state inner loop.
//!
//! Repeatedly executes the probe, watching the coefficient of variation of
//! the most recent timings. Once recent timings vary little relative to
//! their mean the system is taken as warmed up, and the trailing mean is
//! returned as one smoothed sample for the outer loop. This is the gate
//! that keeps one-off JIT/cache-miss outliers out of the outer statistical
//! test.

use crate::error::Error;
use crate::statistics::{mean_last_k, trailing_cov};

use super::stopwatch::elapsed_ms;

/// Run the probe until its timings settle, returning one smoothed sample.
///
/// Times one probe execution per inner iteration. Once at least `window`
/// raw timings exist, the trailing CoV (population standard deviation of
/// the last `window` timings over their mean) is evaluated after every
/// execution; the loop stops as soon as it drops below `cov_threshold`, and
/// unconditionally after `max_iterations` executions. The returned value is
/// the mean of the final `window` timings — best effort: if the cap was hit
/// without the CoV settling, the trailing mean is returned anyway.
///
/// # Errors
///
/// Statistics errors surface only if `window > max_iterations`, which
/// configuration validation rules out before any probe runs. Probe panics
/// are not caught here; the outer loop guards the whole inner loop.
pub fn run_until_steady(
    mut probe: impl FnMut(),
    max_iterations: usize,
    window: usize,
    cov_threshold: f64,
) -> Result<f64, Error> {
    run_until_steady_with(
        || elapsed_ms(&mut probe),
        max_iterations,
        window,
        cov_threshold,
    )
}

/// Core of [`run_until_steady`] over an injectable timing source.
///
/// `timed_run` performs one probe execution and returns its raw timing in
/// milliseconds. Splitting this out keeps the settling logic deterministic
/// under test, where timings are synthesized instead of measured.
pub(crate) fn run_until_steady_with(
    mut timed_run: impl FnMut() -> f64,
    max_iterations: usize,
    window: usize,
    cov_threshold: f64,
) -> Result<f64, Error> {
    let mut timings = Vec::with_capacity(max_iterations);

    for _ in 0..max_iterations {
        timings.push(timed_run());
        if timings.len() >= window && trailing_cov(&timings, window)? < cov_threshold {
            break;
        }
    }

    mean_last_k(&timings, window)
}
