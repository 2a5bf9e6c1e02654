//! Measurement methodologies and the shared outer loop.
//!
//! All three methodologies (Startup, Steady, Memory) run the same outer
//! state machine — `Running → (Converged | Exhausted | Failed)` — differing
//! only in how one scalar sample is obtained per iteration.

use crate::config::Config;
use crate::error::Error;
use crate::measurement::{
    catch_probe, elapsed_ms, peak_working_set_bytes, run_until_steady,
};
use crate::result::{ConfidenceResult, Outcome};
use crate::statistics::{estimate, Stat};

/// Entry point for measurement runs.
///
/// Configure with the builder methods, then finish with one of the
/// methodology methods, each of which consumes the builder, runs the outer
/// loop to a terminal state and returns the [`Outcome`].
///
/// # Example
///
/// ```
/// use settle::Bench;
///
/// let outcome = Bench::new()
///     .stop_threshold_pct(25.0)
///     .startup(|| {
///         std::hint::black_box((0..10_000u64).sum::<u64>());
///     });
///
/// if let Some(result) = outcome.result() {
///     println!("mean: {:.4} ms over {} samples", result.mean, result.samples);
/// }
/// ```
pub struct Bench {
    config: Config,
    reclaim: Option<Box<dyn FnMut()>>,
}

impl Default for Bench {
    fn default() -> Self {
        Self::new()
    }
}

impl Bench {
    /// Create with default configuration.
    pub fn new() -> Self {
        Self {
            config: Config::default(),
            reclaim: None,
        }
    }

    /// Create with an explicit configuration.
    pub fn with_config(config: Config) -> Self {
        Self {
            config,
            reclaim: None,
        }
    }

    /// Set the confidence level of the reported interval.
    pub fn confidence_level(mut self, level: f64) -> Self {
        self.config = self.config.confidence_level(level);
        self
    }

    /// Set the maximum number of outer iterations.
    pub fn max_outer_iterations(mut self, iterations: usize) -> Self {
        self.config = self.config.max_outer_iterations(iterations);
        self
    }

    /// Set the stop threshold as a percentage of the mean.
    pub fn stop_threshold_pct(mut self, pct: f64) -> Self {
        self.config = self.config.stop_threshold_pct(pct);
        self
    }

    /// Set the inner-loop iteration cap (Steady only).
    pub fn max_inner_iterations(mut self, iterations: usize) -> Self {
        self.config = self.config.max_inner_iterations(iterations);
        self
    }

    /// Set the trailing window of the inner loop (Steady only).
    pub fn trailing_window(mut self, window: usize) -> Self {
        self.config = self.config.trailing_window(window);
        self
    }

    /// Set the CoV threshold of the inner loop (Steady only).
    pub fn cov_threshold(mut self, threshold: f64) -> Self {
        self.config = self.config.cov_threshold(threshold);
        self
    }

    /// Install a noise-mitigation hook, invoked between outer iterations.
    ///
    /// Rust has no implicit reclamation phase to force, so nothing is
    /// installed by default and the call site is a no-op. The hook must be
    /// idempotent and safe to call arbitrarily often; a typical use is an
    /// explicit allocator-compaction request.
    pub fn reclaim_hook(mut self, hook: impl FnMut() + 'static) -> Self {
        self.reclaim = Some(Box::new(hook));
        self
    }

    /// Get the current configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Measure elapsed time with the Startup methodology.
    ///
    /// Each outer iteration times one direct probe execution.
    pub fn startup(self, mut probe: impl FnMut()) -> Outcome {
        tracing::debug!(config = ?self.config, "starting run in startup mode");
        self.run(move || catch_probe(|| elapsed_ms(&mut probe)))
    }

    /// Measure elapsed time with the Steady methodology.
    ///
    /// Each outer iteration runs the steady-state inner loop and takes its
    /// smoothed trailing mean as one sample.
    pub fn steady(self, mut probe: impl FnMut()) -> Outcome {
        tracing::debug!(config = ?self.config, "starting run in steady mode");
        let (max_inner, window, cov) = (
            self.config.max_inner_iterations,
            self.config.trailing_window,
            self.config.cov_threshold,
        );
        self.run(move || {
            catch_probe(|| run_until_steady(&mut probe, max_inner, window, cov))
                .and_then(|sample| sample)
        })
    }

    /// Measure peak working-set size with the Memory methodology.
    ///
    /// Each outer iteration runs the probe untimed and then reads the
    /// process peak working-set sensor, in bytes.
    pub fn peak_memory(self, mut probe: impl FnMut()) -> Outcome {
        tracing::debug!(config = ?self.config, "starting run in memory mode");
        self.run(move || {
            catch_probe(|| probe())?;
            Ok(peak_working_set_bytes()? as f64)
        })
    }

    /// Shared outer loop.
    ///
    /// `sample_once` obtains one scalar sample per iteration; any error it
    /// returns aborts the run with no partial result.
    fn run(mut self, mut sample_once: impl FnMut() -> Result<f64, Error>) -> Outcome {
        if let Err(err) = self.config.validate() {
            panic!("{err}");
        }

        let config = self.config;
        let mut series: Vec<f64> = Vec::with_capacity(config.max_outer_iterations);
        let mut last: Option<ConfidenceResult> = None;

        for iteration in 1..=config.max_outer_iterations {
            let sample = match sample_once() {
                Ok(sample) => sample,
                Err(err) => {
                    tracing::error!(iteration, %err, "aborting run");
                    return Outcome::Failed {
                        reason: err.to_string(),
                    };
                }
            };
            series.push(sample);

            // Recomputed from the full series each time, never updated
            // incrementally.
            let result = match estimate(&series, config.confidence_level) {
                Ok(result) => result,
                Err(err) => {
                    // Unreachable with a non-empty series and a validated
                    // confidence level.
                    return Outcome::Failed {
                        reason: err.to_string(),
                    };
                }
            };
            tracing::debug!(
                iteration,
                sample,
                mean = result.mean,
                width_pct = ?result.width_pct,
                "collected sample"
            );

            if result.is_within(config.stop_threshold_pct) {
                tracing::info!(
                    iteration,
                    mean = result.mean,
                    width_pct = result.width_pct.value(),
                    "interval tight enough, stopping early"
                );
                return Outcome::Converged(result);
            }
            last = Some(result);

            if let Some(hook) = self.reclaim.as_mut() {
                hook();
            }
        }

        match last {
            Some(result) => {
                tracing::warn!(
                    samples = result.samples,
                    width_pct = ?result.width_pct,
                    "iteration budget exhausted without convergence"
                );
                Outcome::Exhausted(result)
            }
            // max_outer_iterations >= 1 means the loop either returned or
            // produced an estimate.
            None => Outcome::Failed {
                reason: "no iterations were executed".into(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_zero_variance_converges_at_second_sample() {
        let calls = Rc::new(Cell::new(0usize));
        let counter = Rc::clone(&calls);

        let outcome = Bench::new()
            .stop_threshold_pct(10.0)
            .run(move || {
                counter.set(counter.get() + 1);
                Ok(5.0)
            });

        // One sample gives an undefined width; the second collapses the
        // interval to zero width immediately.
        assert_eq!(calls.get(), 2);
        match outcome {
            Outcome::Converged(result) => {
                assert_eq!(result.samples, 2);
                assert_eq!(result.mean, 5.0);
                assert_eq!(result.width_pct, Stat::Defined(0.0));
            }
            other => panic!("expected convergence, got {:?}", other),
        }
    }

    #[test]
    fn test_failing_source_aborts_with_zero_samples() {
        let calls = Rc::new(Cell::new(0usize));
        let counter = Rc::clone(&calls);

        let outcome = Bench::new().run(move || {
            counter.set(counter.get() + 1);
            Err(Error::ProbeExecution("disk on fire".into()))
        });

        assert_eq!(calls.get(), 1);
        match outcome {
            Outcome::Failed { reason } => assert!(reason.contains("disk on fire")),
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[test]
    fn test_noisy_source_exhausts_budget() {
        let mut i = 0u32;
        let outcome = Bench::new()
            .max_outer_iterations(6)
            .stop_threshold_pct(0.001)
            .run(move || {
                i += 1;
                // Spread wide enough that the interval never tightens to
                // 0.001% of the mean in six samples.
                Ok(if i % 2 == 0 { 1.0 } else { 100.0 })
            });

        match outcome {
            Outcome::Exhausted(result) => {
                assert_eq!(result.samples, 6);
                assert!(!result.is_within(0.001));
            }
            other => panic!("expected exhaustion, got {:?}", other),
        }
    }

    #[test]
    fn test_reclaim_hook_runs_between_iterations() {
        let hook_calls = Rc::new(Cell::new(0usize));
        let hook_counter = Rc::clone(&hook_calls);

        let mut i = 0u32;
        let outcome = Bench::new()
            .max_outer_iterations(4)
            .stop_threshold_pct(0.001)
            .reclaim_hook(move || hook_counter.set(hook_counter.get() + 1))
            .run(move || {
                i += 1;
                Ok(if i % 2 == 0 { 1.0 } else { 100.0 })
            });

        assert!(!outcome.is_converged());
        // The hook runs after every non-converging iteration.
        assert_eq!(hook_calls.get(), 4);
    }

    #[test]
    #[should_panic(expected = "trailing_window")]
    fn test_invalid_combination_rejected_before_any_sample() {
        let mut config = Config::default();
        config.trailing_window = 100; // above max_inner_iterations
        let _ = Bench::with_config(config).run(|| panic!("probe must never run"));
    }

    #[test]
    fn test_startup_probe_panic_fails_run() {
        let outcome = Bench::new().startup(|| panic!("first invocation"));
        match outcome {
            Outcome::Failed { reason } => assert!(reason.contains("first invocation")),
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[test]
    fn test_steady_probe_panic_fails_run() {
        let outcome = Bench::new().steady(|| panic!("inner loop failure"));
        assert!(outcome.is_failed());
    }

    #[test]
    fn test_startup_sleep_probe_converges() {
        // Sleeping is low-variance relative to a 50% threshold, so a small
        // number of iterations suffices.
        let outcome = Bench::new()
            .confidence_level(0.95)
            .stop_threshold_pct(50.0)
            .startup(|| std::thread::sleep(Duration::from_millis(10)));

        let result = outcome
            .result()
            .copied()
            .expect("sleep probe must not fail");
        assert!(result.mean >= 9.0, "mean {}", result.mean);
        assert!(result.mean <= 25.0, "mean {}", result.mean);
        if let Stat::Defined(width) = result.width_pct {
            assert!(width <= 50.0 || !outcome.is_converged());
        }
        assert!(result.interval_low <= result.mean);
        assert!(result.interval_high >= result.mean);
    }

    #[test]
    fn test_steady_end_to_end_smoke() {
        let outcome = Bench::new()
            .max_outer_iterations(5)
            .max_inner_iterations(8)
            .trailing_window(4)
            .stop_threshold_pct(75.0)
            .steady(|| std::thread::sleep(Duration::from_millis(2)));

        let result = outcome.result().copied().expect("probe must not fail");
        assert!(result.mean > 0.0);
        assert!(result.samples >= 2);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_peak_memory_end_to_end() {
        let outcome = Bench::new()
            .max_outer_iterations(5)
            .stop_threshold_pct(50.0)
            .peak_memory(|| {
                let buf = vec![7u8; 4 * 1024 * 1024];
                std::hint::black_box(&buf);
            });

        let result = outcome.result().copied().expect("sensor must not fail");
        // At least the touched allocation, and never negative.
        assert!(result.mean >= (4 * 1024 * 1024) as f64, "mean {}", result.mean);
        assert!(result.interval_low >= 0.0);
    }
}
