//! Configuration for measurement runs.

use crate::error::Error;

/// Configuration options shared by all measurement methodologies.
///
/// The steady-state fields (`max_inner_iterations`, `trailing_window`,
/// `cov_threshold`) only affect the Steady methodology; Startup and Memory
/// ignore them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    /// Confidence level of the reported interval.
    ///
    /// Must lie strictly between 0 and 1. Default: 0.95.
    pub confidence_level: f64,

    /// Maximum number of outer iterations (samples) per run.
    ///
    /// The run stops with a best-effort estimate when this budget is
    /// exhausted without convergence. Default: 30.
    pub max_outer_iterations: usize,

    /// Stop once the interval width falls to this percentage of the mean.
    ///
    /// Default: 2.0 (the interval spans at most 2% of the mean).
    pub stop_threshold_pct: f64,

    /// Hard cap on probe executions per steady-state inner loop.
    ///
    /// Must be at least `trailing_window`. Default: 30.
    pub max_inner_iterations: usize,

    /// Number of trailing raw timings the inner loop smooths over.
    ///
    /// Also the minimum number of probe executions per inner loop.
    /// Default: 10.
    pub trailing_window: usize,

    /// Coefficient-of-variation threshold for declaring timings settled.
    ///
    /// Default: 0.02.
    pub cov_threshold: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            confidence_level: 0.95,
            max_outer_iterations: 30,
            stop_threshold_pct: 2.0,
            max_inner_iterations: 30,
            trailing_window: 10,
            cov_threshold: 0.02,
        }
    }
}

impl Config {
    /// Create a new configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the confidence level.
    pub fn confidence_level(mut self, level: f64) -> Self {
        assert!(
            level > 0.0 && level < 1.0,
            "confidence_level must be in (0, 1)"
        );
        self.confidence_level = level;
        self
    }

    /// Set the maximum number of outer iterations.
    pub fn max_outer_iterations(mut self, iterations: usize) -> Self {
        assert!(iterations >= 1, "max_outer_iterations must be at least 1");
        self.max_outer_iterations = iterations;
        self
    }

    /// Set the stop threshold as a percentage of the mean.
    pub fn stop_threshold_pct(mut self, pct: f64) -> Self {
        assert!(pct > 0.0, "stop_threshold_pct must be positive");
        self.stop_threshold_pct = pct;
        self
    }

    /// Set the inner-loop iteration cap for the Steady methodology.
    pub fn max_inner_iterations(mut self, iterations: usize) -> Self {
        assert!(iterations >= 1, "max_inner_iterations must be at least 1");
        self.max_inner_iterations = iterations;
        self
    }

    /// Set the trailing window for the Steady methodology.
    pub fn trailing_window(mut self, window: usize) -> Self {
        assert!(window >= 1, "trailing_window must be at least 1");
        self.trailing_window = window;
        self
    }

    /// Set the CoV threshold for the Steady methodology.
    pub fn cov_threshold(mut self, threshold: f64) -> Self {
        assert!(threshold > 0.0, "cov_threshold must be positive");
        self.cov_threshold = threshold;
        self
    }

    /// Check that all fields and field combinations are in range.
    ///
    /// Called before any probe execution; a run never starts with an
    /// invalid configuration.
    pub fn validate(&self) -> Result<(), Error> {
        if !(self.confidence_level > 0.0 && self.confidence_level < 1.0) {
            return Err(Error::InvalidConfig(
                "confidence_level must be in (0, 1)".into(),
            ));
        }
        if self.max_outer_iterations < 1 {
            return Err(Error::InvalidConfig(
                "max_outer_iterations must be at least 1".into(),
            ));
        }
        if !(self.stop_threshold_pct > 0.0) {
            return Err(Error::InvalidConfig(
                "stop_threshold_pct must be positive".into(),
            ));
        }
        if self.trailing_window < 1 {
            return Err(Error::InvalidConfig(
                "trailing_window must be at least 1".into(),
            ));
        }
        if self.max_inner_iterations < self.trailing_window {
            return Err(Error::InvalidConfig(
                "max_inner_iterations must be at least trailing_window".into(),
            ));
        }
        if !(self.cov_threshold > 0.0) {
            return Err(Error::InvalidConfig(
                "cov_threshold must be positive".into(),
            ));
        }
        Ok(())
    }
}
