//! Error types for the statistics layer and the measurement loop.

use thiserror::Error;

/// Errors produced while estimating or measuring.
///
/// The statistics variants are preconditions: the outer measurement loop is
/// built so that it never triggers them (it always has at least one sample
/// before estimating, and configuration validation guarantees the trailing
/// window fits inside the inner iteration cap). `ProbeExecution` is the only
/// variant that aborts a whole methodology run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A statistic was requested over an empty sample series.
    #[error("cannot compute statistics over an empty sample series")]
    EmptyInput,

    /// A trailing-window statistic was requested over too few samples.
    #[error("need at least {needed} samples, have {got}")]
    InsufficientSamples {
        /// Window size that was requested.
        needed: usize,
        /// Number of samples actually available.
        got: usize,
    },

    /// The t-distribution is undefined for zero degrees of freedom.
    #[error("degrees of freedom must be at least 1")]
    InvalidDegreesOfFreedom,

    /// The probe (or the memory sensor) failed during a run.
    #[error("probe execution failed: {0}")]
    ProbeExecution(String),

    /// A configuration field or combination of fields is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
