//! Result types for a measurement run.

use serde::{Deserialize, Serialize};

use crate::statistics::Stat;

/// A confidence interval estimate derived from one sample series.
///
/// Recomputed fresh from the full series on every outer iteration rather
/// than updated incrementally, to avoid numerical drift.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceResult {
    /// Lower bound of the confidence interval.
    pub interval_low: f64,

    /// Upper bound of the confidence interval.
    pub interval_high: f64,

    /// Arithmetic mean of the samples.
    pub mean: f64,

    /// Sample standard deviation; undefined for a single-sample series.
    pub stddev: Stat,

    /// Interval width as a percentage of the mean.
    ///
    /// Undefined for a single-sample series ("not yet converged") and for a
    /// zero mean, where the relative width has no meaning. An undefined
    /// width never satisfies a stop threshold.
    pub width_pct: Stat,

    /// Number of samples the estimate was computed from.
    pub samples: usize,
}

impl ConfidenceResult {
    /// Whether the interval is tight enough to stop sampling.
    ///
    /// False whenever the width is undefined.
    pub fn is_within(&self, stop_threshold_pct: f64) -> bool {
        match self.width_pct {
            Stat::Defined(width) => width <= stop_threshold_pct,
            Stat::Undefined => false,
        }
    }
}

/// Terminal outcome of a methodology run.
///
/// The two non-failure variants carry the same payload shape; they differ
/// only in whether the stop threshold was reached before the iteration
/// budget ran out. A failed run carries no partial samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Outcome {
    /// The interval width dropped below the stop threshold.
    Converged(ConfidenceResult),

    /// The iteration budget ran out first; the estimate is best-effort.
    Exhausted(ConfidenceResult),

    /// The probe or the memory sensor failed; no estimate is available.
    Failed {
        /// Human-readable description of the failure.
        reason: String,
    },
}

impl Outcome {
    /// Whether the run converged before exhausting its iteration budget.
    pub fn is_converged(&self) -> bool {
        matches!(self, Self::Converged(_))
    }

    /// Whether the run aborted on a probe or sensor failure.
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    /// The estimate, if the run produced one.
    pub fn result(&self) -> Option<&ConfidenceResult> {
        match self {
            Self::Converged(result) | Self::Exhausted(result) => Some(result),
            Self::Failed { .. } => None,
        }
    }

    /// Consume the outcome, yielding the estimate if one was produced.
    pub fn into_result(self) -> Option<ConfidenceResult> {
        match self {
            Self::Converged(result) | Self::Exhausted(result) => Some(result),
            Self::Failed { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_result() -> ConfidenceResult {
        ConfidenceResult {
            interval_low: 9.0,
            interval_high: 11.0,
            mean: 10.0,
            stddev: Stat::Defined(1.0),
            width_pct: Stat::Defined(20.0),
            samples: 5,
        }
    }

    #[test]
    fn test_is_within() {
        let result = sample_result();
        assert!(result.is_within(20.0));
        assert!(result.is_within(50.0));
        assert!(!result.is_within(19.9));
    }

    #[test]
    fn test_undefined_width_never_within() {
        let result = ConfidenceResult {
            width_pct: Stat::Undefined,
            ..sample_result()
        };
        assert!(!result.is_within(f64::MAX));
    }

    #[test]
    fn test_outcome_accessors() {
        let converged = Outcome::Converged(sample_result());
        assert!(converged.is_converged());
        assert!(!converged.is_failed());
        assert_eq!(converged.result().unwrap().samples, 5);

        let exhausted = Outcome::Exhausted(sample_result());
        assert!(!exhausted.is_converged());
        assert!(exhausted.result().is_some());

        let failed = Outcome::Failed {
            reason: "probe panicked".into(),
        };
        assert!(failed.is_failed());
        assert!(failed.result().is_none());
        assert!(failed.into_result().is_none());
    }

    #[test]
    fn test_outcome_serializes() {
        let json = serde_json::to_string(&Outcome::Converged(sample_result())).unwrap();
        let back: Outcome = serde_json::from_str(&json).unwrap();
        assert!(back.is_converged());
    }
}
