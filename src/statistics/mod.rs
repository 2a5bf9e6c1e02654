//! Statistical methods for benchmark estimation.
//!
//! This module provides the descriptive statistics underneath the confidence
//! estimator:
//! - Arithmetic mean, full-series and trailing-window
//! - Sample standard deviation (unbiased, n−1 denominator)
//! - Trailing coefficient of variation used by the steady-state inner loop
//! - Student's-t critical values ([`student_t`])
//! - Confidence interval estimation ([`confidence`])

mod confidence;
mod student_t;

pub use confidence::estimate;
pub use student_t::critical_t;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A statistic that may be mathematically undefined for small series.
///
/// The sample standard deviation of a length-1 series and the relative
/// interval width over a zero mean have no defined value. Both are modeled
/// as an explicit `Undefined` marker rather than an error or a NaN
/// placeholder, because the outer measurement loop must treat them as
/// "keep sampling", not as failures.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Stat {
    /// The statistic has a well-defined value.
    Defined(f64),
    /// The statistic is mathematically undefined for this series.
    Undefined,
}

impl Stat {
    /// Get the value, or `None` when undefined.
    pub fn value(self) -> Option<f64> {
        match self {
            Self::Defined(v) => Some(v),
            Self::Undefined => None,
        }
    }

    /// Whether the statistic has a defined value.
    pub fn is_defined(self) -> bool {
        matches!(self, Self::Defined(_))
    }
}

/// Arithmetic mean of a non-empty series.
pub fn mean(series: &[f64]) -> Result<f64, Error> {
    if series.is_empty() {
        return Err(Error::EmptyInput);
    }
    Ok(series.iter().sum::<f64>() / series.len() as f64)
}

/// Arithmetic mean of the final `k` elements of `series`.
///
/// Insertion order is measurement order, so "the last k" are the most recent
/// measurements.
pub fn mean_last_k(series: &[f64], k: usize) -> Result<f64, Error> {
    if k == 0 {
        return Err(Error::EmptyInput);
    }
    if series.len() < k {
        return Err(Error::InsufficientSamples {
            needed: k,
            got: series.len(),
        });
    }
    mean(&series[series.len() - k..])
}

/// Sample standard deviation with the unbiased (n−1) denominator.
///
/// Returns [`Stat::Undefined`] for a length-1 series, where the estimator
/// has a zero denominator; callers must detect this rather than receive a
/// silently defaulted zero.
pub fn sample_stddev(series: &[f64]) -> Result<Stat, Error> {
    let n = series.len();
    if n == 0 {
        return Err(Error::EmptyInput);
    }
    if n == 1 {
        return Ok(Stat::Undefined);
    }
    let avg = mean(series)?;
    let sum_sq: f64 = series.iter().map(|v| (v - avg) * (v - avg)).sum();
    Ok(Stat::Defined((sum_sq / (n - 1) as f64).sqrt()))
}

/// Coefficient of variation of the trailing `k` elements.
///
/// Uses the population standard deviation (k denominator) of the last `k`
/// values divided by their mean, matching the steady-state settling test.
/// A zero trailing mean yields `+∞` so that it can never satisfy a positive
/// CoV threshold.
pub fn trailing_cov(series: &[f64], k: usize) -> Result<f64, Error> {
    let avg = mean_last_k(series, k)?;
    let window = &series[series.len() - k..];
    let sum_sq: f64 = window.iter().map(|v| (v - avg) * (v - avg)).sum();
    let stddev = (sum_sq / k as f64).sqrt();
    if avg == 0.0 {
        return Ok(f64::INFINITY);
    }
    Ok(stddev / avg)
}
