//! Confidence interval estimation over a sample series.

use crate::error::Error;
use crate::result::ConfidenceResult;

use super::{critical_t, mean, sample_stddev, Stat};

/// Estimate a Student's-t confidence interval for the series mean.
///
/// For n ≥ 2 samples the interval is `mean ± t·s/√n` with
/// `t = critical_t((1 + confidence_level) / 2, n − 1)`, and the width is
/// reported as a percentage of the mean. A single-sample series yields a
/// structurally valid result whose standard deviation and width are
/// [`Stat::Undefined`] (degenerate interval at the mean), so the caller can
/// simply keep collecting instead of treating the first iteration as an
/// error. A zero mean also leaves the width undefined, since the relative
/// width would divide by zero.
///
/// Side-effect free; the series is never modified.
///
/// # Errors
///
/// [`Error::EmptyInput`] on an empty series.
///
/// # Panics
///
/// Panics when `confidence_level` is outside the open interval (0, 1).
pub fn estimate(series: &[f64], confidence_level: f64) -> Result<ConfidenceResult, Error> {
    assert!(
        confidence_level > 0.0 && confidence_level < 1.0,
        "confidence_level must be in (0, 1)"
    );

    let n = series.len();
    let avg = mean(series)?;

    let stddev = match sample_stddev(series)? {
        Stat::Defined(sd) => sd,
        Stat::Undefined => {
            return Ok(ConfidenceResult {
                interval_low: avg,
                interval_high: avg,
                mean: avg,
                stddev: Stat::Undefined,
                width_pct: Stat::Undefined,
                samples: n,
            });
        }
    };

    let df = n - 1;
    let t = critical_t((1.0 + confidence_level) / 2.0, df)?;
    let half_width = t * stddev / (n as f64).sqrt();
    let interval_low = avg - half_width;
    let interval_high = avg + half_width;

    let width_pct = if avg == 0.0 {
        Stat::Undefined
    } else {
        Stat::Defined((interval_high - interval_low) / avg * 100.0)
    };

    Ok(ConfidenceResult {
        interval_low,
        interval_high,
        mean: avg,
        stddev: Stat::Defined(stddev),
        width_pct,
        samples: n,
    })
}
