//! Student's-t critical values via numerical inversion of the CDF.
//!
//! The t CDF is expressed through the regularized incomplete beta function:
//! for t ≥ 0 and ν degrees of freedom,
//! ```text
//! F(t; ν) = 1 − ½ I_x(ν/2, ½),   x = ν / (ν + t²)
//! ```
//! with the symmetric reflection for t < 0. `I_x` is evaluated with the
//! standard continued-fraction expansion (Lentz's method), and the quantile
//! is recovered by bracketing bisection. That is far more accuracy than the
//! three significant digits the estimator needs, across df 1..several
//! hundred and confidence levels 0.80–0.999.

use crate::error::Error;

/// Relative tolerance for the continued-fraction evaluation.
const CF_EPSILON: f64 = 1e-14;

/// Smallest magnitude admitted into the Lentz recurrence denominators.
const CF_TINY: f64 = 1e-300;

/// Positive critical value `t` with `P(T ≤ t) = p` for a t-distribution
/// with `df` degrees of freedom.
///
/// `p` is the one-sided cumulative probability; the two-sided interval at
/// confidence level `c` uses `p = (1 + c) / 2`, giving `[−t, +t]`. Values of
/// `p` below one half are handled by symmetry and yield negative quantiles.
///
/// # Errors
///
/// [`Error::InvalidDegreesOfFreedom`] when `df` is zero.
///
/// # Panics
///
/// Panics when `p` is outside the open interval (0, 1); the estimator
/// guarantees this by construction via configuration validation.
pub fn critical_t(p: f64, df: usize) -> Result<f64, Error> {
    if df == 0 {
        return Err(Error::InvalidDegreesOfFreedom);
    }
    assert!(
        p > 0.0 && p < 1.0,
        "cumulative probability must be in (0, 1)"
    );

    if p == 0.5 {
        return Ok(0.0);
    }
    if p < 0.5 {
        return Ok(-critical_t(1.0 - p, df)?);
    }

    // Bracket the quantile, then bisect. The CDF is strictly increasing, so
    // bisection cannot stall.
    let mut lo = 0.0f64;
    let mut hi = 1.0f64;
    while t_cdf(hi, df) < p {
        hi *= 2.0;
        if hi > 1e18 {
            break;
        }
    }
    for _ in 0..200 {
        let mid = 0.5 * (lo + hi);
        if t_cdf(mid, df) < p {
            lo = mid;
        } else {
            hi = mid;
        }
        if hi - lo <= 1e-12 * hi.max(1.0) {
            break;
        }
    }
    Ok(0.5 * (lo + hi))
}

/// CDF of the t-distribution with `df` degrees of freedom.
fn t_cdf(t: f64, df: usize) -> f64 {
    let nu = df as f64;
    let x = nu / (nu + t * t);
    let tail = 0.5 * regularized_incomplete_beta(0.5 * nu, 0.5, x);
    if t >= 0.0 {
        1.0 - tail
    } else {
        tail
    }
}

/// Regularized incomplete beta function I_x(a, b).
fn regularized_incomplete_beta(a: f64, b: f64, x: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }

    let ln_front = a * x.ln() + b * (1.0 - x).ln() - ln_beta(a, b);
    let front = ln_front.exp();

    // The continued fraction converges quickly only for x below the split
    // point; above it, evaluate the mirrored fraction.
    if x < (a + 1.0) / (a + b + 2.0) {
        front * beta_continued_fraction(a, b, x) / a
    } else {
        1.0 - front * beta_continued_fraction(b, a, 1.0 - x) / b
    }
}

/// ln B(a, b) = ln Γ(a) + ln Γ(b) − ln Γ(a + b).
fn ln_beta(a: f64, b: f64) -> f64 {
    libm::lgamma(a) + libm::lgamma(b) - libm::lgamma(a + b)
}

/// Continued-fraction expansion of the incomplete beta function, evaluated
/// with the modified Lentz algorithm.
fn beta_continued_fraction(a: f64, b: f64, x: f64) -> f64 {
    let qab = a + b;
    let qap = a + 1.0;
    let qam = a - 1.0;

    let mut c = 1.0;
    let mut d = 1.0 - qab * x / qap;
    if d.abs() < CF_TINY {
        d = CF_TINY;
    }
    d = 1.0 / d;
    let mut h = d;

    for m in 1..=300 {
        let m = m as f64;
        let m2 = 2.0 * m;

        // Even step.
        let aa = m * (b - m) * x / ((qam + m2) * (a + m2));
        d = 1.0 + aa * d;
        if d.abs() < CF_TINY {
            d = CF_TINY;
        }
        c = 1.0 + aa / c;
        if c.abs() < CF_TINY {
            c = CF_TINY;
        }
        d = 1.0 / d;
        h *= d * c;

        // Odd step.
        let aa = -(a + m) * (qab + m) * x / ((a + m2) * (qap + m2));
        d = 1.0 + aa * d;
        if d.abs() < CF_TINY {
            d = CF_TINY;
        }
        c = 1.0 + aa / c;
        if c.abs() < CF_TINY {
            c = CF_TINY;
        }
        d = 1.0 / d;
        let delta = d * c;
        h *= delta;

        if (delta - 1.0).abs() < CF_EPSILON {
            break;
        }
    }

    h
}
