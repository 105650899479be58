//! Tests on means
//!
//! - [`one_sample_t_test`] / [`one_sample_z_test`] against a hypothesized mean
//! - [`student_t_test`] / [`welch_t_test`] for two independent groups
//! - [`paired_t_test`] for two measurements on the same units
//!
//! Each test has a `*_from_summary` twin over [`SummaryStats`](crate::descriptive::SummaryStats).
//! The p-value and the confidence interval both follow
//! [`TTestOptions::alternative`](crate::config::TTestOptions): a one-sided test
//! reports a one-sided interval with an infinite bound.

mod independent;
mod one_sample;
mod paired;

#[cfg(test)]
mod tests;

pub use independent::{
    independent_t_test, independent_t_test_from_summary, student_t_test,
    student_t_test_from_summary, welch_t_test, welch_t_test_from_summary, VarianceAssumption,
};
pub use one_sample::{
    one_sample_t_test, one_sample_t_test_from_summary, one_sample_test, one_sample_z_test,
    one_sample_z_test_from_summary,
};
pub use paired::{paired_t_test, paired_t_test_by_id, paired_t_test_from_differences};

use crate::config::TTestOptions;
use crate::distribution::Distribution;
use crate::error::{Result, TestError};
use crate::result::{Alternative, ConfidenceInterval};

/// p-value of `statistic` under `dist` for the requested alternative
///
/// `dist` must be symmetric about zero (normal or t).
pub(crate) fn sided_p_value<D: Distribution>(
    dist: &D,
    statistic: f64,
    alternative: Alternative,
) -> f64 {
    match alternative {
        Alternative::TwoSided => (2.0 * dist.sf(statistic.abs())).min(1.0),
        Alternative::Greater => dist.sf(statistic),
        Alternative::Less => dist.cdf(statistic),
    }
}

/// Interval for `estimate` with standard error `se`, matching the alternative
pub(crate) fn sided_interval<D: Distribution>(
    dist: &D,
    estimate: f64,
    se: f64,
    options: &TTestOptions,
) -> Result<ConfidenceInterval> {
    let level = options.confidence_level;
    let alpha = 1.0 - level;
    let (lower, upper) = match options.alternative {
        Alternative::TwoSided => {
            let q = dist.quantile(1.0 - alpha / 2.0)?;
            (estimate - q * se, estimate + q * se)
        }
        Alternative::Greater => (estimate - dist.quantile(level)? * se, f64::INFINITY),
        Alternative::Less => (f64::NEG_INFINITY, estimate + dist.quantile(level)? * se),
    };
    Ok(ConfidenceInterval {
        lower,
        upper,
        level,
    })
}

/// Reject a zero standard error: the statistic would be undefined
pub(crate) fn ensure_positive_se(se: f64) -> Result<()> {
    if !(se.is_finite() && se > 0.0) {
        return Err(TestError::InvalidInput(format!(
            "standard error is {}; the observations have no spread",
            se
        )));
    }
    Ok(())
}
