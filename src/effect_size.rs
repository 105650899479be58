//! Standardized effect sizes
//!
//! Pure functions of summary statistics. The caller always names the
//! standardizer: there is no default [`CohensD`] method, and the t-tests do
//! not attach one on their own. Differences are signed (first group minus
//! second group).

use crate::categorical::{pearson_statistic, ContingencyTable};
use crate::descriptive::{pooled_sd, Sample, SummaryStats};
use crate::error::{ensure_len, Result, TestError};
use crate::result::{EffectSize, EffectSizeKind};
use serde::{Deserialize, Serialize};

/// Standardizer for a two-sample Cohen's d
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CohensD {
    /// Pooled sd with N₁ + N₂ − 2 in the denominator; pairs with Student's test
    Pooled,
    /// √((s₁² + s₂²)/2); pairs with Welch's test
    Unequal,
    /// Pooled sd with N in the denominator
    Raw,
    /// Pooled d times (N − 3)/(N − 2.25)
    Corrected,
    /// Glass' Δ standardized by the first group's sd
    XSd,
    /// Glass' Δ standardized by the second group's sd
    YSd,
}

impl CohensD {
    fn kind(&self) -> EffectSizeKind {
        match self {
            CohensD::Pooled => EffectSizeKind::CohensDPooled,
            CohensD::Unequal => EffectSizeKind::CohensDUnequal,
            CohensD::Raw => EffectSizeKind::CohensDRaw,
            CohensD::Corrected => EffectSizeKind::CohensDCorrected,
            CohensD::XSd => EffectSizeKind::GlassDeltaX,
            CohensD::YSd => EffectSizeKind::GlassDeltaY,
        }
    }
}

/// Two-sample Cohen's d from raw samples
///
/// # Example
/// ```
/// use contraste::descriptive::Sample;
/// use contraste::effect_size::{cohens_d, cohens_d_from_summary, CohensD};
///
/// let x = Sample::new(vec![65.0, 72.0, 80.0, 68.0]).unwrap();
/// let y = Sample::new(vec![60.0, 66.0, 71.0, 62.0, 58.0]).unwrap();
/// let raw = cohens_d(&x, &y, CohensD::Pooled).unwrap();
/// let summary = cohens_d_from_summary(&x.summary().unwrap(), &y.summary().unwrap(), CohensD::Pooled).unwrap();
/// assert!((raw.value - summary.value).abs() < 1e-12);
/// ```
pub fn cohens_d(x: &Sample, y: &Sample, method: CohensD) -> Result<EffectSize> {
    cohens_d_from_summary(&x.summary()?, &y.summary()?, method)
}

pub fn cohens_d_from_summary(
    x: &SummaryStats,
    y: &SummaryStats,
    method: CohensD,
) -> Result<EffectSize> {
    ensure_len(x.n, 2)?;
    ensure_len(y.n, 2)?;
    let total = (x.n + y.n) as f64;
    let standardizer = match method {
        CohensD::Pooled | CohensD::Corrected => pooled_sd(x, y)?,
        CohensD::Unequal => ((x.variance() + y.variance()) / 2.0).sqrt(),
        CohensD::Raw => {
            let ss = (x.n - 1) as f64 * x.variance() + (y.n - 1) as f64 * y.variance();
            (ss / total).sqrt()
        }
        CohensD::XSd => x.sd,
        CohensD::YSd => y.sd,
    };
    let mut d = standardized(x.mean - y.mean, standardizer)?;
    if method == CohensD::Corrected {
        d *= (total - 3.0) / (total - 2.25);
    }
    Ok(EffectSize {
        kind: method.kind(),
        value: d,
    })
}

/// (x̄ − μ₀)/s for a single sample
pub fn cohens_d_one_sample(sample: &Sample, mu: f64) -> Result<EffectSize> {
    cohens_d_one_sample_from_summary(&sample.summary()?, mu)
}

pub fn cohens_d_one_sample_from_summary(stats: &SummaryStats, mu: f64) -> Result<EffectSize> {
    ensure_len(stats.n, 2)?;
    Ok(EffectSize {
        kind: EffectSizeKind::CohensDOneSample,
        value: standardized(stats.mean - mu, stats.sd)?,
    })
}

/// Mean difference score over the sd of the differences
pub fn cohens_d_paired(x: &Sample, y: &Sample) -> Result<EffectSize> {
    let differences = x.differences(y)?;
    cohens_d_paired_from_summary(&differences.summary()?)
}

/// Paired d from the summary of the difference scores
pub fn cohens_d_paired_from_summary(differences: &SummaryStats) -> Result<EffectSize> {
    ensure_len(differences.n, 2)?;
    Ok(EffectSize {
        kind: EffectSizeKind::CohensDPaired,
        value: standardized(differences.mean, differences.sd)?,
    })
}

/// Cramér's V = √(X²/(N·(min(r, c) − 1))) from the uncorrected Pearson X²
pub fn cramers_v(table: &ContingencyTable) -> Result<EffectSize> {
    let statistic = pearson_statistic(table)?;
    let n = table.total() as f64;
    let k = table.rows().min(table.cols()) as f64;
    Ok(EffectSize {
        kind: EffectSizeKind::CramersV,
        value: (statistic / (n * (k - 1.0))).sqrt(),
    })
}

fn standardized(difference: f64, sd: f64) -> Result<f64> {
    if !(sd.is_finite() && sd > 0.0) {
        return Err(TestError::InvalidInput(format!(
            "standardizer is {}; effect size undefined",
            sd
        )));
    }
    Ok(difference / sd)
}
