use super::distribution::SignedRankDistribution;
use super::ranking::rank;
use super::{normal_p_value, use_exact};
use crate::config::RankTestOptions;
use crate::descriptive::Sample;
use crate::distribution::Distribution;
use crate::error::{Result, TestError};
use crate::result::{Advisory, Alternative, TestKind, TestResult};

/// Wilcoxon signed-rank test of H₀: the distribution of x − `mu` is
/// symmetric about zero
///
/// V is the sum of the ranks of |xᵢ − μ₀| over the positive differences.
/// Zero differences are dropped before ranking. Zeros or ties rule out the
/// exact distribution, as does a sample at or above
/// `options.exact_threshold`.
///
/// # Example
/// ```
/// use contraste::config::RankTestOptions;
/// use contraste::descriptive::Sample;
/// use contraste::rank::signed_rank_test;
///
/// let change = Sample::new(vec![-3.0, 5.0, 2.0, 7.0, -1.0, 4.0, 6.0, 8.0, 9.0, 11.0]).unwrap();
/// let result = signed_rank_test(&change, 0.0, &RankTestOptions::default()).unwrap();
/// assert_eq!(result.statistic(), Some(51.0));
/// assert!((result.p_value() - 0.013671875).abs() < 1e-12);
/// ```
pub fn signed_rank_test(sample: &Sample, mu: f64, options: &RankTestOptions) -> Result<TestResult> {
    if !mu.is_finite() {
        return Err(TestError::InvalidInput(format!(
            "hypothesized location must be finite, got {}",
            mu
        )));
    }
    let shifted: Vec<f64> = sample.values().iter().map(|v| v - mu).collect();
    signed_rank_on(&shifted, options)
}

/// Signed-rank test on the paired differences xᵢ − yᵢ
pub fn paired_signed_rank_test(
    x: &Sample,
    y: &Sample,
    options: &RankTestOptions,
) -> Result<TestResult> {
    let differences = x.differences(y)?;
    signed_rank_on(differences.values(), options)
}

fn signed_rank_on(differences: &[f64], options: &RankTestOptions) -> Result<TestResult> {
    options.validate()?;
    let non_zero: Vec<f64> = differences.iter().copied().filter(|d| *d != 0.0).collect();
    let zeros = differences.len() - non_zero.len();
    let n = non_zero.len();
    if n == 0 {
        return Err(TestError::InsufficientData {
            required: 1,
            actual: 0,
        });
    }

    let magnitudes: Vec<f64> = non_zero.iter().map(|d| d.abs()).collect();
    let ranking = rank(&magnitudes);
    let v: f64 = non_zero
        .iter()
        .zip(&ranking.ranks)
        .filter(|(d, _)| **d > 0.0)
        .map(|(_, r)| r)
        .sum();

    let mut advisories = Vec::new();
    if zeros > 0 {
        advisories.push(Advisory::ZeroDifferencesDropped { count: zeros });
    }
    if ranking.has_ties() {
        advisories.push(Advisory::TiesPresent {
            tie_groups: ranking.tie_groups.len(),
        });
    }

    let p_value = if use_exact(n, ranking.has_ties() || zeros > 0, options) {
        exact_p_value(v, n, options.alternative)?
    } else {
        let nf = n as f64;
        let mean = nf * (nf + 1.0) / 4.0;
        let variance = nf * (nf + 1.0) * (2.0 * nf + 1.0) / 24.0 - ranking.tie_correction() / 48.0;
        advisories.push(Advisory::NormalApproximation { n });
        normal_p_value(v - mean, variance.sqrt(), options)
    };

    let result = advisories.into_iter().fold(
        TestResult::new(TestKind::SignedRank, p_value, options.alternative).with_statistic(v),
        TestResult::with_advisory,
    );
    Ok(result.logged())
}

fn exact_p_value(v: f64, n: usize, alternative: Alternative) -> Result<f64> {
    let dist = SignedRankDistribution::new(n)?;
    Ok(match alternative {
        Alternative::Greater => dist.upper_tail_inclusive(v),
        Alternative::Less => dist.cdf(v),
        Alternative::TwoSided => {
            let tail = if v > (n * (n + 1)) as f64 / 4.0 {
                dist.upper_tail_inclusive(v)
            } else {
                dist.cdf(v)
            };
            (2.0 * tail).min(1.0)
        }
    })
}
