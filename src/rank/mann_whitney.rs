use super::distribution::RankSumDistribution;
use super::ranking::rank;
use super::{normal_p_value, use_exact};
use crate::config::RankTestOptions;
use crate::descriptive::Sample;
use crate::distribution::Distribution;
use crate::error::{ensure_len, Result, TestError};
use crate::result::{Advisory, Alternative, TestKind, TestResult};

/// Wilcoxon rank-sum (Mann-Whitney) test of two independent samples
///
/// W is the number of pairs (xᵢ, yⱼ) with xᵢ > yⱼ, ties counting one half.
/// `Greater` tests whether x tends to exceed y. The exact null distribution
/// is used when both groups are smaller than `options.exact_threshold` and
/// no values are tied; otherwise a normal approximation with tie-corrected
/// variance is used and recorded as an advisory.
///
/// # Example
/// ```
/// use contraste::config::RankTestOptions;
/// use contraste::descriptive::Sample;
/// use contraste::rank::mann_whitney;
///
/// let a = Sample::new(vec![6.4, 10.7, 11.9, 7.3, 10.0]).unwrap();
/// let b = Sample::new(vec![14.5, 10.4, 12.9, 11.7, 13.0]).unwrap();
/// let result = mann_whitney(&a, &b, &RankTestOptions::default()).unwrap();
/// assert_eq!(result.statistic(), Some(3.0));
/// assert!((result.p_value() - 0.0556).abs() < 1e-4);
/// ```
pub fn mann_whitney(x: &Sample, y: &Sample, options: &RankTestOptions) -> Result<TestResult> {
    options.validate()?;
    let m = x.len();
    let n = y.len();
    ensure_len(m, 1)?;
    ensure_len(n, 1)?;

    let pooled: Vec<f64> = x.values().iter().chain(y.values()).copied().collect();
    let ranking = rank(&pooled);
    let rank_sum_x: f64 = ranking.ranks[..m].iter().sum();
    let w = rank_sum_x - (m * (m + 1)) as f64 / 2.0;

    let mut advisories = Vec::new();
    if ranking.has_ties() {
        advisories.push(Advisory::TiesPresent {
            tie_groups: ranking.tie_groups.len(),
        });
    }

    let p_value = if use_exact(m.max(n), ranking.has_ties(), options) {
        exact_p_value(w, m, n, options.alternative)?
    } else {
        let big_n = (m + n) as f64;
        let mean = (m * n) as f64 / 2.0;
        let variance = (m * n) as f64 / 12.0
            * ((big_n + 1.0) - ranking.tie_correction() / (big_n * (big_n - 1.0)));
        if !(variance > 0.0) {
            return Err(TestError::InvalidInput(
                "rank-sum test is undefined when every value is tied".to_string(),
            ));
        }
        advisories.push(Advisory::NormalApproximation { n: m + n });
        normal_p_value(w - mean, variance.sqrt(), options)
    };

    let result = advisories.into_iter().fold(
        TestResult::new(TestKind::MannWhitney, p_value, options.alternative).with_statistic(w),
        TestResult::with_advisory,
    );
    Ok(result.logged())
}

fn exact_p_value(w: f64, m: usize, n: usize, alternative: Alternative) -> Result<f64> {
    let dist = RankSumDistribution::new(m, n)?;
    Ok(match alternative {
        Alternative::Greater => dist.upper_tail_inclusive(w),
        Alternative::Less => dist.cdf(w),
        Alternative::TwoSided => {
            let tail = if w > (m * n) as f64 / 2.0 {
                dist.upper_tail_inclusive(w)
            } else {
                dist.cdf(w)
            };
            (2.0 * tail).min(1.0)
        }
    })
}
