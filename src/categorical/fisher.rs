use super::ContingencyTable;
use crate::config::FisherOptions;
use crate::distribution::Hypergeometric;
use crate::error::{Result, TestError};
use crate::result::{Alternative, EffectSize, EffectSizeKind, TestKind, TestResult};

/// Relative slack when comparing table probabilities against the observed one
const RELATIVE_ERROR: f64 = 1e-7;

/// Fisher's exact test on a 2×2 table
///
/// With both margins fixed the top-left cell follows a hypergeometric law.
/// The two-sided p-value sums the probabilities of every table no more
/// likely than the observed one; `Greater`/`Less` sum the upper/lower tail
/// of the top-left cell. The number of margin-compatible tables is checked
/// against `options.max_tables` before any probability is evaluated.
///
/// The result carries no test statistic. The sample odds ratio ad/bc is
/// attached as the effect size when it is defined.
///
/// # Example
/// ```
/// use contraste::categorical::{fisher_exact, ContingencyTable};
/// use contraste::config::FisherOptions;
///
/// let table = ContingencyTable::new(vec![vec![3, 3], vec![10, 0]]).unwrap();
/// let result = fisher_exact(&table, &FisherOptions::default()).unwrap();
/// assert!(result.statistic().is_none());
/// assert!((result.p_value() - 0.035714).abs() < 1e-6);
/// ```
pub fn fisher_exact(table: &ContingencyTable, options: &FisherOptions) -> Result<TestResult> {
    options.validate()?;
    let [[a, b], [c, d]] = table.as_2x2().ok_or_else(|| {
        TestError::InvalidInput(format!(
            "Fisher's exact test needs a 2×2 table, got {}×{}",
            table.rows(),
            table.cols()
        ))
    })?;
    let n = a + b + c + d;
    if n == 0 {
        return Err(TestError::InvalidInput(
            "Fisher's exact test needs at least one observation".to_string(),
        ));
    }

    let dist = Hypergeometric::new(n, a + c, a + b)?;
    let tables = dist.support_size();
    if tables > options.max_tables {
        return Err(TestError::ComputationTooLarge {
            required: tables,
            limit: options.max_tables,
        });
    }

    let p_value = match options.alternative {
        Alternative::Less => dist.cdf(a),
        Alternative::Greater => dist.sf(a),
        Alternative::TwoSided => {
            let observed = dist.pmf(a);
            let cutoff = observed * (1.0 + RELATIVE_ERROR);
            let (lo, hi) = dist.support();
            (lo..=hi)
                .map(|k| dist.pmf(k))
                .filter(|&p| p <= cutoff)
                .sum()
        }
    };
    tracing::trace!(tables, a, b, c, d, "enumerated fisher tables");

    let mut result = TestResult::new(TestKind::FisherExact, p_value, options.alternative);
    if let Some(odds) = odds_ratio(a, b, c, d) {
        result = result.with_effect_size(EffectSize {
            kind: EffectSizeKind::OddsRatio,
            value: odds,
        });
    }
    Ok(result.logged())
}

/// ad/bc; infinite when only bc is zero, undefined when both products are
fn odds_ratio(a: u64, b: u64, c: u64, d: u64) -> Option<f64> {
    let num = (a * d) as f64;
    let den = (b * c) as f64;
    match (num == 0.0, den == 0.0) {
        (true, true) => None,
        (false, true) => Some(f64::INFINITY),
        _ => Some(num / den),
    }
}
