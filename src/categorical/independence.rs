use super::{share_below, ContingencyTable};
use crate::config::IndependenceOptions;
use crate::distribution::{ChiSquared, Distribution};
use crate::error::{Result, TestError};
use crate::result::{Alternative, DegreesOfFreedom, EffectSize, EffectSizeKind, TestKind, TestResult};

/// Pearson chi-square test of independence
///
/// X² = Σ(O − E)²/E with E = R·C/N on (r − 1)(c − 1) degrees of freedom.
/// When df = 1 and `options.yates_correction` is set, min(0.5, |O − E|) is
/// subtracted from every |O − E| before squaring. Cramér's V (from the
/// uncorrected statistic) is attached as the effect size.
///
/// # Example
/// ```
/// use contraste::categorical::{independence_test, ContingencyTable};
/// use contraste::config::IndependenceOptions;
///
/// let table = ContingencyTable::new(vec![vec![13, 15], vec![30, 13], vec![44, 65]]).unwrap();
/// let result = independence_test(&table, &IndependenceOptions::default()).unwrap();
/// assert_eq!(result.df().unwrap().value(), 2.0);
/// assert!(result.p_value() < 0.01);
/// ```
pub fn independence_test(
    table: &ContingencyTable,
    options: &IndependenceOptions,
) -> Result<TestResult> {
    options.validate()?;
    let expected = checked_expected(table)?;
    let df = ((table.rows() - 1) * (table.cols() - 1)) as u64;
    let correct = df == 1 && options.yates_correction;

    let uncorrected = pearson_sum(table, &expected, false);
    let statistic = if correct {
        pearson_sum(table, &expected, true)
    } else {
        uncorrected
    };
    let p_value = ChiSquared::new(df as f64)?.sf(statistic);

    let n = table.total() as f64;
    let k = table.rows().min(table.cols()) as f64;
    let v = (uncorrected / (n * (k - 1.0))).sqrt();

    let mut result = TestResult::new(TestKind::Independence, p_value, Alternative::TwoSided)
        .with_statistic(statistic)
        .with_df(DegreesOfFreedom::Integer(df))
        .with_effect_size(EffectSize {
            kind: EffectSizeKind::CramersV,
            value: v,
        });
    let flat: Vec<f64> = expected.into_iter().flatten().collect();
    if let Some(advisory) = share_below(&flat, options.low_expected_threshold) {
        result = result.with_advisory(advisory);
    }
    Ok(result.logged())
}

/// Uncorrected Pearson X² of a table against its independence expectation
pub fn pearson_statistic(table: &ContingencyTable) -> Result<f64> {
    let expected = checked_expected(table)?;
    Ok(pearson_sum(table, &expected, false))
}

/// Expected counts, rejecting degenerate shapes and empty margins
fn checked_expected(table: &ContingencyTable) -> Result<Vec<Vec<f64>>> {
    if table.rows() < 2 || table.cols() < 2 {
        return Err(TestError::InvalidInput(format!(
            "independence test needs at least 2×2 categories, got {}×{}",
            table.rows(),
            table.cols()
        )));
    }
    if let Some(i) = table.row_totals().iter().position(|&r| r == 0) {
        return Err(TestError::InvalidInput(format!(
            "row {} is empty, its expected counts would be zero",
            i
        )));
    }
    if let Some(j) = table.col_totals().iter().position(|&c| c == 0) {
        return Err(TestError::InvalidInput(format!(
            "column {} is empty, its expected counts would be zero",
            j
        )));
    }
    Ok(table.expected())
}

fn pearson_sum(table: &ContingencyTable, expected: &[Vec<f64>], yates: bool) -> f64 {
    table
        .counts()
        .iter()
        .flatten()
        .zip(expected.iter().flatten())
        .map(|(&o, &e)| {
            let mut d = (o as f64 - e).abs();
            if yates {
                d -= d.min(0.5);
            }
            d * d / e
        })
        .sum()
}
