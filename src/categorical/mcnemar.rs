use super::PairedContingencyTable;
use crate::config::McNemarOptions;
use crate::distribution::{ChiSquared, Distribution};
use crate::error::{Result, TestError};
use crate::result::{Alternative, DegreesOfFreedom, TestKind, TestResult};

/// McNemar's test of marginal homogeneity on a 2×2 paired table
///
/// Only the discordant cells enter: X² = (|b − c| − k)²/(b + c) on one
/// degree of freedom, with k taken from `options.correction`. The correction
/// never exceeds |b − c|.
///
/// # Example
/// ```
/// use contraste::categorical::{mcnemar_test, PairedContingencyTable};
/// use contraste::config::McNemarOptions;
///
/// let table = PairedContingencyTable::from_2x2(10, 5, 25, 60);
/// let result = mcnemar_test(&table, &McNemarOptions::default()).unwrap();
/// assert!((result.statistic().unwrap() - 12.675).abs() < 1e-9);
/// ```
pub fn mcnemar_test(table: &PairedContingencyTable, options: &McNemarOptions) -> Result<TestResult> {
    let (b, c) = table.discordant().ok_or_else(|| {
        TestError::InvalidInput(format!(
            "McNemar's test needs a 2×2 paired table, got {0}×{0}; use bowker_test",
            table.size()
        ))
    })?;
    if b + c == 0 {
        return Err(TestError::InvalidInput(
            "McNemar's test is undefined without discordant pairs".to_string(),
        ));
    }
    let diff = (b as f64 - c as f64).abs();
    let diff = diff - diff.min(options.correction.amount());
    let statistic = diff * diff / (b + c) as f64;
    let p_value = ChiSquared::new(1.0)?.sf(statistic);

    Ok(
        TestResult::new(TestKind::McNemar, p_value, Alternative::TwoSided)
            .with_statistic(statistic)
            .with_df(DegreesOfFreedom::Integer(1))
            .logged(),
    )
}

/// Bowker's test of symmetry on a k×k paired table
///
/// X² = Σᵢ<ⱼ (nᵢⱼ − nⱼᵢ)²/(nᵢⱼ + nⱼᵢ), summed over off-diagonal pairs with a
/// non-zero total; df is the number of such pairs. For k = 2 this is the
/// uncorrected McNemar statistic.
pub fn bowker_test(table: &PairedContingencyTable) -> Result<TestResult> {
    let counts = table.counts();
    let k = table.size();
    let mut statistic = 0.0;
    let mut df = 0u64;
    for i in 0..k {
        for j in (i + 1)..k {
            let upper = counts[i][j] as f64;
            let lower = counts[j][i] as f64;
            let sum = upper + lower;
            if sum > 0.0 {
                statistic += (upper - lower).powi(2) / sum;
                df += 1;
            }
        }
    }
    if df == 0 {
        return Err(TestError::InvalidInput(
            "Bowker's test is undefined without off-diagonal responses".to_string(),
        ));
    }
    let p_value = ChiSquared::new(df as f64)?.sf(statistic);

    Ok(
        TestResult::new(TestKind::Bowker, p_value, Alternative::TwoSided)
            .with_statistic(statistic)
            .with_df(DegreesOfFreedom::Integer(df))
            .logged(),
    )
}
