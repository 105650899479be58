use super::{any_below, LOW_EXPECTED_THRESHOLD};
use crate::descriptive::CategoryCounts;
use crate::distribution::{ChiSquared, Distribution};
use crate::error::{Result, TestError};
use crate::null_model::NullModel;
use crate::result::{Alternative, DegreesOfFreedom, TestKind, TestResult};

/// Pearson chi-square goodness-of-fit test
///
/// X² = Σ(Oᵢ − Eᵢ)²/Eᵢ with Eᵢ = N·Pᵢ, on k − 1 degrees of freedom. Any
/// Eᵢ below 5 attaches a `LowExpectedCount` advisory.
///
/// # Example
/// ```
/// use contraste::categorical::goodness_of_fit;
/// use contraste::null_model::NullModel;
///
/// let result = goodness_of_fit(&[35, 51, 64, 50], &NullModel::uniform(4).unwrap()).unwrap();
/// assert!((result.statistic().unwrap() - 8.44).abs() < 1e-9);
/// assert!(result.p_value() < 0.05);
/// ```
pub fn goodness_of_fit(observed: &[u64], null: &NullModel) -> Result<TestResult> {
    let k = observed.len();
    if k < 2 {
        return Err(TestError::InvalidInput(format!(
            "goodness-of-fit needs at least two categories, got {}",
            k
        )));
    }
    let probabilities = null.expect_probabilities(k)?;
    let n: u64 = observed.iter().sum();
    if n == 0 {
        return Err(TestError::InvalidInput(
            "goodness-of-fit needs at least one observation".to_string(),
        ));
    }

    let expected: Vec<f64> = probabilities.iter().map(|p| n as f64 * p).collect();
    if let Some(i) = expected.iter().position(|&e| e <= 0.0) {
        return Err(TestError::InvalidInput(format!(
            "expected count for category {} is zero",
            i
        )));
    }

    let statistic: f64 = observed
        .iter()
        .zip(&expected)
        .map(|(&o, &e)| {
            let d = o as f64 - e;
            d * d / e
        })
        .sum();
    let df = (k - 1) as u64;
    let p_value = ChiSquared::new(df as f64)?.sf(statistic);

    let mut result = TestResult::new(TestKind::GoodnessOfFit, p_value, Alternative::TwoSided)
        .with_statistic(statistic)
        .with_df(DegreesOfFreedom::Integer(df));
    if let Some(advisory) = any_below(&expected, LOW_EXPECTED_THRESHOLD) {
        result = result.with_advisory(advisory);
    }
    Ok(result.logged())
}

/// Goodness-of-fit against equal category probabilities
pub fn goodness_of_fit_uniform(observed: &[u64]) -> Result<TestResult> {
    let null = NullModel::uniform(observed.len())?;
    goodness_of_fit(observed, &null)
}

/// Goodness-of-fit over tabulated categorical observations
pub fn goodness_of_fit_counts(counts: &CategoryCounts, null: &NullModel) -> Result<TestResult> {
    goodness_of_fit(counts.counts(), null)
}
