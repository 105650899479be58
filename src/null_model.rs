//! Null-hypothesis specifications

use crate::error::{Result, TestError};
use serde::{Deserialize, Serialize};

/// Tolerance on Σp = 1 for a probability vector
pub const PROBABILITY_SUM_TOLERANCE: f64 = 1e-6;

/// What the null hypothesis asserts
///
/// Categorical tests take a probability vector; continuous tests take a
/// hypothesized mean (or mean difference).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NullModel {
    Probabilities(Vec<f64>),
    Mean(f64),
}

impl NullModel {
    /// Validated probability vector
    ///
    /// # Example
    /// ```
    /// use contraste::null_model::NullModel;
    ///
    /// assert!(NullModel::probabilities(vec![0.2, 0.3, 0.5]).is_ok());
    /// assert!(NullModel::probabilities(vec![0.2, 0.3]).is_err());
    /// ```
    pub fn probabilities(p: Vec<f64>) -> Result<Self> {
        validate_probabilities(&p)?;
        Ok(NullModel::Probabilities(p))
    }

    /// Equal probability for each of `k` categories
    pub fn uniform(k: usize) -> Result<Self> {
        if k == 0 {
            return Err(TestError::InvalidInput(
                "uniform null model needs at least one category".to_string(),
            ));
        }
        Ok(NullModel::Probabilities(vec![1.0 / k as f64; k]))
    }

    pub fn mean(mu: f64) -> Result<Self> {
        if !mu.is_finite() {
            return Err(TestError::InvalidInput(format!(
                "hypothesized mean must be finite, got {}",
                mu
            )));
        }
        Ok(NullModel::Mean(mu))
    }

    /// Probability vector, validated against the number of categories
    pub(crate) fn expect_probabilities(&self, k: usize) -> Result<&[f64]> {
        match self {
            NullModel::Probabilities(p) => {
                validate_probabilities(p)?;
                if p.len() != k {
                    return Err(TestError::InvalidInput(format!(
                        "null model has {} probabilities for {} categories",
                        p.len(),
                        k
                    )));
                }
                Ok(p)
            }
            NullModel::Mean(_) => Err(TestError::InvalidInput(
                "categorical test needs a probability null model, got a mean".to_string(),
            )),
        }
    }

    pub(crate) fn expect_mean(&self) -> Result<f64> {
        match self {
            NullModel::Mean(mu) if mu.is_finite() => Ok(*mu),
            NullModel::Mean(mu) => Err(TestError::InvalidInput(format!(
                "hypothesized mean must be finite, got {}",
                mu
            ))),
            NullModel::Probabilities(_) => Err(TestError::InvalidInput(
                "mean test needs a hypothesized mean, got a probability vector".to_string(),
            )),
        }
    }
}

fn validate_probabilities(p: &[f64]) -> Result<()> {
    if p.is_empty() {
        return Err(TestError::InvalidInput(
            "probability vector is empty".to_string(),
        ));
    }
    if let Some(bad) = p.iter().find(|v| !(v.is_finite() && **v >= 0.0 && **v <= 1.0)) {
        return Err(TestError::InvalidInput(format!(
            "probability {} outside [0, 1]",
            bad
        )));
    }
    let sum: f64 = p.iter().sum();
    if (sum - 1.0).abs() > PROBABILITY_SUM_TOLERANCE {
        return Err(TestError::InvalidInput(format!(
            "probabilities sum to {}, expected 1",
            sum
        )));
    }
    Ok(())
}
