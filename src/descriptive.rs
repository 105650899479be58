//! Descriptive statistics: samples, summaries, and variance estimators
//!
//! All estimators use the bias-corrected (N − 1) denominator unless their
//! name says otherwise.

use crate::error::{ensure_len, Result, TestError};
use serde::{Deserialize, Serialize};

/// Ordered collection of finite numeric observations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    values: Vec<f64>,
}

impl Sample {
    /// Build a sample; NaN or infinite observations are rejected
    ///
    /// # Example
    /// ```
    /// use contraste::descriptive::Sample;
    ///
    /// let s = Sample::new(vec![2.0, 4.0, 6.0]).unwrap();
    /// assert_eq!(s.mean(), Some(4.0));
    /// assert!(Sample::new(vec![1.0, f64::NAN]).is_err());
    /// ```
    pub fn new(values: impl Into<Vec<f64>>) -> Result<Self> {
        let values = values.into();
        if let Some(pos) = values.iter().position(|v| !v.is_finite()) {
            return Err(TestError::InvalidInput(format!(
                "observation {} is not finite ({})",
                pos, values[pos]
            )));
        }
        Ok(Self { values })
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn mean(&self) -> Option<f64> {
        mean(&self.values)
    }

    /// Sample variance (N − 1 denominator)
    pub fn variance(&self) -> Option<f64> {
        variance(&self.values)
    }

    pub fn sd(&self) -> Option<f64> {
        sd(&self.values)
    }

    /// Standard error of the mean
    pub fn sem(&self) -> Option<f64> {
        sem(&self.values)
    }

    /// Mean, sd and N; needs at least two observations
    pub fn summary(&self) -> Result<SummaryStats> {
        ensure_len(self.len(), 2)?;
        let mean = mean(&self.values).unwrap_or_default();
        let sd = sd(&self.values).unwrap_or_default();
        SummaryStats::new(mean, sd, self.len())
    }

    /// Element-wise difference `self − other`; lengths must match
    pub(crate) fn differences(&self, other: &Sample) -> Result<Sample> {
        if self.len() != other.len() {
            return Err(TestError::UnpairedData(format!(
                "paired samples differ in length: {} vs {}",
                self.len(),
                other.len()
            )));
        }
        let values = self
            .values
            .iter()
            .zip(&other.values)
            .map(|(x, y)| x - y)
            .collect::<Vec<_>>();
        Ok(Sample { values })
    }
}

impl TryFrom<Vec<f64>> for Sample {
    type Error = TestError;

    fn try_from(values: Vec<f64>) -> Result<Self> {
        Sample::new(values)
    }
}

impl TryFrom<&[f64]> for Sample {
    type Error = TestError;

    fn try_from(values: &[f64]) -> Result<Self> {
        Sample::new(values.to_vec())
    }
}

/// Summary statistics of one group: mean, standard deviation and size
///
/// Every t-test and Cohen's d variant accepts these directly, so published
/// summaries can be analysed without raw data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    pub mean: f64,
    /// Bias-corrected standard deviation
    pub sd: f64,
    pub n: usize,
}

impl SummaryStats {
    pub fn new(mean: f64, sd: f64, n: usize) -> Result<Self> {
        if !mean.is_finite() || !sd.is_finite() || sd < 0.0 {
            return Err(TestError::InvalidInput(format!(
                "summary requires finite mean and sd >= 0, got mean={}, sd={}",
                mean, sd
            )));
        }
        Ok(Self { mean, sd, n })
    }

    pub fn variance(&self) -> f64 {
        self.sd * self.sd
    }

    /// sd / √N
    pub fn sem(&self) -> f64 {
        self.sd / (self.n as f64).sqrt()
    }
}

/// Labelled category counts: the categorical form of a sample
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCounts {
    labels: Vec<String>,
    counts: Vec<u64>,
}

impl CategoryCounts {
    /// Tabulate raw categorical observations in first-seen order
    ///
    /// # Example
    /// ```
    /// use contraste::descriptive::CategoryCounts;
    ///
    /// let counts = CategoryCounts::from_observations(["hearts", "clubs", "hearts"]);
    /// assert_eq!(counts.labels(), ["hearts", "clubs"]);
    /// assert_eq!(counts.counts(), [2, 1]);
    /// ```
    pub fn from_observations<I>(observations: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut labels: Vec<String> = Vec::new();
        let mut counts: Vec<u64> = Vec::new();
        for obs in observations {
            let obs = obs.as_ref();
            match labels.iter().position(|l| l == obs) {
                Some(i) => counts[i] += 1,
                None => {
                    labels.push(obs.to_string());
                    counts.push(1);
                }
            }
        }
        Self { labels, counts }
    }

    /// Build from explicit `(label, count)` pairs; labels must be unique
    pub fn from_pairs<S: Into<String>>(pairs: impl IntoIterator<Item = (S, u64)>) -> Result<Self> {
        let mut labels: Vec<String> = Vec::new();
        let mut counts = Vec::new();
        for (label, count) in pairs {
            let label = label.into();
            if labels.contains(&label) {
                return Err(TestError::InvalidInput(format!(
                    "duplicate category label '{}'",
                    label
                )));
            }
            labels.push(label);
            counts.push(count);
        }
        Ok(Self { labels, counts })
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    /// Count for one label, if present
    pub fn get(&self, label: &str) -> Option<u64> {
        self.labels
            .iter()
            .position(|l| l == label)
            .map(|i| self.counts[i])
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Number of categories
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sum of squared deviations from the mean
pub fn sum_of_squares(values: &[f64]) -> Option<f64> {
    let m = mean(values)?;
    Some(values.iter().map(|v| (v - m) * (v - m)).sum())
}

/// Sample variance with the N − 1 denominator
pub fn variance(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    Some(sum_of_squares(values)? / (values.len() - 1) as f64)
}

/// Population variance with the N denominator
pub fn population_variance(values: &[f64]) -> Option<f64> {
    Some(sum_of_squares(values)? / values.len() as f64)
}

pub fn sd(values: &[f64]) -> Option<f64> {
    variance(values).map(f64::sqrt)
}

pub fn sem(values: &[f64]) -> Option<f64> {
    Some(sd(values)? / (values.len() as f64).sqrt())
}

/// Pooled variance ŝp² = (w₁s₁² + w₂s₂²)/(w₁ + w₂) with wᵢ = Nᵢ − 1
pub fn pooled_variance(x: &SummaryStats, y: &SummaryStats) -> Result<f64> {
    ensure_len(x.n, 2)?;
    ensure_len(y.n, 2)?;
    let w1 = (x.n - 1) as f64;
    let w2 = (y.n - 1) as f64;
    Ok((w1 * x.variance() + w2 * y.variance()) / (w1 + w2))
}

/// Pooled standard deviation √ŝp²
pub fn pooled_sd(x: &SummaryStats, y: &SummaryStats) -> Result<f64> {
    pooled_variance(x, y).map(f64::sqrt)
}
