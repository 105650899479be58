use super::special::{inverse_normal_cdf, standard_normal_cdf, standard_normal_sf};
use super::Distribution;
use crate::error::{ensure_probability, Result, TestError};

/// Normal distribution N(mean, sd²)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normal {
    mean: f64,
    sd: f64,
}

impl Normal {
    pub fn new(mean: f64, sd: f64) -> Result<Self> {
        if !mean.is_finite() || !(sd.is_finite() && sd > 0.0) {
            return Err(TestError::Domain(format!(
                "normal requires finite mean and sd > 0, got mean={}, sd={}",
                mean, sd
            )));
        }
        Ok(Self { mean, sd })
    }

    /// N(0, 1)
    pub fn standard() -> Self {
        Self { mean: 0.0, sd: 1.0 }
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn sd(&self) -> f64 {
        self.sd
    }

    fn standardize(&self, x: f64) -> f64 {
        (x - self.mean) / self.sd
    }
}

impl Distribution for Normal {
    fn cdf(&self, x: f64) -> f64 {
        standard_normal_cdf(self.standardize(x))
    }

    fn sf(&self, x: f64) -> f64 {
        standard_normal_sf(self.standardize(x))
    }

    fn quantile(&self, p: f64) -> Result<f64> {
        ensure_probability(p)?;
        Ok(self.mean + self.sd * inverse_normal_cdf(p))
    }
}
