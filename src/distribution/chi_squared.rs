use super::special::{gamma_p, gamma_q, invert_cdf};
use super::{ensure_positive_df, Distribution};
use crate::error::{ensure_probability, Result};

/// Chi-square distribution with k degrees of freedom
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChiSquared {
    df: f64,
}

impl ChiSquared {
    pub fn new(df: f64) -> Result<Self> {
        ensure_positive_df(df)?;
        Ok(Self { df })
    }

    pub fn df(&self) -> f64 {
        self.df
    }
}

impl Distribution for ChiSquared {
    fn cdf(&self, x: f64) -> f64 {
        if x <= 0.0 {
            return 0.0;
        }
        gamma_p(self.df / 2.0, x / 2.0)
    }

    fn sf(&self, x: f64) -> f64 {
        if x <= 0.0 {
            return 1.0;
        }
        gamma_q(self.df / 2.0, x / 2.0)
    }

    fn quantile(&self, p: f64) -> Result<f64> {
        ensure_probability(p)?;
        if p == 0.0 {
            return Ok(0.0);
        }
        if p == 1.0 {
            return Ok(f64::INFINITY);
        }
        Ok(invert_cdf(|x| self.cdf(x), p, 0.0, self.df.max(1.0), Some(0.0)))
    }
}
