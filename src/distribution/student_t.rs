use super::special::{beta_inc, invert_cdf};
use super::{ensure_positive_df, Distribution};
use crate::error::{ensure_probability, Result};

/// Student's t distribution with real-valued degrees of freedom
///
/// Tails come from the regularized incomplete beta:
/// P(T > t) = ½ · I_{ν/(ν+t²)}(ν/2, ½) for t > 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StudentT {
    df: f64,
}

impl StudentT {
    pub fn new(df: f64) -> Result<Self> {
        ensure_positive_df(df)?;
        Ok(Self { df })
    }

    pub fn df(&self) -> f64 {
        self.df
    }

    /// P(T > |t|), the one-tail mass beyond |t|
    fn tail(&self, t: f64) -> f64 {
        if t.is_infinite() {
            return 0.0;
        }
        0.5 * beta_inc(self.df / 2.0, 0.5, self.df / (self.df + t * t))
    }
}

impl Distribution for StudentT {
    fn cdf(&self, t: f64) -> f64 {
        if t < 0.0 {
            self.tail(t)
        } else {
            1.0 - self.tail(t)
        }
    }

    fn sf(&self, t: f64) -> f64 {
        if t > 0.0 {
            self.tail(t)
        } else {
            1.0 - self.tail(t)
        }
    }

    fn quantile(&self, p: f64) -> Result<f64> {
        ensure_probability(p)?;
        if p == 0.0 {
            return Ok(f64::NEG_INFINITY);
        }
        if p == 1.0 {
            return Ok(f64::INFINITY);
        }
        if p == 0.5 {
            return Ok(0.0);
        }
        Ok(invert_cdf(|t| self.cdf(t), p, -1.0, 1.0, None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TestError;

    #[test]
    fn test_sf_integer_df() {
        let t = StudentT::new(19.0).unwrap();
        // Two-sided p for t = 2.2549 on 19 df is 0.0361
        assert!((t.sf(2.254_858_464_7) - 0.018_067_256_454_33).abs() < 1e-10);
    }

    #[test]
    fn test_sf_fractional_df() {
        let t = StudentT::new(23.089_826_857_5).unwrap();
        assert!((t.sf(2.002_902_204_9) - 0.028_531_949_477_667).abs() < 1e-10);
    }

    #[test]
    fn test_cdf_sf_complement_and_symmetry() {
        let t = StudentT::new(3.5).unwrap();
        for &x in &[-4.0, -1.2, 0.0, 0.3, 2.5] {
            assert!((t.cdf(x) + t.sf(x) - 1.0).abs() < 1e-12);
            assert!((t.cdf(-x) - t.sf(x)).abs() < 1e-12);
        }
        assert!((t.cdf(0.0) - 0.5).abs() < 1e-15);
    }

    #[test]
    fn test_quantile_reference() {
        let q = StudentT::new(19.0).unwrap().quantile(0.975).unwrap();
        assert!((q - 2.093_024_054_408).abs() < 1e-8);
        let lower = StudentT::new(19.0).unwrap().quantile(0.025).unwrap();
        assert!((lower + q).abs() < 1e-8);
    }

    #[test]
    fn test_quantile_endpoints() {
        let t = StudentT::new(5.0).unwrap();
        assert_eq!(t.quantile(0.0).unwrap(), f64::NEG_INFINITY);
        assert_eq!(t.quantile(1.0).unwrap(), f64::INFINITY);
        assert_eq!(t.quantile(0.5).unwrap(), 0.0);
    }

    #[test]
    fn test_rejects_non_positive_df() {
        assert!(matches!(StudentT::new(0.0), Err(TestError::Domain(_))));
        assert!(StudentT::new(-3.0).is_err());
        assert!(StudentT::new(f64::INFINITY).is_err());
    }

    #[test]
    fn test_large_df_approaches_normal() {
        let t = StudentT::new(1e6).unwrap();
        assert!((t.quantile(0.975).unwrap() - 1.959_964).abs() < 1e-4);
    }
}
