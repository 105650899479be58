//! Sampling distributions used by the hypothesis tests
//!
//! Each continuous family implements [`Distribution`]: a survival function
//! (upper-tail probability), a CDF, and a quantile function. Parameters are
//! validated on construction, so fractional degrees of freedom (Welch) go
//! through the same code path as integer ones.
//!
//! The rank and Shapiro-Wilk null distributions implement the same trait
//! from their own modules ([`crate::rank`], [`crate::normality`]).
//!
//! # Example
//! ```
//! use contraste::distribution::{ChiSquared, Distribution};
//!
//! let chi2 = ChiSquared::new(3.0).unwrap();
//! let critical = chi2.quantile(0.95).unwrap();
//! assert!((critical - 7.8147).abs() < 1e-3);
//! assert!((chi2.sf(8.44) - 0.0377).abs() < 1e-4);
//! ```

mod chi_squared;
mod hypergeometric;
mod normal;
pub mod special;
mod student_t;

pub use chi_squared::ChiSquared;
pub use hypergeometric::Hypergeometric;
pub use normal::Normal;
pub use student_t::StudentT;

use crate::error::Result;

/// Survival probability and quantile for a fixed parameterization
pub trait Distribution {
    /// P(X <= x)
    fn cdf(&self, x: f64) -> f64;

    /// Upper-tail probability P(X > x)
    fn sf(&self, x: f64) -> f64 {
        1.0 - self.cdf(x)
    }

    /// Smallest x with cdf(x) >= p; fails with `Domain` when p is outside [0, 1]
    fn quantile(&self, p: f64) -> Result<f64>;
}

pub(crate) fn ensure_positive_df(df: f64) -> Result<()> {
    if !(df.is_finite() && df > 0.0) {
        return Err(crate::error::TestError::Domain(format!(
            "degrees of freedom must be finite and > 0, got {}",
            df
        )));
    }
    Ok(())
}
