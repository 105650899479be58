//! Error taxonomy shared by every test entry point
//!
//! Construction problems are rejected at the boundary with one of these
//! variants. Advisories about approximation quality are *not* errors; they
//! travel inside [`crate::result::TestResult`] instead.

use thiserror::Error;

/// Errors raised by distribution primitives and hypothesis tests
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TestError {
    /// Malformed null model, degenerate category count, zero standard error, ...
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Distribution parameter or probability outside its domain
    #[error("Domain error: {0}")]
    Domain(String),

    /// Sample too small for the requested test
    #[error("Insufficient data: need at least {required} observations, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    /// Paired sequences do not correspond one-to-one
    #[error("Unpaired data: {0}")]
    UnpairedData(String),

    /// Exact enumeration would exceed the configured bound
    #[error("Computation too large: {required} tables to enumerate, limit is {limit}")]
    ComputationTooLarge { required: u64, limit: u64 },
}

pub type Result<T> = std::result::Result<T, TestError>;

/// Reject a sample smaller than `required`
pub(crate) fn ensure_len(actual: usize, required: usize) -> Result<()> {
    if actual < required {
        return Err(TestError::InsufficientData { required, actual });
    }
    Ok(())
}

/// Reject a probability outside [0, 1]
pub(crate) fn ensure_probability(p: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&p) {
        return Err(TestError::Domain(format!(
            "probability must be in [0, 1], got {}",
            p
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_data_message() {
        let err = ensure_len(1, 2).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Insufficient data: need at least 2 observations, got 1"
        );
    }

    #[test]
    fn test_ensure_len_ok() {
        assert!(ensure_len(5, 2).is_ok());
        assert!(ensure_len(2, 2).is_ok());
    }

    #[test]
    fn test_ensure_probability_bounds() {
        assert!(ensure_probability(0.0).is_ok());
        assert!(ensure_probability(1.0).is_ok());
        assert!(matches!(
            ensure_probability(1.5),
            Err(TestError::Domain(_))
        ));
        assert!(ensure_probability(f64::NAN).is_err());
    }

    #[test]
    fn test_computation_too_large_message() {
        let err = TestError::ComputationTooLarge {
            required: 501,
            limit: 100,
        };
        assert!(err.to_string().contains("501"));
        assert!(err.to_string().contains("100"));
    }
}
