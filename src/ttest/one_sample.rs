use super::{ensure_positive_se, sided_interval, sided_p_value};
use crate::config::TTestOptions;
use crate::descriptive::{Sample, SummaryStats};
use crate::distribution::{Normal, StudentT};
use crate::error::{ensure_len, Result, TestError};
use crate::null_model::NullModel;
use crate::result::{DegreesOfFreedom, TestKind, TestResult};

/// One-sample t-test of H₀: μ = `mu`
///
/// t = (x̄ − μ₀)/(s/√N) on N − 1 degrees of freedom. The interval is for
/// the population mean.
///
/// # Example
/// ```
/// use contraste::config::TTestOptions;
/// use contraste::descriptive::Sample;
/// use contraste::ttest::one_sample_t_test;
///
/// let sample = Sample::new(vec![5.1, 4.9, 5.6, 5.8, 6.0, 5.3]).unwrap();
/// let result = one_sample_t_test(&sample, 5.0, &TTestOptions::default()).unwrap();
/// assert_eq!(result.df().unwrap().value(), 5.0);
/// assert!(result.confidence_interval().unwrap().contains(result.estimate().unwrap()));
/// ```
pub fn one_sample_t_test(sample: &Sample, mu: f64, options: &TTestOptions) -> Result<TestResult> {
    let stats = sample.summary()?;
    one_sample_t_test_from_summary(&stats, mu, options)
}

pub fn one_sample_t_test_from_summary(
    stats: &SummaryStats,
    mu: f64,
    options: &TTestOptions,
) -> Result<TestResult> {
    t_test_on_summary(TestKind::OneSampleT, stats, mu, options)
}

/// One-sample z-test with known population standard deviation `sigma`
pub fn one_sample_z_test(
    sample: &Sample,
    mu: f64,
    sigma: f64,
    options: &TTestOptions,
) -> Result<TestResult> {
    ensure_len(sample.len(), 1)?;
    let mean = sample.mean().unwrap_or_default();
    one_sample_z_test_from_summary(mean, sample.len(), mu, sigma, options)
}

/// z-test from a sample mean and size
pub fn one_sample_z_test_from_summary(
    mean: f64,
    n: usize,
    mu: f64,
    sigma: f64,
    options: &TTestOptions,
) -> Result<TestResult> {
    options.validate()?;
    ensure_len(n, 1)?;
    if !(sigma.is_finite() && sigma > 0.0) {
        return Err(TestError::InvalidInput(format!(
            "known standard deviation must be finite and > 0, got {}",
            sigma
        )));
    }
    if !mean.is_finite() {
        return Err(TestError::InvalidInput(format!(
            "sample mean must be finite, got {}",
            mean
        )));
    }
    check_mu(mu)?;
    let se = sigma / (n as f64).sqrt();
    let z = (mean - mu) / se;
    let dist = Normal::standard();
    let p_value = sided_p_value(&dist, z, options.alternative);
    let ci = sided_interval(&dist, mean, se, options)?;

    Ok(TestResult::new(TestKind::OneSampleZ, p_value, options.alternative)
        .with_statistic(z)
        .with_estimate(mean)
        .with_confidence_interval(ci)
        .logged())
}

/// One-sample test against a [`NullModel::Mean`]
///
/// Runs the z-test when `known_sd` is given and the t-test otherwise; the
/// result's [`TestResult::kind`] records which one ran.
pub fn one_sample_test(
    sample: &Sample,
    null: &NullModel,
    known_sd: Option<f64>,
    options: &TTestOptions,
) -> Result<TestResult> {
    let mu = null.expect_mean()?;
    match known_sd {
        Some(sigma) => one_sample_z_test(sample, mu, sigma, options),
        None => one_sample_t_test(sample, mu, options),
    }
}

/// Shared core of the one-sample and paired t-tests
pub(super) fn t_test_on_summary(
    kind: TestKind,
    stats: &SummaryStats,
    mu: f64,
    options: &TTestOptions,
) -> Result<TestResult> {
    options.validate()?;
    ensure_len(stats.n, 2)?;
    check_mu(mu)?;
    let se = stats.sem();
    ensure_positive_se(se)?;

    let df = (stats.n - 1) as u64;
    let t = (stats.mean - mu) / se;
    let dist = StudentT::new(df as f64)?;
    let p_value = sided_p_value(&dist, t, options.alternative);
    let ci = sided_interval(&dist, stats.mean, se, options)?;

    Ok(TestResult::new(kind, p_value, options.alternative)
        .with_statistic(t)
        .with_df(DegreesOfFreedom::Integer(df))
        .with_estimate(stats.mean)
        .with_confidence_interval(ci)
        .logged())
}

fn check_mu(mu: f64) -> Result<()> {
    if !mu.is_finite() {
        return Err(TestError::InvalidInput(format!(
            "hypothesized mean must be finite, got {}",
            mu
        )));
    }
    Ok(())
}
