use super::{ensure_positive_se, sided_interval, sided_p_value};
use crate::config::TTestOptions;
use crate::descriptive::{pooled_variance, Sample, SummaryStats};
use crate::distribution::StudentT;
use crate::error::{ensure_len, Result};
use crate::result::{DegreesOfFreedom, TestKind, TestResult};
use serde::{Deserialize, Serialize};

/// Which variance model the caller commits to for a two-sample t-test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VarianceAssumption {
    /// Student: one pooled variance, df = N₁ + N₂ − 2
    Equal,
    /// Welch: separate variances, Welch–Satterthwaite df
    Unequal,
}

/// Student's equal-variance t-test of H₀: μ₁ = μ₂
///
/// # Example
/// ```
/// use contraste::config::TTestOptions;
/// use contraste::descriptive::SummaryStats;
/// use contraste::ttest::student_t_test_from_summary;
///
/// let x = SummaryStats::new(74.5, 9.0, 15).unwrap();
/// let y = SummaryStats::new(69.1, 5.8, 18).unwrap();
/// let result = student_t_test_from_summary(&x, &y, &TTestOptions::default()).unwrap();
/// assert_eq!(result.df().unwrap().value(), 31.0);
/// assert!(result.p_value() < 0.05);
/// ```
pub fn student_t_test(x: &Sample, y: &Sample, options: &TTestOptions) -> Result<TestResult> {
    student_t_test_from_summary(&x.summary()?, &y.summary()?, options)
}

pub fn student_t_test_from_summary(
    x: &SummaryStats,
    y: &SummaryStats,
    options: &TTestOptions,
) -> Result<TestResult> {
    options.validate()?;
    let sp2 = pooled_variance(x, y)?;
    let se = (sp2 * (1.0 / x.n as f64 + 1.0 / y.n as f64)).sqrt();
    let df = (x.n + y.n - 2) as u64;
    two_sample(
        TestKind::StudentT,
        x,
        y,
        se,
        DegreesOfFreedom::Integer(df),
        options,
    )
}

/// Welch's unequal-variance t-test of H₀: μ₁ = μ₂
///
/// Degrees of freedom come from the Welch–Satterthwaite equation and are
/// reported unrounded as [`DegreesOfFreedom::Fractional`].
pub fn welch_t_test(x: &Sample, y: &Sample, options: &TTestOptions) -> Result<TestResult> {
    welch_t_test_from_summary(&x.summary()?, &y.summary()?, options)
}

pub fn welch_t_test_from_summary(
    x: &SummaryStats,
    y: &SummaryStats,
    options: &TTestOptions,
) -> Result<TestResult> {
    options.validate()?;
    ensure_len(x.n, 2)?;
    ensure_len(y.n, 2)?;
    let vx = x.variance() / x.n as f64;
    let vy = y.variance() / y.n as f64;
    let se2 = vx + vy;
    let df = se2 * se2 / (vx * vx / (x.n - 1) as f64 + vy * vy / (y.n - 1) as f64);
    two_sample(
        TestKind::WelchT,
        x,
        y,
        se2.sqrt(),
        DegreesOfFreedom::Fractional(df),
        options,
    )
}

/// Two-sample t-test with an explicitly chosen variance model
pub fn independent_t_test(
    x: &Sample,
    y: &Sample,
    assumption: VarianceAssumption,
    options: &TTestOptions,
) -> Result<TestResult> {
    independent_t_test_from_summary(&x.summary()?, &y.summary()?, assumption, options)
}

pub fn independent_t_test_from_summary(
    x: &SummaryStats,
    y: &SummaryStats,
    assumption: VarianceAssumption,
    options: &TTestOptions,
) -> Result<TestResult> {
    match assumption {
        VarianceAssumption::Equal => student_t_test_from_summary(x, y, options),
        VarianceAssumption::Unequal => welch_t_test_from_summary(x, y, options),
    }
}

fn two_sample(
    kind: TestKind,
    x: &SummaryStats,
    y: &SummaryStats,
    se: f64,
    df: DegreesOfFreedom,
    options: &TTestOptions,
) -> Result<TestResult> {
    ensure_positive_se(se)?;
    let diff = x.mean - y.mean;
    let t = diff / se;
    let dist = StudentT::new(df.value())?;
    let p_value = sided_p_value(&dist, t, options.alternative);
    let ci = sided_interval(&dist, diff, se, options)?;

    Ok(TestResult::new(kind, p_value, options.alternative)
        .with_statistic(t)
        .with_df(df)
        .with_estimate(diff)
        .with_confidence_interval(ci)
        .logged())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TestError;

    fn groups() -> (SummaryStats, SummaryStats) {
        (
            SummaryStats::new(74.5, 9.0, 15).unwrap(),
            SummaryStats::new(69.1, 5.8, 18).unwrap(),
        )
    }

    #[test]
    fn test_student_textbook() {
        let (x, y) = groups();
        let r = student_t_test_from_summary(&x, &y, &TTestOptions::default()).unwrap();
        assert!((r.statistic().unwrap() - 2.082_214).abs() < 1e-5);
        assert_eq!(r.df(), Some(DegreesOfFreedom::Integer(31)));
        assert!((r.p_value() - 0.045_667_3).abs() < 1e-6);
        assert!((r.estimate().unwrap() - 5.4).abs() < 1e-12);
    }

    #[test]
    fn test_welch_textbook() {
        let (x, y) = groups();
        let r = welch_t_test_from_summary(&x, &y, &TTestOptions::default()).unwrap();
        assert!((r.statistic().unwrap() - 2.002_902).abs() < 1e-5);
        match r.df() {
            Some(DegreesOfFreedom::Fractional(df)) => {
                assert!((df - 23.089_826_857_5).abs() < 1e-8)
            }
            other => panic!("expected fractional df, got {:?}", other),
        }
        assert!((r.p_value() - 0.057_063_9).abs() < 1e-6);
    }

    #[test]
    fn test_welch_p_larger_than_student_here() {
        let (x, y) = groups();
        let s = student_t_test_from_summary(&x, &y, &TTestOptions::default()).unwrap();
        let w = welch_t_test_from_summary(&x, &y, &TTestOptions::default()).unwrap();
        assert!(w.p_value() > s.p_value());
        assert!(!w.is_significant(0.05));
    }

    #[test]
    fn test_assumption_selects_variant() {
        let (x, y) = groups();
        let opts = TTestOptions::default();
        let equal = independent_t_test_from_summary(&x, &y, VarianceAssumption::Equal, &opts)
            .unwrap();
        let unequal =
            independent_t_test_from_summary(&x, &y, VarianceAssumption::Unequal, &opts).unwrap();
        assert_eq!(equal.kind(), TestKind::StudentT);
        assert_eq!(unequal.kind(), TestKind::WelchT);
    }

    #[test]
    fn test_small_groups_rejected() {
        let x = SummaryStats::new(1.0, 1.0, 1).unwrap();
        let y = SummaryStats::new(2.0, 1.0, 5).unwrap();
        assert!(matches!(
            welch_t_test_from_summary(&x, &y, &TTestOptions::default()),
            Err(TestError::InsufficientData { .. })
        ));
        assert!(student_t_test_from_summary(&x, &y, &TTestOptions::default()).is_err());
    }

    #[test]
    fn test_raw_samples_match_summaries() {
        let a = Sample::new(vec![12.0, 14.5, 11.0, 15.5, 13.0]).unwrap();
        let b = Sample::new(vec![10.0, 9.5, 12.5, 11.0, 8.0, 10.5]).unwrap();
        let opts = TTestOptions::default();
        let raw = welch_t_test(&a, &b, &opts).unwrap();
        let summary =
            welch_t_test_from_summary(&a.summary().unwrap(), &b.summary().unwrap(), &opts)
                .unwrap();
        assert_eq!(raw, summary);
    }
}
