//! Immutable test outcome shared by every procedure
//!
//! A [`TestResult`] is produced once per call and exposes its contents only
//! through accessors. Crate-internal builder methods consume `self`, so a
//! result handed to a caller can no longer change.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which statistical test produced a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TestKind {
    GoodnessOfFit,
    Independence,
    FisherExact,
    McNemar,
    /// McNemar generalised to k×k paired tables (symmetry test)
    Bowker,
    OneSampleZ,
    OneSampleT,
    StudentT,
    WelchT,
    PairedT,
    ShapiroWilk,
    MannWhitney,
    SignedRank,
}

impl TestKind {
    /// Human-readable test name
    pub fn name(&self) -> &'static str {
        match self {
            TestKind::GoodnessOfFit => "Chi-square goodness-of-fit test",
            TestKind::Independence => "Chi-square test of independence",
            TestKind::FisherExact => "Fisher's exact test",
            TestKind::McNemar => "McNemar's test",
            TestKind::Bowker => "Bowker's test of symmetry",
            TestKind::OneSampleZ => "One-sample z-test",
            TestKind::OneSampleT => "One-sample t-test",
            TestKind::StudentT => "Student's independent samples t-test",
            TestKind::WelchT => "Welch's independent samples t-test",
            TestKind::PairedT => "Paired samples t-test",
            TestKind::ShapiroWilk => "Shapiro-Wilk normality test",
            TestKind::MannWhitney => "Wilcoxon rank sum test",
            TestKind::SignedRank => "Wilcoxon signed rank test",
        }
    }
}

impl fmt::Display for TestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Sidedness of the alternative hypothesis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alternative {
    #[default]
    TwoSided,
    /// True location exceeds the null value
    Greater,
    /// True location is below the null value
    Less,
}

/// Degrees of freedom of a statistic's reference distribution
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DegreesOfFreedom {
    Integer(u64),
    /// Welch–Satterthwaite df, never rounded
    Fractional(f64),
}

impl DegreesOfFreedom {
    pub fn value(&self) -> f64 {
        match *self {
            DegreesOfFreedom::Integer(v) => v as f64,
            DegreesOfFreedom::Fractional(v) => v,
        }
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, DegreesOfFreedom::Integer(_))
    }
}

impl fmt::Display for DegreesOfFreedom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DegreesOfFreedom::Integer(v) => write!(f, "{}", v),
            DegreesOfFreedom::Fractional(v) => write!(f, "{:.2}", v),
        }
    }
}

/// Confidence interval; one-sided intervals carry an infinite bound
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    #[serde(with = "extended_float")]
    pub lower: f64,
    #[serde(with = "extended_float")]
    pub upper: f64,
    pub level: f64,
}

impl ConfidenceInterval {
    pub fn contains(&self, value: f64) -> bool {
        self.lower <= value && value <= self.upper
    }

    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }
}

/// Standardized effect size measures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectSizeKind {
    CohensDPooled,
    CohensDUnequal,
    CohensDRaw,
    CohensDCorrected,
    /// Glass' Δ standardized by the first group
    GlassDeltaX,
    /// Glass' Δ standardized by the second group
    GlassDeltaY,
    CohensDOneSample,
    CohensDPaired,
    CramersV,
    OddsRatio,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EffectSize {
    pub kind: EffectSizeKind,
    /// Odds ratios are infinite when a discordant cell is empty
    #[serde(with = "extended_float")]
    pub value: f64,
}

/// Serde encoding that keeps infinities: finite values stay numbers,
/// ±∞ and NaN become the strings "inf", "-inf" and "nan"
mod extended_float {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_finite() {
            serializer.serialize_f64(*value)
        } else if value.is_nan() {
            serializer.serialize_str("nan")
        } else if *value > 0.0 {
            serializer.serialize_str("inf")
        } else {
            serializer.serialize_str("-inf")
        }
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Number(f64),
        Text(String),
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        match Repr::deserialize(deserializer)? {
            Repr::Number(v) => Ok(v),
            Repr::Text(text) => match text.as_str() {
                "inf" => Ok(f64::INFINITY),
                "-inf" => Ok(f64::NEG_INFINITY),
                "nan" => Ok(f64::NAN),
                other => Err(serde::de::Error::custom(format!(
                    "expected a number, \"inf\", \"-inf\" or \"nan\", got {:?}",
                    other
                ))),
            },
        }
    }
}

/// Non-fatal warnings about the reliability of an approximation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Advisory {
    /// Expected counts too small for the chi-square approximation
    LowExpectedCount {
        cells_below: usize,
        total_cells: usize,
        min_expected: f64,
        threshold: f64,
    },
    /// Tied values forced the normal approximation
    TiesPresent { tie_groups: usize },
    /// Zero differences were removed before ranking
    ZeroDifferencesDropped { count: usize },
    /// p-value computed from the normal approximation
    NormalApproximation { n: usize },
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Advisory::LowExpectedCount {
                cells_below,
                total_cells,
                min_expected,
                threshold,
            } => write!(
                f,
                "{} of {} expected counts below {} (minimum {:.2}); chi-square approximation may be unreliable",
                cells_below, total_cells, threshold, min_expected
            ),
            Advisory::TiesPresent { tie_groups } => write!(
                f,
                "{} group(s) of tied values; exact p-value unavailable",
                tie_groups
            ),
            Advisory::ZeroDifferencesDropped { count } => {
                write!(f, "{} zero difference(s) dropped before ranking", count)
            }
            Advisory::NormalApproximation { n } => {
                write!(f, "normal approximation used (n = {})", n)
            }
        }
    }
}

/// Outcome of a single hypothesis test
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestResult {
    kind: TestKind,
    statistic: Option<f64>,
    df: Option<DegreesOfFreedom>,
    p_value: f64,
    alternative: Alternative,
    estimate: Option<f64>,
    confidence_interval: Option<ConfidenceInterval>,
    effect_size: Option<EffectSize>,
    advisories: Vec<Advisory>,
}

impl TestResult {
    pub(crate) fn new(kind: TestKind, p_value: f64, alternative: Alternative) -> Self {
        Self {
            kind,
            statistic: None,
            df: None,
            p_value: p_value.clamp(0.0, 1.0),
            alternative,
            estimate: None,
            confidence_interval: None,
            effect_size: None,
            advisories: Vec::new(),
        }
    }

    pub(crate) fn with_statistic(mut self, statistic: f64) -> Self {
        self.statistic = Some(statistic);
        self
    }

    pub(crate) fn with_df(mut self, df: DegreesOfFreedom) -> Self {
        self.df = Some(df);
        self
    }

    pub(crate) fn with_estimate(mut self, estimate: f64) -> Self {
        self.estimate = Some(estimate);
        self
    }

    pub(crate) fn with_confidence_interval(mut self, ci: ConfidenceInterval) -> Self {
        self.confidence_interval = Some(ci);
        self
    }

    pub(crate) fn with_effect_size(mut self, effect: EffectSize) -> Self {
        self.effect_size = Some(effect);
        self
    }

    pub(crate) fn with_advisory(mut self, advisory: Advisory) -> Self {
        tracing::warn!(test = %self.kind, %advisory, "advisory attached");
        self.advisories.push(advisory);
        self
    }

    /// Emit the debug event every entry point logs on completion
    pub(crate) fn logged(self) -> Self {
        tracing::debug!(
            test = %self.kind,
            statistic = ?self.statistic,
            df = ?self.df.map(|d| d.value()),
            p_value = self.p_value,
            "test complete"
        );
        self
    }

    pub fn kind(&self) -> TestKind {
        self.kind
    }

    /// Test statistic; `None` for tests without one (Fisher's exact test)
    pub fn statistic(&self) -> Option<f64> {
        self.statistic
    }

    pub fn df(&self) -> Option<DegreesOfFreedom> {
        self.df
    }

    pub fn p_value(&self) -> f64 {
        self.p_value
    }

    pub fn alternative(&self) -> Alternative {
        self.alternative
    }

    /// Point estimate (mean, mean difference) where the test has one
    pub fn estimate(&self) -> Option<f64> {
        self.estimate
    }

    pub fn confidence_interval(&self) -> Option<ConfidenceInterval> {
        self.confidence_interval
    }

    pub fn effect_size(&self) -> Option<EffectSize> {
        self.effect_size
    }

    pub fn advisories(&self) -> &[Advisory] {
        &self.advisories
    }

    pub fn has_low_expected_count(&self) -> bool {
        self.advisories
            .iter()
            .any(|a| matches!(a, Advisory::LowExpectedCount { .. }))
    }

    /// p < alpha
    pub fn is_significant(&self, alpha: f64) -> bool {
        self.p_value < alpha
    }
}
