// Per-call policies for the hypothesis tests
//
// Nothing here is global: every test takes its options value as an explicit
// argument. AnalysisConfig bundles a full set of defaults so a caller can
// keep one policy (optionally loaded from TOML) and hand out the pieces.

use crate::error::{Result, TestError};
use crate::result::Alternative;
use serde::{Deserialize, Serialize};

/// Options shared by the t/z tests
///
/// # Example
/// ```
/// use contraste::config::TTestOptions;
/// use contraste::result::Alternative;
///
/// let opts = TTestOptions::default().with_alternative(Alternative::Greater);
/// assert_eq!(opts.confidence_level, 0.95);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TTestOptions {
    pub alternative: Alternative,
    /// Confidence level for the interval, in (0, 1)
    pub confidence_level: f64,
}

impl Default for TTestOptions {
    fn default() -> Self {
        Self {
            alternative: Alternative::TwoSided,
            confidence_level: 0.95,
        }
    }
}

impl TTestOptions {
    pub fn with_alternative(mut self, alternative: Alternative) -> Self {
        self.alternative = alternative;
        self
    }

    pub fn with_confidence_level(mut self, level: f64) -> Self {
        self.confidence_level = level;
        self
    }

    pub fn validate(&self) -> Result<()> {
        validate_confidence_level(self.confidence_level)
    }
}

/// Options for the chi-square test of independence
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndependenceOptions {
    /// Apply Yates' continuity correction when df = 1
    pub yates_correction: bool,
    /// Expected counts below this value trigger the low-count advisory
    pub low_expected_threshold: f64,
}

impl Default for IndependenceOptions {
    fn default() -> Self {
        Self {
            yates_correction: true,
            low_expected_threshold: 5.0,
        }
    }
}

impl IndependenceOptions {
    pub fn without_correction(mut self) -> Self {
        self.yates_correction = false;
        self
    }

    pub fn validate(&self) -> Result<()> {
        validate_threshold(self.low_expected_threshold)
    }
}

/// Options for Fisher's exact test
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FisherOptions {
    pub alternative: Alternative,
    /// Maximum number of margin-constrained tables to enumerate
    pub max_tables: u64,
}

impl Default for FisherOptions {
    fn default() -> Self {
        Self {
            alternative: Alternative::TwoSided,
            max_tables: 1_000_000,
        }
    }
}

impl FisherOptions {
    pub fn validate(&self) -> Result<()> {
        if self.max_tables == 0 {
            return Err(TestError::InvalidInput(
                "max_tables must be >= 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Continuity correction subtracted from |b − c| in McNemar's statistic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum McNemarCorrection {
    /// (|b − c| − 0.5)²
    #[default]
    Yates,
    /// (|b − c| − 1)², the convention of R's `mcnemar.test`
    Edwards,
    /// (b − c)²
    None,
}

impl McNemarCorrection {
    pub fn amount(&self) -> f64 {
        match self {
            McNemarCorrection::Yates => 0.5,
            McNemarCorrection::Edwards => 1.0,
            McNemarCorrection::None => 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct McNemarOptions {
    pub correction: McNemarCorrection,
}

/// Largest `exact_threshold` accepted; the exact rank-sum table grows
/// roughly with the cube of the group size
pub const MAX_EXACT_RANK_THRESHOLD: usize = 100;

/// Options for the Wilcoxon rank tests
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankTestOptions {
    pub alternative: Alternative,
    /// Exact null distribution is used while the sample size stays below this
    pub exact_threshold: usize,
    /// Continuity correction in the normal approximation
    pub continuity_correction: bool,
}

impl Default for RankTestOptions {
    fn default() -> Self {
        Self {
            alternative: Alternative::TwoSided,
            exact_threshold: 50,
            continuity_correction: true,
        }
    }
}

impl RankTestOptions {
    pub fn with_alternative(mut self, alternative: Alternative) -> Self {
        self.alternative = alternative;
        self
    }

    /// Always use the normal approximation
    pub fn approximate(mut self) -> Self {
        self.exact_threshold = 0;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.exact_threshold > MAX_EXACT_RANK_THRESHOLD {
            return Err(TestError::ComputationTooLarge {
                required: self.exact_threshold as u64,
                limit: MAX_EXACT_RANK_THRESHOLD as u64,
            });
        }
        Ok(())
    }
}

/// Complete set of per-call policies
///
/// # Example
/// ```
/// use contraste::config::AnalysisConfig;
///
/// let config = AnalysisConfig::from_toml_str(r#"
///     [ttest]
///     alternative = "greater"
///     confidence_level = 0.99
/// "#).unwrap();
/// assert_eq!(config.ttest.confidence_level, 0.99);
/// assert!(config.independence.yates_correction); // untouched default
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Significance level used by callers that need a yes/no decision
    pub significance_level: f64,
    pub ttest: TTestOptions,
    pub independence: IndependenceOptions,
    pub fisher: FisherOptions,
    pub mcnemar: McNemarOptions,
    pub rank: RankTestOptions,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self::standard()
    }
}

impl AnalysisConfig {
    /// Stricter policy: 99% intervals, alpha 0.01, smaller enumeration budget
    pub fn strict() -> Self {
        Self {
            ttest: TTestOptions::default().with_confidence_level(0.99),
            fisher: FisherOptions {
                max_tables: 100_000,
                ..FisherOptions::default()
            },
            mcnemar: McNemarOptions {
                correction: McNemarCorrection::Edwards,
            },
            significance_level: 0.01,
            ..Self::standard()
        }
    }

    /// Looser policy: 90% intervals, alpha 0.10, no Yates correction
    pub fn permissive() -> Self {
        Self {
            ttest: TTestOptions::default().with_confidence_level(0.90),
            independence: IndependenceOptions::default().without_correction(),
            significance_level: 0.10,
            ..Self::standard()
        }
    }

    /// Conventional defaults (alpha 0.05, 95% intervals)
    pub fn standard() -> Self {
        Self {
            significance_level: 0.05,
            ttest: TTestOptions::default(),
            independence: IndependenceOptions::default(),
            fisher: FisherOptions::default(),
            mcnemar: McNemarOptions::default(),
            rank: RankTestOptions::default(),
        }
    }

    /// Parse a TOML policy; missing sections keep their defaults
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let config: AnalysisConfig = toml::from_str(input)
            .map_err(|e| TestError::InvalidInput(format!("invalid analysis config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self)
            .map_err(|e| TestError::InvalidInput(format!("cannot serialize config: {}", e)))
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.significance_level > 0.0 && self.significance_level < 1.0) {
            return Err(TestError::InvalidInput(format!(
                "significance_level must be in (0, 1), got {}",
                self.significance_level
            )));
        }
        self.ttest.validate()?;
        self.independence.validate()?;
        self.fisher.validate()?;
        self.rank.validate()?;
        Ok(())
    }
}

pub(crate) fn validate_confidence_level(level: f64) -> Result<()> {
    if !(level > 0.0 && level < 1.0) {
        return Err(TestError::InvalidInput(format!(
            "confidence_level must be in (0, 1), got {}",
            level
        )));
    }
    Ok(())
}

fn validate_threshold(threshold: f64) -> Result<()> {
    if !(threshold.is_finite() && threshold >= 0.0) {
        return Err(TestError::InvalidInput(format!(
            "low_expected_threshold must be non-negative, got {}",
            threshold
        )));
    }
    Ok(())
}
