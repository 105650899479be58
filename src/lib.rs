//! Contraste - classical hypothesis tests in pure Rust
//!
//! This library provides the statistical core for comparing categorical and
//! continuous data: chi-square goodness-of-fit and independence tests,
//! Fisher's exact test, McNemar's and Bowker's tests, one-sample, Student,
//! Welch and paired t-tests, Cohen's d effect sizes, the Shapiro-Wilk
//! normality test and the Wilcoxon rank tests.
//!
//! Every test is a pure function over immutable inputs with its policy
//! passed explicitly, and returns a [`TestResult`].
//!
//! ```
//! use contraste::config::TTestOptions;
//! use contraste::descriptive::Sample;
//! use contraste::ttest::welch_t_test;
//!
//! let control = Sample::new(vec![5.2, 4.8, 6.1, 5.5, 4.9, 5.0]).unwrap();
//! let treated = Sample::new(vec![6.3, 6.9, 5.8, 7.2, 6.4, 6.6]).unwrap();
//! let result = welch_t_test(&treated, &control, &TTestOptions::default()).unwrap();
//! assert!(result.is_significant(0.05));
//! ```

pub mod categorical;
pub mod config;
pub mod descriptive;
pub mod dispatch;
pub mod distribution;
pub mod effect_size;
pub mod error;
pub mod normality;
pub mod null_model;
pub mod rank;
pub mod report;
pub mod result;
pub mod ttest;

pub use config::AnalysisConfig;
pub use descriptive::{Sample, SummaryStats};
pub use dispatch::TestRequest;
pub use error::{Result, TestError};
pub use null_model::NullModel;
pub use result::{Alternative, TestKind, TestResult};
