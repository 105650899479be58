//! Thin dispatcher over the named tests
//!
//! A [`TestRequest`] names exactly one test together with its borrowed
//! inputs and options. [`TestRequest::run`] forwards to that test's function
//! and nothing else: no variant looks at the data to pick a procedure, so a
//! 2×2 table only reaches McNemar's test through [`TestRequest::McNemar`].
//!
//! Useful when a batch of heterogeneous requests is built up front and run
//! later, e.g. from an [`AnalysisConfig`](crate::config::AnalysisConfig).

use crate::categorical::{
    bowker_test, fisher_exact, goodness_of_fit, independence_test, mcnemar_test,
    ContingencyTable, PairedContingencyTable,
};
use crate::config::{
    FisherOptions, IndependenceOptions, McNemarOptions, RankTestOptions, TTestOptions,
};
use crate::descriptive::Sample;
use crate::error::Result;
use crate::normality::shapiro_wilk;
use crate::null_model::NullModel;
use crate::rank::{mann_whitney, paired_signed_rank_test, signed_rank_test};
use crate::result::{TestKind, TestResult};
use crate::ttest::{
    one_sample_t_test, one_sample_z_test, paired_t_test, student_t_test, welch_t_test,
};

/// One fully specified hypothesis test
#[derive(Debug, Clone, Copy)]
pub enum TestRequest<'a> {
    GoodnessOfFit {
        observed: &'a [u64],
        null: &'a NullModel,
    },
    Independence {
        table: &'a ContingencyTable,
        options: IndependenceOptions,
    },
    FisherExact {
        table: &'a ContingencyTable,
        options: FisherOptions,
    },
    McNemar {
        table: &'a PairedContingencyTable,
        options: McNemarOptions,
    },
    Bowker {
        table: &'a PairedContingencyTable,
    },
    OneSampleT {
        sample: &'a Sample,
        mu: f64,
        options: TTestOptions,
    },
    OneSampleZ {
        sample: &'a Sample,
        mu: f64,
        sigma: f64,
        options: TTestOptions,
    },
    StudentT {
        x: &'a Sample,
        y: &'a Sample,
        options: TTestOptions,
    },
    WelchT {
        x: &'a Sample,
        y: &'a Sample,
        options: TTestOptions,
    },
    PairedT {
        x: &'a Sample,
        y: &'a Sample,
        options: TTestOptions,
    },
    ShapiroWilk {
        sample: &'a Sample,
    },
    MannWhitney {
        x: &'a Sample,
        y: &'a Sample,
        options: RankTestOptions,
    },
    SignedRank {
        sample: &'a Sample,
        mu: f64,
        options: RankTestOptions,
    },
    PairedSignedRank {
        x: &'a Sample,
        y: &'a Sample,
        options: RankTestOptions,
    },
}

impl TestRequest<'_> {
    /// The test this request will run; always equals `run()?.kind()`
    pub fn kind(&self) -> TestKind {
        match self {
            TestRequest::GoodnessOfFit { .. } => TestKind::GoodnessOfFit,
            TestRequest::Independence { .. } => TestKind::Independence,
            TestRequest::FisherExact { .. } => TestKind::FisherExact,
            TestRequest::McNemar { .. } => TestKind::McNemar,
            TestRequest::Bowker { .. } => TestKind::Bowker,
            TestRequest::OneSampleT { .. } => TestKind::OneSampleT,
            TestRequest::OneSampleZ { .. } => TestKind::OneSampleZ,
            TestRequest::StudentT { .. } => TestKind::StudentT,
            TestRequest::WelchT { .. } => TestKind::WelchT,
            TestRequest::PairedT { .. } => TestKind::PairedT,
            TestRequest::ShapiroWilk { .. } => TestKind::ShapiroWilk,
            TestRequest::MannWhitney { .. } => TestKind::MannWhitney,
            TestRequest::SignedRank { .. } | TestRequest::PairedSignedRank { .. } => {
                TestKind::SignedRank
            }
        }
    }

    pub fn run(&self) -> Result<TestResult> {
        tracing::debug!(test = %self.kind(), "dispatching");
        match *self {
            TestRequest::GoodnessOfFit { observed, null } => goodness_of_fit(observed, null),
            TestRequest::Independence { table, options } => independence_test(table, &options),
            TestRequest::FisherExact { table, options } => fisher_exact(table, &options),
            TestRequest::McNemar { table, options } => mcnemar_test(table, &options),
            TestRequest::Bowker { table } => bowker_test(table),
            TestRequest::OneSampleT {
                sample,
                mu,
                options,
            } => one_sample_t_test(sample, mu, &options),
            TestRequest::OneSampleZ {
                sample,
                mu,
                sigma,
                options,
            } => one_sample_z_test(sample, mu, sigma, &options),
            TestRequest::StudentT { x, y, options } => student_t_test(x, y, &options),
            TestRequest::WelchT { x, y, options } => welch_t_test(x, y, &options),
            TestRequest::PairedT { x, y, options } => paired_t_test(x, y, &options),
            TestRequest::ShapiroWilk { sample } => shapiro_wilk(sample),
            TestRequest::MannWhitney { x, y, options } => mann_whitney(x, y, &options),
            TestRequest::SignedRank {
                sample,
                mu,
                options,
            } => signed_rank_test(sample, mu, &options),
            TestRequest::PairedSignedRank { x, y, options } => {
                paired_signed_rank_test(x, y, &options)
            }
        }
    }
}

/// Run every request in order, keeping each outcome
pub fn run_all(requests: &[TestRequest<'_>]) -> Vec<Result<TestResult>> {
    requests.iter().map(TestRequest::run).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnalysisConfig;

    fn groups() -> (Sample, Sample) {
        (
            Sample::new(vec![6.4, 10.7, 11.9, 7.3, 10.0]).unwrap(),
            Sample::new(vec![14.5, 10.4, 12.9, 11.7, 13.0]).unwrap(),
        )
    }

    #[test]
    fn test_same_table_different_questions() {
        let config = AnalysisConfig::standard();
        let paired = PairedContingencyTable::from_2x2(794, 86, 150, 570);
        let crossed = paired.clone().into_cross_tabulation();
        let mcnemar = TestRequest::McNemar {
            table: &paired,
            options: config.mcnemar,
        };
        let independence = TestRequest::Independence {
            table: &crossed,
            options: config.independence,
        };
        let a = mcnemar.run().unwrap();
        let b = independence.run().unwrap();
        assert_eq!(a.kind(), TestKind::McNemar);
        assert_eq!(b.kind(), TestKind::Independence);
        assert_ne!(a.statistic(), b.statistic());
    }

    #[test]
    fn test_kind_matches_result() {
        let (x, y) = groups();
        let opts = TTestOptions::default();
        let rank = RankTestOptions::default();
        let requests = [
            TestRequest::StudentT {
                x: &x,
                y: &y,
                options: opts,
            },
            TestRequest::WelchT {
                x: &x,
                y: &y,
                options: opts,
            },
            TestRequest::PairedT {
                x: &x,
                y: &y,
                options: opts,
            },
            TestRequest::OneSampleT {
                sample: &x,
                mu: 9.0,
                options: opts,
            },
            TestRequest::OneSampleZ {
                sample: &x,
                mu: 9.0,
                sigma: 2.0,
                options: opts,
            },
            TestRequest::ShapiroWilk { sample: &x },
            TestRequest::MannWhitney {
                x: &x,
                y: &y,
                options: rank,
            },
            TestRequest::SignedRank {
                sample: &x,
                mu: 9.0,
                options: rank,
            },
            TestRequest::PairedSignedRank {
                x: &x,
                y: &y,
                options: rank,
            },
        ];
        for request in &requests {
            let result = request.run().unwrap();
            assert_eq!(result.kind(), request.kind());
        }
    }

    #[test]
    fn test_run_all_keeps_errors() {
        let (x, _) = groups();
        let short = Sample::new(vec![1.0]).unwrap();
        let null = NullModel::uniform(3).unwrap();
        let observed = [10, 12, 8];
        let results = run_all(&[
            TestRequest::GoodnessOfFit {
                observed: &observed,
                null: &null,
            },
            TestRequest::ShapiroWilk { sample: &short },
            TestRequest::ShapiroWilk { sample: &x },
        ]);
        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
        assert!(results[2].is_ok());
    }

    #[test]
    fn test_matches_direct_call() {
        let (x, y) = groups();
        let opts = TTestOptions::default();
        let via_dispatch = TestRequest::WelchT {
            x: &x,
            y: &y,
            options: opts,
        }
        .run()
        .unwrap();
        assert_eq!(via_dispatch, welch_t_test(&x, &y, &opts).unwrap());
    }
}
