//! Wilcoxon rank tests
//!
//! - [`mann_whitney`]: two independent samples (rank-sum W)
//! - [`signed_rank_test`] / [`paired_signed_rank_test`]: one sample or
//!   paired differences (signed-rank V)
//!
//! Small tie-free samples use the exact null distributions
//! ([`RankSumDistribution`], [`SignedRankDistribution`]). Larger samples, or
//! samples with ties, fall back to a normal approximation and say so in
//! the result's advisories.

mod distribution;
mod mann_whitney;
mod ranking;
mod signed_rank;

pub use distribution::{RankSumDistribution, SignedRankDistribution};
pub use mann_whitney::mann_whitney;
pub use ranking::{rank, Ranking};
pub use signed_rank::{paired_signed_rank_test, signed_rank_test};

use crate::config::RankTestOptions;
use crate::distribution::special::{standard_normal_cdf, standard_normal_sf};
use crate::result::Alternative;

/// Whether the exact distribution applies for this sample size
fn use_exact(size: usize, has_ties: bool, options: &RankTestOptions) -> bool {
    size < options.exact_threshold && !has_ties
}

/// Normal-approximation p-value for a centred statistic `deviation` with
/// standard deviation `sigma`
fn normal_p_value(deviation: f64, sigma: f64, options: &RankTestOptions) -> f64 {
    let correction = if options.continuity_correction {
        match options.alternative {
            Alternative::Greater => 0.5,
            Alternative::Less => -0.5,
            Alternative::TwoSided if deviation > 0.0 => 0.5,
            Alternative::TwoSided if deviation < 0.0 => -0.5,
            Alternative::TwoSided => 0.0,
        }
    } else {
        0.0
    };
    let z = (deviation - correction) / sigma;
    match options.alternative {
        Alternative::Greater => standard_normal_sf(z),
        Alternative::Less => standard_normal_cdf(z),
        Alternative::TwoSided => {
            (2.0 * standard_normal_cdf(z).min(standard_normal_sf(z))).min(1.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_threshold() {
        let opts = RankTestOptions::default();
        assert!(use_exact(49, false, &opts));
        assert!(!use_exact(50, false, &opts));
        assert!(!use_exact(10, true, &opts));
        assert!(!use_exact(10, false, &opts.approximate()));
    }

    #[test]
    fn test_zero_deviation_is_not_significant() {
        let opts = RankTestOptions::default();
        assert!((normal_p_value(0.0, 3.0, &opts) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_continuity_correction_toggle() {
        let with = RankTestOptions::default();
        let without = RankTestOptions {
            continuity_correction: false,
            ..RankTestOptions::default()
        };
        assert!(normal_p_value(-9.5, 4.787, &with) > normal_p_value(-9.5, 4.787, &without));
    }
}
