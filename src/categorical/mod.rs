//! Tests on categorical data
//!
//! - [`goodness_of_fit`]: one variable against a probability vector
//! - [`independence_test`]: two variables measured on different units
//! - [`fisher_exact`]: exact alternative for 2×2 tables with small counts
//! - [`mcnemar_test`] / [`bowker_test`]: one variable measured twice on the
//!   same units
//!
//! McNemar and Bowker accept only a [`PairedContingencyTable`]; independence
//! and Fisher accept only a [`ContingencyTable`]. A 2×2 table of paired
//! responses cannot reach the independence test by accident.

mod fisher;
mod goodness_of_fit;
mod independence;
mod mcnemar;
mod table;

#[cfg(test)]
mod tests;

pub use fisher::fisher_exact;
pub use goodness_of_fit::{goodness_of_fit, goodness_of_fit_counts, goodness_of_fit_uniform};
pub use independence::{independence_test, pearson_statistic};
pub use mcnemar::{bowker_test, mcnemar_test};
pub use table::{ContingencyTable, PairedContingencyTable};

use crate::result::Advisory;

/// Conventional lower bound for an expected count
pub const LOW_EXPECTED_THRESHOLD: f64 = 5.0;

/// Share of cells allowed below the threshold before the advisory fires
const LOW_EXPECTED_CELL_SHARE: f64 = 0.2;

/// Advisory when any expected count falls below `threshold`
fn any_below(expected: &[f64], threshold: f64) -> Option<Advisory> {
    let below = expected.iter().filter(|&&e| e < threshold).count();
    (below > 0).then(|| low_expected(expected, below, threshold))
}

/// Advisory when more than 20% of cells fall below `threshold`, or any below 1
fn share_below(expected: &[f64], threshold: f64) -> Option<Advisory> {
    let below = expected.iter().filter(|&&e| e < threshold).count();
    let any_under_one = expected.iter().any(|&e| e < 1.0);
    let share = below as f64 / expected.len() as f64;
    (share > LOW_EXPECTED_CELL_SHARE || any_under_one)
        .then(|| low_expected(expected, below, threshold))
}

fn low_expected(expected: &[f64], cells_below: usize, threshold: f64) -> Advisory {
    Advisory::LowExpectedCount {
        cells_below,
        total_cells: expected.len(),
        min_expected: expected.iter().copied().fold(f64::INFINITY, f64::min),
        threshold,
    }
}
