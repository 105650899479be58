// Cross-cutting categorical scenarios
use super::*;
use crate::config::{FisherOptions, IndependenceOptions, McNemarOptions};
use crate::error::TestError;
use crate::result::{Advisory, DegreesOfFreedom, EffectSizeKind, TestKind};

fn chapek() -> ContingencyTable {
    ContingencyTable::new(vec![vec![13, 15], vec![30, 13], vec![44, 65]]).unwrap()
}

#[test]
fn test_chapek_independence() {
    let r = independence_test(&chapek(), &IndependenceOptions::default()).unwrap();
    assert_eq!(r.kind(), TestKind::Independence);
    assert!((r.statistic().unwrap() - 10.7216).abs() < 1e-4);
    assert_eq!(r.df(), Some(DegreesOfFreedom::Integer(2)));
    assert!((r.p_value() - 0.004_697).abs() < 1e-6);
    let v = r.effect_size().unwrap();
    assert_eq!(v.kind, EffectSizeKind::CramersV);
    assert!((v.value - 0.244_058).abs() < 1e-6);
    assert!(r.advisories().is_empty());
}

#[test]
fn test_salem_yates_and_advisory() {
    let table = ContingencyTable::new(vec![vec![3, 3], vec![10, 0]]).unwrap();
    let r = independence_test(&table, &IndependenceOptions::default()).unwrap();
    assert!((r.statistic().unwrap() - 3.3094).abs() < 1e-4);
    assert!((r.p_value() - 0.068_88).abs() < 1e-4);
    // Expected counts 4.875, 1.125, 8.125, 1.875: half the cells are below 5
    assert!(r.has_low_expected_count());
    match &r.advisories()[0] {
        Advisory::LowExpectedCount {
            cells_below,
            min_expected,
            ..
        } => {
            assert_eq!(*cells_below, 3);
            assert!((min_expected - 1.125).abs() < 1e-12);
        }
        other => panic!("unexpected advisory {:?}", other),
    }
}

#[test]
fn test_salem_fisher_is_significant_where_chi_square_is_not() {
    let table = ContingencyTable::new(vec![vec![3, 3], vec![10, 0]]).unwrap();
    let chi = independence_test(&table, &IndependenceOptions::default()).unwrap();
    let exact = fisher_exact(&table, &FisherOptions::default()).unwrap();
    assert!(!chi.is_significant(0.05));
    assert!(exact.is_significant(0.05));
}

#[test]
fn test_independence_invariant_under_permutation() {
    let base = pearson_statistic(&chapek()).unwrap();
    let permuted = chapek()
        .permute_rows(&[1, 2, 0])
        .and_then(|t| t.permute_cols(&[1, 0]))
        .unwrap();
    let moved = pearson_statistic(&permuted).unwrap();
    assert!((base - moved).abs() < 1e-10);
}

#[test]
fn test_independence_invariant_under_transpose() {
    let base = independence_test(&chapek(), &IndependenceOptions::default()).unwrap();
    let flipped =
        independence_test(&chapek().transpose(), &IndependenceOptions::default()).unwrap();
    assert!((base.statistic().unwrap() - flipped.statistic().unwrap()).abs() < 1e-10);
    assert_eq!(base.df(), flipped.df());
}

#[test]
fn test_mcnemar_ignores_diagonal() {
    let opts = McNemarOptions::default();
    let r1 = mcnemar_test(&PairedContingencyTable::from_2x2(10, 5, 25, 60), &opts).unwrap();
    let r2 = mcnemar_test(&PairedContingencyTable::from_2x2(60, 5, 25, 10), &opts).unwrap();
    let r3 = mcnemar_test(&PairedContingencyTable::from_2x2(0, 5, 25, 1000), &opts).unwrap();
    assert_eq!(r1.statistic(), r2.statistic());
    assert_eq!(r1.statistic(), r3.statistic());
}

#[test]
fn test_paired_table_from_raw_responses() {
    // 100 people asked before and after an advert
    let mut pairs = Vec::new();
    pairs.extend(std::iter::repeat(("yes", "yes")).take(10));
    pairs.extend(std::iter::repeat(("yes", "no")).take(5));
    pairs.extend(std::iter::repeat(("no", "yes")).take(25));
    pairs.extend(std::iter::repeat(("no", "no")).take(60));
    let table = PairedContingencyTable::from_pairs(pairs).unwrap();
    let r = mcnemar_test(&table, &McNemarOptions::default()).unwrap();
    assert!((r.statistic().unwrap() - 12.675).abs() < 1e-9);
}

#[test]
fn test_card_choice_symmetry() {
    let table = PairedContingencyTable::new(vec![
        vec![10, 5, 3, 2],
        vec![4, 12, 6, 1],
        vec![7, 2, 9, 5],
        vec![3, 8, 4, 11],
    ])
    .unwrap();
    let r = bowker_test(&table).unwrap();
    assert_eq!(r.df(), Some(DegreesOfFreedom::Integer(6)));
    assert!(r.statistic().unwrap() > 0.0);
    assert!(r.p_value() > 0.0 && r.p_value() <= 1.0);
}

#[test]
fn test_goodness_of_fit_exact_match() {
    let r = goodness_of_fit_uniform(&[25, 25, 25, 25]).unwrap();
    assert_eq!(r.statistic(), Some(0.0));
    assert!((r.p_value() - 1.0).abs() < 1e-12);
}

#[test]
fn test_fisher_rejects_empty_table() {
    let table = ContingencyTable::new(vec![vec![0, 0], vec![0, 0]]).unwrap();
    assert!(matches!(
        fisher_exact(&table, &FisherOptions::default()),
        Err(TestError::InvalidInput(_))
    ));
}
