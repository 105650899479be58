// Relationships between the t-test variants
use super::*;
use crate::descriptive::{Sample, SummaryStats};
use crate::result::{Alternative, DegreesOfFreedom, TestKind};

#[test]
fn test_null_at_sample_mean_gives_zero_statistic() {
    let s = Sample::new(vec![3.1, 4.7, 2.2, 5.9, 4.4, 3.8]).unwrap();
    let mean = s.mean().unwrap();
    let r = one_sample_t_test(&s, mean, &TTestOptions::default()).unwrap();
    assert!(r.statistic().unwrap().abs() < 1e-12);
    assert!((r.p_value() - 1.0).abs() < 1e-12);
}

#[test]
fn test_student_equals_welch_with_equal_variances() {
    let x = SummaryStats::new(10.0, 3.0, 12).unwrap();
    let y = SummaryStats::new(8.0, 3.0, 20).unwrap();
    let opts = TTestOptions::default();
    let s = student_t_test_from_summary(&x, &y, &opts).unwrap();
    let w = welch_t_test_from_summary(&x, &y, &opts).unwrap();
    assert!((s.statistic().unwrap() - w.statistic().unwrap()).abs() < 1e-12);
}

#[test]
fn test_welch_df_approaches_student_df() {
    let x = SummaryStats::new(10.0, 3.0, 15).unwrap();
    let opts = TTestOptions::default();
    let mut previous_gap = f64::INFINITY;
    for sd in [6.0, 4.0, 3.5, 3.1, 3.01, 3.0] {
        let y = SummaryStats::new(8.0, sd, 15).unwrap();
        let df = welch_t_test_from_summary(&x, &y, &opts)
            .unwrap()
            .df()
            .unwrap()
            .value();
        let gap = (28.0 - df).abs();
        assert!(gap <= previous_gap);
        previous_gap = gap;
    }
    assert!(previous_gap < 1e-9);
}

#[test]
fn test_paired_equals_one_sample_on_differences() {
    let x = Sample::new(vec![12.0, 15.5, 9.0, 11.2, 14.1]).unwrap();
    let y = Sample::new(vec![10.0, 15.0, 9.5, 10.0, 12.0]).unwrap();
    let d = Sample::new(vec![2.0, 0.5, -0.5, 1.2, 2.1]).unwrap();
    let opts = TTestOptions::default();
    let paired = paired_t_test(&x, &y, &opts).unwrap();
    let one = one_sample_t_test(&d, 0.0, &opts).unwrap();
    assert!((paired.statistic().unwrap() - one.statistic().unwrap()).abs() < 1e-9);
    assert!((paired.p_value() - one.p_value()).abs() < 1e-9);
    assert_eq!(paired.df(), one.df());
    assert_eq!(paired.kind(), TestKind::PairedT);
    assert_eq!(one.kind(), TestKind::OneSampleT);
}

#[test]
fn test_one_sided_p_values_partition() {
    let x = SummaryStats::new(74.5, 9.0, 15).unwrap();
    let y = SummaryStats::new(69.1, 5.8, 18).unwrap();
    let greater = welch_t_test_from_summary(
        &x,
        &y,
        &TTestOptions::default().with_alternative(Alternative::Greater),
    )
    .unwrap();
    let less = welch_t_test_from_summary(
        &x,
        &y,
        &TTestOptions::default().with_alternative(Alternative::Less),
    )
    .unwrap();
    assert!((greater.p_value() + less.p_value() - 1.0).abs() < 1e-12);
    assert_eq!(greater.alternative(), Alternative::Greater);
}

#[test]
fn test_interval_excludes_zero_iff_significant() {
    let x = SummaryStats::new(74.5, 9.0, 15).unwrap();
    let y = SummaryStats::new(69.1, 5.8, 18).unwrap();
    let opts = TTestOptions::default();
    let student = student_t_test_from_summary(&x, &y, &opts).unwrap();
    let welch = welch_t_test_from_summary(&x, &y, &opts).unwrap();
    assert!(!student.confidence_interval().unwrap().contains(0.0));
    assert!(welch.confidence_interval().unwrap().contains(0.0));
}

#[test]
fn test_wider_interval_at_higher_level() {
    let s = SummaryStats::new(72.3, 9.52, 20).unwrap();
    let ninety = one_sample_t_test_from_summary(
        &s,
        67.5,
        &TTestOptions::default().with_confidence_level(0.90),
    )
    .unwrap();
    let ninety_nine = one_sample_t_test_from_summary(
        &s,
        67.5,
        &TTestOptions::default().with_confidence_level(0.99),
    )
    .unwrap();
    assert!(
        ninety_nine.confidence_interval().unwrap().width()
            > ninety.confidence_interval().unwrap().width()
    );
    assert_eq!(ninety.df(), Some(DegreesOfFreedom::Integer(19)));
}

#[test]
fn test_invalid_confidence_level_rejected() {
    let s = SummaryStats::new(1.0, 1.0, 10).unwrap();
    let opts = TTestOptions::default().with_confidence_level(1.5);
    assert!(one_sample_t_test_from_summary(&s, 0.0, &opts).is_err());
}
