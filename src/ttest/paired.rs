use super::one_sample::t_test_on_summary;
use crate::config::TTestOptions;
use crate::descriptive::Sample;
use crate::error::{Result, TestError};
use crate::result::{TestKind, TestResult};
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

/// Paired-samples t-test matching observations by position
///
/// Equivalent to a one-sample t-test of Dᵢ = xᵢ − yᵢ against zero. Sequences
/// of different length fail with `UnpairedData`.
///
/// # Example
/// ```
/// use contraste::config::TTestOptions;
/// use contraste::descriptive::Sample;
/// use contraste::ttest::paired_t_test;
///
/// let before = Sample::new(vec![55.0, 43.0, 60.0, 71.0, 49.0]).unwrap();
/// let after = Sample::new(vec![59.0, 45.0, 66.0, 72.0, 55.0]).unwrap();
/// let result = paired_t_test(&after, &before, &TTestOptions::default()).unwrap();
/// assert!((result.estimate().unwrap() - 3.8).abs() < 1e-12);
/// ```
pub fn paired_t_test(x: &Sample, y: &Sample, options: &TTestOptions) -> Result<TestResult> {
    let differences = x.differences(y)?;
    paired_t_test_from_differences(&differences, options)
}

/// Paired t-test over precomputed difference scores
pub fn paired_t_test_from_differences(
    differences: &Sample,
    options: &TTestOptions,
) -> Result<TestResult> {
    t_test_on_summary(TestKind::PairedT, &differences.summary()?, 0.0, options)
}

/// Paired t-test matching `(id, value)` records by identifier
///
/// Every id must occur exactly once on each side. Pairs are formed in the
/// order of `x`.
pub fn paired_t_test_by_id<K>(
    x: &[(K, f64)],
    y: &[(K, f64)],
    options: &TTestOptions,
) -> Result<TestResult>
where
    K: Eq + Hash + Debug,
{
    let (left, right) = align_by_id(x, y)?;
    paired_t_test(&left, &right, options)
}

fn align_by_id<K>(x: &[(K, f64)], y: &[(K, f64)]) -> Result<(Sample, Sample)>
where
    K: Eq + Hash + Debug,
{
    if x.len() != y.len() {
        return Err(TestError::UnpairedData(format!(
            "{} records on one side, {} on the other",
            x.len(),
            y.len()
        )));
    }
    let mut lookup: HashMap<&K, f64> = HashMap::with_capacity(y.len());
    for (id, value) in y {
        if lookup.insert(id, *value).is_some() {
            return Err(TestError::UnpairedData(format!("duplicate id {:?}", id)));
        }
    }

    let mut left = Vec::with_capacity(x.len());
    let mut right = Vec::with_capacity(x.len());
    for (id, value) in x {
        let matched = lookup
            .remove(id)
            .ok_or_else(|| TestError::UnpairedData(format!("id {:?} has no partner", id)))?;
        left.push(*value);
        right.push(matched);
    }
    Ok((Sample::new(left)?, Sample::new(right)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::DegreesOfFreedom;

    #[test]
    fn test_by_position_equals_differences() {
        let x = Sample::new(vec![5.1, 6.3, 7.7, 4.2, 6.9, 5.5]).unwrap();
        let y = Sample::new(vec![4.8, 6.0, 7.0, 4.6, 6.1, 5.0]).unwrap();
        let d = Sample::new(vec![0.3, 0.3, 0.7, -0.4, 0.8, 0.5]).unwrap();
        let opts = TTestOptions::default();
        let a = paired_t_test(&x, &y, &opts).unwrap();
        let b = paired_t_test_from_differences(&d, &opts).unwrap();
        assert!((a.statistic().unwrap() - b.statistic().unwrap()).abs() < 1e-9);
        assert!((a.p_value() - b.p_value()).abs() < 1e-9);
        assert_eq!(a.df(), Some(DegreesOfFreedom::Integer(5)));
        assert_eq!(a.kind(), TestKind::PairedT);
    }

    #[test]
    fn test_length_mismatch() {
        let x = Sample::new(vec![1.0, 2.0, 3.0]).unwrap();
        let y = Sample::new(vec![1.0, 2.0]).unwrap();
        assert!(matches!(
            paired_t_test(&x, &y, &TTestOptions::default()),
            Err(TestError::UnpairedData(_))
        ));
    }

    #[test]
    fn test_by_id_ignores_record_order() {
        let x = [("ann", 10.0), ("bob", 12.0), ("cy", 9.0), ("dee", 14.0)];
        let y = [("cy", 8.0), ("ann", 7.5), ("dee", 13.0), ("bob", 11.0)];
        let by_id = paired_t_test_by_id(&x, &y, &TTestOptions::default()).unwrap();
        let xs = Sample::new(vec![10.0, 12.0, 9.0, 14.0]).unwrap();
        let ys = Sample::new(vec![7.5, 11.0, 8.0, 13.0]).unwrap();
        let by_pos = paired_t_test(&xs, &ys, &TTestOptions::default()).unwrap();
        assert_eq!(by_id, by_pos);
    }

    #[test]
    fn test_by_id_rejects_unmatched_and_duplicates() {
        let x = [(1, 1.0), (2, 2.0)];
        let missing = [(1, 1.5), (3, 2.5)];
        let dup = [(1, 1.5), (1, 2.5)];
        let opts = TTestOptions::default();
        assert!(matches!(
            paired_t_test_by_id(&x, &missing, &opts),
            Err(TestError::UnpairedData(_))
        ));
        assert!(matches!(
            paired_t_test_by_id(&x, &dup, &opts),
            Err(TestError::UnpairedData(_))
        ));
        assert!(matches!(
            paired_t_test_by_id(&x, &[(1, 1.0)], &opts),
            Err(TestError::UnpairedData(_))
        ));
    }
}
