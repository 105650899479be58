// Exact null distributions of the Wilcoxon statistics
//
// Both are built once per call by dynamic programming over rank subsets.
// Counts are held as f64: they overflow u64 well inside the exact-test
// range, and only their ratios are ever used.

use crate::distribution::Distribution;
use crate::error::{ensure_probability, Result, TestError};

/// Null distribution of the Mann-Whitney W for group sizes m and n
///
/// W counts the (x, y) pairs with x > y; it ranges over 0..=m·n.
#[derive(Debug, Clone, PartialEq)]
pub struct RankSumDistribution {
    m: usize,
    n: usize,
    counts: Vec<f64>,
    total: f64,
}

impl RankSumDistribution {
    pub fn new(m: usize, n: usize) -> Result<Self> {
        if m == 0 || n == 0 {
            return Err(TestError::Domain(format!(
                "rank-sum distribution needs two non-empty groups, got {} and {}",
                m, n
            )));
        }
        let counts = rank_sum_counts(m, n);
        let total = counts.iter().sum();
        Ok(Self {
            m,
            n,
            counts,
            total,
        })
    }

    pub fn sizes(&self) -> (usize, usize) {
        (self.m, self.n)
    }

    /// Largest attainable W (m·n)
    pub fn max(&self) -> usize {
        self.m * self.n
    }

    /// Number of group assignments producing each W, indexed by W
    pub fn counts(&self) -> &[f64] {
        &self.counts
    }

    pub fn pmf(&self, w: usize) -> f64 {
        self.counts.get(w).map_or(0.0, |c| c / self.total)
    }

    /// P(W >= w), the upper p-value of an observed W
    pub fn upper_tail_inclusive(&self, w: f64) -> f64 {
        at_least(&self.counts, self.total, w)
    }
}

impl Distribution for RankSumDistribution {
    /// P(W <= w)
    fn cdf(&self, w: f64) -> f64 {
        lower_tail(&self.counts, self.total, w)
    }

    /// P(W > w)
    fn sf(&self, w: f64) -> f64 {
        greater_than(&self.counts, self.total, w)
    }

    fn quantile(&self, p: f64) -> Result<f64> {
        ensure_probability(p)?;
        Ok(discrete_quantile(&self.counts, self.total, p))
    }
}

/// Null distribution of the signed-rank V for n non-zero differences
///
/// V sums the ranks of the positive differences; it ranges over 0..=n(n+1)/2.
#[derive(Debug, Clone, PartialEq)]
pub struct SignedRankDistribution {
    n: usize,
    counts: Vec<f64>,
    total: f64,
}

impl SignedRankDistribution {
    pub fn new(n: usize) -> Result<Self> {
        if n == 0 {
            return Err(TestError::Domain(
                "signed-rank distribution needs at least one difference".to_string(),
            ));
        }
        let max = n * (n + 1) / 2;
        let mut counts = vec![0.0; max + 1];
        counts[0] = 1.0;
        for r in 1..=n {
            for s in (r..=max).rev() {
                counts[s] += counts[s - r];
            }
        }
        let total = counts.iter().sum();
        Ok(Self { n, counts, total })
    }

    pub fn n(&self) -> usize {
        self.n
    }

    /// Largest attainable V (n(n+1)/2)
    pub fn max(&self) -> usize {
        self.counts.len() - 1
    }

    pub fn counts(&self) -> &[f64] {
        &self.counts
    }

    pub fn pmf(&self, v: usize) -> f64 {
        self.counts.get(v).map_or(0.0, |c| c / self.total)
    }

    /// P(V >= v), the upper p-value of an observed V
    pub fn upper_tail_inclusive(&self, v: f64) -> f64 {
        at_least(&self.counts, self.total, v)
    }
}

impl Distribution for SignedRankDistribution {
    /// P(V <= v)
    fn cdf(&self, v: f64) -> f64 {
        lower_tail(&self.counts, self.total, v)
    }

    /// P(V > v)
    fn sf(&self, v: f64) -> f64 {
        greater_than(&self.counts, self.total, v)
    }

    fn quantile(&self, p: f64) -> Result<f64> {
        ensure_probability(p)?;
        Ok(discrete_quantile(&self.counts, self.total, p))
    }
}

/// Ways to pick m of the ranks 1..=m+n, indexed by W = rank sum − m(m+1)/2
fn rank_sum_counts(m: usize, n: usize) -> Vec<f64> {
    let big_n = m + n;
    let max_sum: usize = (n + 1..=big_n).sum();
    // ways[j][s]: subsets of size j of the ranks seen so far with sum s
    let mut ways = vec![vec![0.0f64; max_sum + 1]; m + 1];
    ways[0][0] = 1.0;
    for r in 1..=big_n {
        for j in (1..=m.min(r)).rev() {
            let (head, tail) = ways.split_at_mut(j);
            let prev = &head[j - 1];
            let row = &mut tail[0];
            for s in (r..=max_sum).rev() {
                row[s] += prev[s - r];
            }
        }
    }
    let base = m * (m + 1) / 2;
    ways.swap_remove(m)[base..=base + m * n].to_vec()
}

fn lower_tail(counts: &[f64], total: f64, x: f64) -> f64 {
    if x < 0.0 {
        return 0.0;
    }
    let k = x.floor() as usize;
    let upto = k.min(counts.len() - 1);
    (counts[..=upto].iter().sum::<f64>() / total).min(1.0)
}

fn at_least(counts: &[f64], total: f64, x: f64) -> f64 {
    let k = x.ceil().max(0.0) as usize;
    tail_from(counts, total, k)
}

fn greater_than(counts: &[f64], total: f64, x: f64) -> f64 {
    if x < 0.0 {
        return 1.0;
    }
    tail_from(counts, total, x.floor() as usize + 1)
}

fn tail_from(counts: &[f64], total: f64, k: usize) -> f64 {
    if k >= counts.len() {
        return 0.0;
    }
    (counts[k..].iter().sum::<f64>() / total).min(1.0)
}

fn discrete_quantile(counts: &[f64], total: f64, p: f64) -> f64 {
    let mut cumulative = 0.0;
    for (k, c) in counts.iter().enumerate() {
        cumulative += c / total;
        if cumulative >= p * (1.0 - 64.0 * f64::EPSILON) {
            return k as f64;
        }
    }
    (counts.len() - 1) as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_sum_counts_small() {
        let d = RankSumDistribution::new(3, 4).unwrap();
        assert_eq!(
            d.counts(),
            &[1.0, 1.0, 2.0, 3.0, 4.0, 4.0, 5.0, 4.0, 4.0, 3.0, 2.0, 1.0, 1.0]
        );
        assert_eq!(d.max(), 12);
    }

    #[test]
    fn test_rank_sum_total_is_binomial() {
        let d = RankSumDistribution::new(5, 5).unwrap();
        assert_eq!(d.counts().iter().sum::<f64>(), 252.0);
        assert!((d.cdf(0.0) - 1.0 / 252.0).abs() < 1e-15);
        assert_eq!(d.upper_tail_inclusive(0.0), 1.0);
        assert_eq!(d.upper_tail_inclusive(26.0), 0.0);
        assert_eq!(d.sf(25.0), 0.0);
        assert!((d.sf(-0.5) - 1.0).abs() < 1e-15);
    }

    #[test]
    fn test_rank_sum_symmetry() {
        let d = RankSumDistribution::new(4, 7).unwrap();
        for w in 0..=28 {
            assert!((d.cdf(w as f64) - d.upper_tail_inclusive((28 - w) as f64)).abs() < 1e-12);
        }
    }

    #[test]
    fn test_signed_rank_counts() {
        let d = SignedRankDistribution::new(4).unwrap();
        // subsets of {1, 2, 3, 4} by sum
        assert_eq!(
            d.counts(),
            &[1.0, 1.0, 1.0, 2.0, 2.0, 2.0, 2.0, 2.0, 1.0, 1.0, 1.0]
        );
        assert_eq!(d.counts().iter().sum::<f64>(), 16.0);
    }

    #[test]
    fn test_signed_rank_tail() {
        let d = SignedRankDistribution::new(10).unwrap();
        assert!((d.upper_tail_inclusive(51.0) - 0.006_835_937_5).abs() < 1e-12);
        assert!((d.pmf(55) - 1.0 / 1024.0).abs() < 1e-15);
    }

    #[test]
    fn test_cdf_and_sf_complement() {
        let d = SignedRankDistribution::new(4).unwrap();
        for x in [-1.0, 0.0, 2.5, 5.0, 9.0, 10.0, 12.0] {
            assert!((d.cdf(x) + d.sf(x) - 1.0).abs() < 1e-12, "x = {}", x);
        }
        // the inclusive tail adds the atom at x
        assert!((d.upper_tail_inclusive(5.0) - d.sf(5.0) - d.pmf(5)).abs() < 1e-12);
    }

    #[test]
    fn test_quantiles() {
        let d = SignedRankDistribution::new(4).unwrap();
        assert_eq!(d.quantile(0.0).unwrap(), 0.0);
        assert_eq!(d.quantile(0.5).unwrap(), 5.0);
        assert_eq!(d.quantile(1.0).unwrap(), 10.0);
        assert!(d.quantile(1.5).is_err());
    }

    #[test]
    fn test_empty_groups_rejected() {
        assert!(RankSumDistribution::new(0, 3).is_err());
        assert!(SignedRankDistribution::new(0).is_err());
    }
}
