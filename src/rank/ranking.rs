/// Ranking of a set of observations with tie information
#[derive(Debug, Clone, PartialEq)]
pub struct Ranking {
    /// 1-based ranks in input order; tied values share their average rank
    pub ranks: Vec<f64>,
    /// Sizes of the groups of tied values (only groups larger than one)
    pub tie_groups: Vec<usize>,
}

impl Ranking {
    pub fn has_ties(&self) -> bool {
        !self.tie_groups.is_empty()
    }

    /// Σ(t³ − t) over tie groups, the variance correction term
    pub fn tie_correction(&self) -> f64 {
        self.tie_groups
            .iter()
            .map(|&t| {
                let t = t as f64;
                t * t * t - t
            })
            .sum()
    }
}

/// Rank `values` in ascending order, averaging over ties
///
/// # Example
/// ```
/// use contraste::rank::rank;
///
/// let r = rank(&[10.0, 30.0, 20.0, 20.0]);
/// assert_eq!(r.ranks, vec![1.0, 4.0, 2.5, 2.5]);
/// assert_eq!(r.tie_groups, vec![2]);
/// ```
pub fn rank(values: &[f64]) -> Ranking {
    let n = values.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));

    let mut ranks = vec![0.0; n];
    let mut tie_groups = Vec::new();
    let mut i = 0;
    while i < n {
        let mut j = i + 1;
        while j < n && values[order[j]] == values[order[i]] {
            j += 1;
        }
        // positions i..j share rank (i + 1 + j) / 2
        let average = (i + 1 + j) as f64 / 2.0;
        for &idx in &order[i..j] {
            ranks[idx] = average;
        }
        if j - i > 1 {
            tie_groups.push(j - i);
        }
        i = j;
    }
    Ranking { ranks, tie_groups }
}
