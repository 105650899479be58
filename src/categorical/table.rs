// Contingency tables
//
// ContingencyTable cross-tabulates two variables measured on *different*
// units (chi-square independence, Fisher). PairedContingencyTable records
// before/after responses on the *same* units (McNemar, Bowker). The two
// types share a shape but never convert into each other implicitly.

use crate::error::{Result, TestError};
use serde::{Deserialize, Serialize};

/// r×c table of non-negative counts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContingencyTable {
    counts: Vec<Vec<u64>>,
    row_labels: Option<Vec<String>>,
    col_labels: Option<Vec<String>>,
}

impl ContingencyTable {
    /// Build from row-major counts; rows must all have the same length
    ///
    /// # Example
    /// ```
    /// use contraste::categorical::ContingencyTable;
    ///
    /// let table = ContingencyTable::new(vec![vec![13, 15], vec![30, 13], vec![44, 65]]).unwrap();
    /// assert_eq!(table.row_totals(), vec![28, 43, 109]);
    /// assert_eq!(table.total(), 180);
    /// ```
    pub fn new(counts: Vec<Vec<u64>>) -> Result<Self> {
        check_rectangular(&counts)?;
        Ok(Self {
            counts,
            row_labels: None,
            col_labels: None,
        })
    }

    /// Attach category labels; lengths must match the table's shape
    pub fn with_labels(mut self, rows: Vec<String>, cols: Vec<String>) -> Result<Self> {
        if rows.len() != self.rows() || cols.len() != self.cols() {
            return Err(TestError::InvalidInput(format!(
                "labels ({}×{}) do not match table shape ({}×{})",
                rows.len(),
                cols.len(),
                self.rows(),
                self.cols()
            )));
        }
        self.row_labels = Some(rows);
        self.col_labels = Some(cols);
        Ok(self)
    }

    /// Cross-tabulate `(row category, column category)` observations
    ///
    /// Categories appear in first-seen order.
    pub fn from_observations<I, R, C>(observations: I) -> Result<Self>
    where
        I: IntoIterator<Item = (R, C)>,
        R: AsRef<str>,
        C: AsRef<str>,
    {
        let mut row_labels: Vec<String> = Vec::new();
        let mut col_labels: Vec<String> = Vec::new();
        let mut cells: Vec<(usize, usize)> = Vec::new();
        for (r, c) in observations {
            let i = intern(&mut row_labels, r.as_ref());
            let j = intern(&mut col_labels, c.as_ref());
            cells.push((i, j));
        }
        let mut counts = vec![vec![0u64; col_labels.len()]; row_labels.len()];
        for (i, j) in cells {
            counts[i][j] += 1;
        }
        Self::new(counts)?.with_labels(row_labels, col_labels)
    }

    pub fn rows(&self) -> usize {
        self.counts.len()
    }

    pub fn cols(&self) -> usize {
        self.counts.first().map_or(0, Vec::len)
    }

    pub fn counts(&self) -> &[Vec<u64>] {
        &self.counts
    }

    pub fn get(&self, row: usize, col: usize) -> Option<u64> {
        self.counts.get(row).and_then(|r| r.get(col)).copied()
    }

    pub fn row_labels(&self) -> Option<&[String]> {
        self.row_labels.as_deref()
    }

    pub fn col_labels(&self) -> Option<&[String]> {
        self.col_labels.as_deref()
    }

    pub fn row_totals(&self) -> Vec<u64> {
        self.counts.iter().map(|r| r.iter().sum()).collect()
    }

    pub fn col_totals(&self) -> Vec<u64> {
        (0..self.cols())
            .map(|j| self.counts.iter().map(|r| r[j]).sum())
            .collect()
    }

    /// Grand total N
    pub fn total(&self) -> u64 {
        self.counts.iter().flatten().sum()
    }

    /// Expected counts E_ij = R_i·C_j / N under independence
    pub fn expected(&self) -> Vec<Vec<f64>> {
        let n = self.total() as f64;
        let col_totals = self.col_totals();
        self.row_totals()
            .into_iter()
            .map(|r| {
                col_totals
                    .iter()
                    .map(|&c| if n > 0.0 { r as f64 * c as f64 / n } else { 0.0 })
                    .collect()
            })
            .collect()
    }

    /// Reorder rows; `order[i]` is the source row placed at position i
    pub fn permute_rows(&self, order: &[usize]) -> Result<Self> {
        check_permutation(order, self.rows())?;
        Ok(Self {
            counts: order.iter().map(|&i| self.counts[i].clone()).collect(),
            row_labels: self
                .row_labels
                .as_ref()
                .map(|l| order.iter().map(|&i| l[i].clone()).collect()),
            col_labels: self.col_labels.clone(),
        })
    }

    /// Reorder columns; `order[j]` is the source column placed at position j
    pub fn permute_cols(&self, order: &[usize]) -> Result<Self> {
        check_permutation(order, self.cols())?;
        Ok(Self {
            counts: self
                .counts
                .iter()
                .map(|r| order.iter().map(|&j| r[j]).collect())
                .collect(),
            row_labels: self.row_labels.clone(),
            col_labels: self
                .col_labels
                .as_ref()
                .map(|l| order.iter().map(|&j| l[j].clone()).collect()),
        })
    }

    pub fn transpose(&self) -> Self {
        let counts = (0..self.cols())
            .map(|j| self.counts.iter().map(|r| r[j]).collect())
            .collect();
        Self {
            counts,
            row_labels: self.col_labels.clone(),
            col_labels: self.row_labels.clone(),
        }
    }

    /// Cells as `[[a, b], [c, d]]` when the table is 2×2
    pub(crate) fn as_2x2(&self) -> Option<[[u64; 2]; 2]> {
        if self.rows() != 2 || self.cols() != 2 {
            return None;
        }
        Some([
            [self.counts[0][0], self.counts[0][1]],
            [self.counts[1][0], self.counts[1][1]],
        ])
    }
}

/// k×k table of before (row) × after (column) responses on the same units
///
/// McNemar's and Bowker's tests take this type and only this type. A
/// cross-tabulation of two independent groups belongs in
/// [`ContingencyTable`] instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairedContingencyTable {
    counts: Vec<Vec<u64>>,
    labels: Option<Vec<String>>,
}

impl PairedContingencyTable {
    /// Square table with at least two categories
    pub fn new(counts: Vec<Vec<u64>>) -> Result<Self> {
        check_rectangular(&counts)?;
        let k = counts.len();
        if counts[0].len() != k {
            return Err(TestError::InvalidInput(format!(
                "paired table must be square, got {}×{}",
                k,
                counts[0].len()
            )));
        }
        if k < 2 {
            return Err(TestError::InvalidInput(
                "paired table needs at least two response categories".to_string(),
            ));
        }
        Ok(Self {
            counts,
            labels: None,
        })
    }

    /// ```text
    ///              after: yes  after: no
    /// before: yes      a           b
    /// before: no       c           d
    /// ```
    pub fn from_2x2(a: u64, b: u64, c: u64, d: u64) -> Self {
        Self {
            counts: vec![vec![a, b], vec![c, d]],
            labels: None,
        }
    }

    /// Tabulate `(before, after)` responses of the same units
    ///
    /// Both margins share one category set in first-seen order.
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, S)>,
        S: AsRef<str>,
    {
        let mut labels: Vec<String> = Vec::new();
        let mut cells = Vec::new();
        for (before, after) in pairs {
            let i = intern(&mut labels, before.as_ref());
            let j = intern(&mut labels, after.as_ref());
            cells.push((i, j));
        }
        let k = labels.len();
        let mut counts = vec![vec![0u64; k]; k];
        for (i, j) in cells {
            counts[i][j] += 1;
        }
        let mut table = Self::new(counts)?;
        table.labels = Some(labels);
        Ok(table)
    }

    /// Number of response categories
    pub fn size(&self) -> usize {
        self.counts.len()
    }

    pub fn counts(&self) -> &[Vec<u64>] {
        &self.counts
    }

    pub fn get(&self, before: usize, after: usize) -> Option<u64> {
        self.counts.get(before).and_then(|r| r.get(after)).copied()
    }

    pub fn labels(&self) -> Option<&[String]> {
        self.labels.as_deref()
    }

    /// Number of units
    pub fn total(&self) -> u64 {
        self.counts.iter().flatten().sum()
    }

    /// Off-diagonal counts `(b, c)` of a 2×2 table
    pub fn discordant(&self) -> Option<(u64, u64)> {
        (self.size() == 2).then(|| (self.counts[0][1], self.counts[1][0]))
    }

    /// Explicitly reinterpret the paired table as a cross-tabulation
    pub fn into_cross_tabulation(self) -> ContingencyTable {
        ContingencyTable {
            counts: self.counts,
            row_labels: self.labels.clone(),
            col_labels: self.labels,
        }
    }
}

fn check_rectangular(counts: &[Vec<u64>]) -> Result<()> {
    let Some(first) = counts.first() else {
        return Err(TestError::InvalidInput("table has no rows".to_string()));
    };
    if first.is_empty() {
        return Err(TestError::InvalidInput("table has no columns".to_string()));
    }
    if let Some(i) = counts.iter().position(|r| r.len() != first.len()) {
        return Err(TestError::InvalidInput(format!(
            "row {} has {} columns, expected {}",
            i,
            counts[i].len(),
            first.len()
        )));
    }
    Ok(())
}

fn check_permutation(order: &[usize], len: usize) -> Result<()> {
    let mut seen = vec![false; len];
    for &i in order {
        match seen.get_mut(i) {
            Some(s) if !*s => *s = true,
            _ => {
                return Err(TestError::InvalidInput(format!(
                    "{:?} is not a permutation of 0..{}",
                    order, len
                )))
            }
        }
    }
    if order.len() != len {
        return Err(TestError::InvalidInput(format!(
            "{:?} is not a permutation of 0..{}",
            order, len
        )));
    }
    Ok(())
}

fn intern(labels: &mut Vec<String>, label: &str) -> usize {
    match labels.iter().position(|l| l == label) {
        Some(i) => i,
        None => {
            labels.push(label.to_string());
            labels.len() - 1
        }
    }
}
