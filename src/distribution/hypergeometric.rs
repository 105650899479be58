use super::special::ln_factorial;
use crate::error::{ensure_probability, Result, TestError};

/// Hypergeometric distribution: successes among `draws` items taken without
/// replacement from a population of `population` items, `successes` of which
/// are marked
///
/// For a 2×2 table with fixed margins the top-left cell follows
/// `Hypergeometric::new(N, C1, R1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hypergeometric {
    population: u64,
    successes: u64,
    draws: u64,
}

impl Hypergeometric {
    pub fn new(population: u64, successes: u64, draws: u64) -> Result<Self> {
        if successes > population || draws > population {
            return Err(TestError::Domain(format!(
                "hypergeometric requires successes ({}) and draws ({}) <= population ({})",
                successes, draws, population
            )));
        }
        Ok(Self {
            population,
            successes,
            draws,
        })
    }

    /// Inclusive range of values with non-zero probability
    pub fn support(&self) -> (u64, u64) {
        let failures = self.population - self.successes;
        let lo = self.draws.saturating_sub(failures);
        let hi = self.draws.min(self.successes);
        (lo, hi)
    }

    /// Number of points in the support
    pub fn support_size(&self) -> u64 {
        let (lo, hi) = self.support();
        hi - lo + 1
    }

    pub fn ln_pmf(&self, k: u64) -> f64 {
        let (lo, hi) = self.support();
        if k < lo || k > hi {
            return f64::NEG_INFINITY;
        }
        let n = self.population;
        let big_k = self.successes;
        let draws = self.draws;
        ln_choose(big_k, k) + ln_choose(n - big_k, draws - k) - ln_choose(n, draws)
    }

    pub fn pmf(&self, k: u64) -> f64 {
        self.ln_pmf(k).exp()
    }

    /// P(X <= k)
    pub fn cdf(&self, k: u64) -> f64 {
        let (lo, hi) = self.support();
        if k < lo {
            return 0.0;
        }
        let upper = k.min(hi);
        (lo..=upper).map(|i| self.pmf(i)).sum::<f64>().min(1.0)
    }

    /// P(X >= k)
    pub fn sf(&self, k: u64) -> f64 {
        let (lo, hi) = self.support();
        if k > hi {
            return 0.0;
        }
        let lower = k.max(lo);
        (lower..=hi).map(|i| self.pmf(i)).sum::<f64>().min(1.0)
    }

    /// Smallest k with P(X <= k) >= p
    pub fn quantile(&self, p: f64) -> Result<u64> {
        ensure_probability(p)?;
        let (lo, hi) = self.support();
        let target = p * (1.0 - 64.0 * f64::EPSILON);
        let mut cumulative = 0.0;
        for k in lo..=hi {
            cumulative += self.pmf(k);
            if cumulative >= target {
                return Ok(k);
            }
        }
        Ok(hi)
    }
}

fn ln_choose(n: u64, k: u64) -> f64 {
    ln_factorial(n) - ln_factorial(k) - ln_factorial(n - k)
}
