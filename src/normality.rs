// Shapiro-Wilk normality test
//
// Coefficients and p-value follow Royston's approximation (AS R94):
// - coefficients from Blom scores m_i = Φ⁻¹((i − 3/8)/(n + 1/4)), with
//   polynomial corrections to the outermost one (n <= 5) or two (n > 5)
// - n = 3: exact p-value 1 − (6/π)·acos(√W)
// - 4 <= n <= 11: normalizing transform −ln(γ − ln(1 − W))
// - n >= 12: log-normal transform of 1 − W
//
// The null distribution of W is exposed as ShapiroWilkW so it can be queried
// like the other sampling distributions.

use crate::descriptive::Sample;
use crate::distribution::special::{
    inverse_normal_cdf, invert_cdf, polynomial, standard_normal_sf,
};
use crate::distribution::Distribution;
use crate::error::{ensure_len, ensure_probability, Result, TestError};
use crate::result::{Alternative, TestKind, TestResult};
use std::f64::consts::PI;

/// Largest sample the approximation is calibrated for
pub const MAX_SAMPLE_SIZE: usize = 5000;

const C1: [f64; 6] = [0.0, 0.221157, -0.147981, -2.07119, 4.434685, -2.706056];
const C2: [f64; 6] = [0.0, 0.042981, -0.293762, -1.752461, 5.682633, -3.582633];
const C3: [f64; 4] = [0.544, -0.39978, 0.025054, -6.714e-4];
const C4: [f64; 4] = [1.3822, -0.77857, 0.062767, -0.0020322];
const C5: [f64; 4] = [-1.5861, -0.31082, -0.083751, 0.0038915];
const C6: [f64; 3] = [-0.4803, -0.082676, 0.0030302];
const G: [f64; 2] = [-2.273, 0.459];

/// Null distribution of the Shapiro-Wilk W statistic for sample size n
///
/// Small W indicates departure from normality, so the test's p-value is
/// `cdf(w)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapiroWilkW {
    n: usize,
}

impl ShapiroWilkW {
    pub fn new(n: usize) -> Result<Self> {
        if !(3..=MAX_SAMPLE_SIZE).contains(&n) {
            return Err(TestError::Domain(format!(
                "Shapiro-Wilk W is defined for 3 <= n <= {}, got {}",
                MAX_SAMPLE_SIZE, n
            )));
        }
        Ok(Self { n })
    }

    pub fn n(&self) -> usize {
        self.n
    }
}

impl Distribution for ShapiroWilkW {
    fn cdf(&self, w: f64) -> f64 {
        if w >= 1.0 {
            return 1.0;
        }
        if w <= 0.0 {
            return 0.0;
        }
        let n = self.n as f64;
        if self.n == 3 {
            let w = w.max(0.75);
            return (1.0 - (6.0 / PI) * w.sqrt().acos()).clamp(0.0, 1.0);
        }

        let y = (1.0 - w).ln();
        let z = if self.n <= 11 {
            let gamma = polynomial(&G, n);
            if y >= gamma {
                return 0.0;
            }
            let m = polynomial(&C3, n);
            let s = polynomial(&C4, n).exp();
            (-(gamma - y).ln() - m) / s
        } else {
            let ln_n = n.ln();
            let m = polynomial(&C5, ln_n);
            let s = polynomial(&C6, ln_n).exp();
            (y - m) / s
        };
        standard_normal_sf(z)
    }

    fn quantile(&self, p: f64) -> Result<f64> {
        ensure_probability(p)?;
        if p == 0.0 {
            return Ok(0.0);
        }
        if p == 1.0 {
            return Ok(1.0);
        }
        Ok(invert_cdf(|w| self.cdf(w), p, 0.0, 1.0, Some(0.0)).min(1.0))
    }
}

/// Shapiro-Wilk test of H₀: the sample comes from a normal population
///
/// Reports W as the statistic; there are no degrees of freedom. The result
/// is advisory: nothing else in the crate changes behaviour based on it.
///
/// # Example
/// ```
/// use contraste::descriptive::Sample;
/// use contraste::normality::shapiro_wilk;
///
/// let sample = Sample::new(vec![-1.5, -1.0, -0.5, 0.0, 0.5, 1.0, 1.5]).unwrap();
/// let result = shapiro_wilk(&sample).unwrap();
/// assert!(result.statistic().unwrap() > 0.97);
/// assert!(result.p_value() > 0.05);
/// ```
pub fn shapiro_wilk(sample: &Sample) -> Result<TestResult> {
    let n = sample.len();
    ensure_len(n, 3)?;
    if n > MAX_SAMPLE_SIZE {
        return Err(TestError::InvalidInput(format!(
            "Shapiro-Wilk supports at most {} observations, got {}",
            MAX_SAMPLE_SIZE, n
        )));
    }

    let mut x = sample.values().to_vec();
    x.sort_by(f64::total_cmp);
    if x[n - 1] <= x[0] {
        return Err(TestError::InvalidInput(
            "Shapiro-Wilk is undefined when all observations are equal".to_string(),
        ));
    }
    // W is scale invariant; work on values in [-1, 1] so the sums stay finite
    let scale = x[0].abs().max(x[n - 1].abs());
    for v in x.iter_mut() {
        *v /= scale;
    }

    let coefficients = coefficients(n)?;
    let numerator: f64 = coefficients
        .iter()
        .enumerate()
        .map(|(i, a)| a * (x[n - 1 - i] - x[i]))
        .sum();
    let mean = x.iter().sum::<f64>() / n as f64;
    let ss: f64 = x.iter().map(|v| (v - mean) * (v - mean)).sum();
    let w = numerator * numerator / ss;
    if !w.is_finite() {
        return Err(TestError::Domain(format!(
            "Shapiro-Wilk statistic is not finite for n = {}",
            n
        )));
    }
    let mut w = w.min(1.0);
    if n == 3 {
        w = w.max(0.75);
    }

    let p_value = ShapiroWilkW::new(n)?.cdf(w);
    Ok(
        TestResult::new(TestKind::ShapiroWilk, p_value, Alternative::TwoSided)
            .with_statistic(w)
            .logged(),
    )
}

/// Upper-half coefficients a_1..a_{n/2}, largest first
fn coefficients(n: usize) -> Result<Vec<f64>> {
    let half = n / 2;
    if n == 3 {
        return Ok(vec![std::f64::consts::FRAC_1_SQRT_2]);
    }

    let nf = n as f64;
    let m: Vec<f64> = (1..=half)
        .map(|i| inverse_normal_cdf((i as f64 - 0.375) / (nf + 0.25)))
        .collect();
    let summ2 = 2.0 * m.iter().map(|v| v * v).sum::<f64>();
    let ssumm2 = summ2.sqrt();
    let rsn = 1.0 / nf.sqrt();

    let a1 = polynomial(&C1, rsn) - m[0] / ssumm2;
    let mut a = vec![0.0; half];
    a[0] = a1;

    let (corrected, fac_sq, one_minus) = if n <= 5 {
        (1, summ2 - 2.0 * m[0] * m[0], 1.0 - 2.0 * a1 * a1)
    } else {
        let a2 = polynomial(&C2, rsn) - m[1] / ssumm2;
        a[1] = a2;
        (
            2,
            summ2 - 2.0 * m[0] * m[0] - 2.0 * m[1] * m[1],
            1.0 - 2.0 * a1 * a1 - 2.0 * a2 * a2,
        )
    };
    if fac_sq <= 0.0 || one_minus <= 0.0 {
        return Err(TestError::InvalidInput(format!(
            "Shapiro-Wilk coefficients degenerate for n = {}",
            n
        )));
    }
    let fac = (fac_sq / one_minus).sqrt();
    for (ai, mi) in a.iter_mut().zip(&m).skip(corrected) {
        *ai = -mi / fac;
    }
    Ok(a)
}
