// Special functions backing the sampling distributions
//
// Series and continued-fraction evaluations, no lookup tables:
// - ln_gamma: Lanczos approximation (g = 7, 9 terms) with reflection
// - gamma_q: regularized upper incomplete gamma (series below a+1, Lentz CF above)
// - beta_inc: regularized incomplete beta (Lentz CF with symmetry swap)
// - erfc: via gamma_q(1/2, x^2)
// - inverse_normal_cdf: Acklam rational approximation + one Halley step
//
// Every loop has a fixed iteration cap.

use std::f64::consts::PI;

const MAX_ITERATIONS: usize = 500;
const EPSILON: f64 = 1e-15;
const TINY: f64 = 1e-300;

const LANCZOS: [f64; 9] = [
    0.999_999_999_999_809_9,
    676.520_368_121_885_1,
    -1_259.139_216_722_402_8,
    771.323_428_777_653_1,
    -176.615_029_162_140_6,
    12.507_343_278_686_905,
    -0.138_571_095_265_720_12,
    9.984_369_578_019_572e-6,
    1.505_632_735_149_311_6e-7,
];

/// Natural log of the gamma function for x > 0
pub fn ln_gamma(x: f64) -> f64 {
    if x < 0.5 {
        // Reflection: Γ(x)Γ(1-x) = π / sin(πx)
        return (PI / (PI * x).sin().abs()).ln() - ln_gamma(1.0 - x);
    }
    let x = x - 1.0;
    let t = x + 7.5;
    let mut acc = LANCZOS[0];
    for (i, c) in LANCZOS.iter().enumerate().skip(1) {
        acc += c / (x + i as f64);
    }
    0.5 * (2.0 * PI).ln() + (x + 0.5) * t.ln() - t + acc.ln()
}

/// ln(n!)
pub fn ln_factorial(n: u64) -> f64 {
    ln_gamma(n as f64 + 1.0)
}

fn clamp_tiny(v: f64) -> f64 {
    if v.abs() < TINY {
        TINY
    } else {
        v
    }
}

fn gamma_p_series(a: f64, x: f64) -> f64 {
    let mut ap = a;
    let mut sum = 1.0 / a;
    let mut del = sum;
    for _ in 0..MAX_ITERATIONS {
        ap += 1.0;
        del *= x / ap;
        sum += del;
        if del.abs() < sum.abs() * EPSILON {
            break;
        }
    }
    sum * (-x + a * x.ln() - ln_gamma(a)).exp()
}

fn gamma_q_continued_fraction(a: f64, x: f64) -> f64 {
    let mut b = x + 1.0 - a;
    let mut c = 1.0 / TINY;
    let mut d = 1.0 / b;
    let mut h = d;
    for i in 1..MAX_ITERATIONS {
        let an = -(i as f64) * (i as f64 - a);
        b += 2.0;
        d = clamp_tiny(an * d + b);
        c = clamp_tiny(b + an / c);
        d = 1.0 / d;
        let delta = d * c;
        h *= delta;
        if (delta - 1.0).abs() < EPSILON {
            break;
        }
    }
    (-x + a * x.ln() - ln_gamma(a)).exp() * h
}

/// Regularized lower incomplete gamma P(a, x)
pub fn gamma_p(a: f64, x: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    if x < a + 1.0 {
        gamma_p_series(a, x)
    } else {
        1.0 - gamma_q_continued_fraction(a, x)
    }
}

/// Regularized upper incomplete gamma Q(a, x) = 1 - P(a, x)
pub fn gamma_q(a: f64, x: f64) -> f64 {
    if x <= 0.0 {
        return 1.0;
    }
    if x.is_infinite() {
        return 0.0;
    }
    if x < a + 1.0 {
        1.0 - gamma_p_series(a, x)
    } else {
        gamma_q_continued_fraction(a, x)
    }
}

fn beta_continued_fraction(a: f64, b: f64, x: f64) -> f64 {
    let qab = a + b;
    let qap = a + 1.0;
    let qam = a - 1.0;
    let mut c = 1.0;
    let mut d = 1.0 / clamp_tiny(1.0 - qab * x / qap);
    let mut h = d;
    for m in 1..MAX_ITERATIONS {
        let m = m as f64;
        let m2 = 2.0 * m;

        // Even step
        let aa = m * (b - m) * x / ((qam + m2) * (a + m2));
        d = 1.0 / clamp_tiny(1.0 + aa * d);
        c = clamp_tiny(1.0 + aa / c);
        h *= d * c;

        // Odd step
        let aa = -(a + m) * (qab + m) * x / ((a + m2) * (qap + m2));
        d = 1.0 / clamp_tiny(1.0 + aa * d);
        c = clamp_tiny(1.0 + aa / c);
        let delta = d * c;
        h *= delta;
        if (delta - 1.0).abs() < EPSILON {
            break;
        }
    }
    h
}

/// Regularized incomplete beta I_x(a, b)
pub fn beta_inc(a: f64, b: f64, x: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }
    let ln_front =
        ln_gamma(a + b) - ln_gamma(a) - ln_gamma(b) + a * x.ln() + b * (-x).ln_1p();
    let front = ln_front.exp();
    if x < (a + 1.0) / (a + b + 2.0) {
        front * beta_continued_fraction(a, b, x) / a
    } else {
        1.0 - front * beta_continued_fraction(b, a, 1.0 - x) / b
    }
}

/// Complementary error function
pub fn erfc(x: f64) -> f64 {
    if x >= 0.0 {
        gamma_q(0.5, x * x)
    } else {
        2.0 - gamma_q(0.5, x * x)
    }
}

/// Standard normal upper tail P(Z > z)
pub fn standard_normal_sf(z: f64) -> f64 {
    0.5 * erfc(z / std::f64::consts::SQRT_2)
}

/// Standard normal CDF P(Z <= z)
pub fn standard_normal_cdf(z: f64) -> f64 {
    0.5 * erfc(-z / std::f64::consts::SQRT_2)
}

const ACKLAM_A: [f64; 6] = [
    -3.969_683_028_665_376e1,
    2.209_460_984_245_205e2,
    -2.759_285_104_469_687e2,
    1.383_577_518_672_690e2,
    -3.066_479_806_614_716e1,
    2.506_628_277_459_239,
];
const ACKLAM_B: [f64; 5] = [
    -5.447_609_879_822_406e1,
    1.615_858_368_580_409e2,
    -1.556_989_798_598_866e2,
    6.680_131_188_771_972e1,
    -1.328_068_155_288_572e1,
];
const ACKLAM_C: [f64; 6] = [
    -7.784_894_002_430_293e-3,
    -3.223_964_580_411_365e-1,
    -2.400_758_277_161_838,
    -2.549_732_539_343_734,
    4.374_664_141_464_968,
    2.938_163_982_698_783,
];
const ACKLAM_D: [f64; 4] = [
    7.784_695_709_041_462e-3,
    3.224_671_290_700_398e-1,
    2.445_134_137_142_996,
    3.754_408_661_907_416,
];
const ACKLAM_P_LOW: f64 = 0.024_25;

fn acklam_tail(q: f64) -> f64 {
    let c = &ACKLAM_C;
    let d = &ACKLAM_D;
    (((((c[0] * q + c[1]) * q + c[2]) * q + c[3]) * q + c[4]) * q + c[5])
        / ((((d[0] * q + d[1]) * q + d[2]) * q + d[3]) * q + 1.0)
}

/// Standard normal quantile for p in (0, 1); ±∞ at the endpoints
pub fn inverse_normal_cdf(p: f64) -> f64 {
    if p <= 0.0 {
        return f64::NEG_INFINITY;
    }
    if p >= 1.0 {
        return f64::INFINITY;
    }
    if p > 0.5 {
        return -inverse_normal_cdf(1.0 - p);
    }

    let x = if p < ACKLAM_P_LOW {
        acklam_tail((-2.0 * p.ln()).sqrt())
    } else {
        let a = &ACKLAM_A;
        let b = &ACKLAM_B;
        let q = p - 0.5;
        let r = q * q;
        (((((a[0] * r + a[1]) * r + a[2]) * r + a[3]) * r + a[4]) * r + a[5]) * q
            / (((((b[0] * r + b[1]) * r + b[2]) * r + b[3]) * r + b[4]) * r + 1.0)
    };

    // One Halley step against the erfc-based CDF
    let e = standard_normal_cdf(x) - p;
    let u = e * (2.0 * PI).sqrt() * (x * x / 2.0).exp();
    x - u / (1.0 + x * u / 2.0)
}

/// Invert a monotone CDF by bracketed bisection
///
/// `lo`/`hi` are starting guesses; the bracket is widened until it contains
/// `p`, then halved at most `MAX_ITERATIONS` times. `floor` bounds the
/// support from below (e.g. 0 for chi-square).
pub(crate) fn invert_cdf<F>(cdf: F, p: f64, mut lo: f64, mut hi: f64, floor: Option<f64>) -> f64
where
    F: Fn(f64) -> f64,
{
    for _ in 0..MAX_ITERATIONS {
        if cdf(lo) <= p {
            break;
        }
        lo = match floor {
            Some(f) => f + (lo - f) / 2.0,
            None if lo < 0.0 => lo * 2.0,
            None => lo - 1.0,
        };
    }
    for _ in 0..MAX_ITERATIONS {
        if cdf(hi) >= p {
            break;
        }
        hi = if hi > 0.0 { hi * 2.0 } else { hi + 1.0 };
    }
    for _ in 0..MAX_ITERATIONS {
        let mid = 0.5 * (lo + hi);
        if cdf(mid) < p {
            lo = mid;
        } else {
            hi = mid;
        }
        if hi - lo <= 1e-12 * mid.abs().max(1.0) {
            break;
        }
    }
    0.5 * (lo + hi)
}

/// Evaluate c[0] + c[1]·x + c[2]·x² + ... (Horner)
pub(crate) fn polynomial(coefficients: &[f64], x: f64) -> f64 {
    coefficients
        .iter()
        .rev()
        .fold(0.0, |acc, &c| acc * x + c)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol * b.abs().max(1.0)
    }

    #[test]
    fn test_ln_gamma_factorials() {
        assert!(close(ln_gamma(1.0), 0.0, 1e-12));
        assert!(close(ln_gamma(2.0), 0.0, 1e-12));
        assert!(close(ln_gamma(5.0), 24f64.ln(), 1e-12));
        assert!(close(ln_factorial(10), 3_628_800f64.ln(), 1e-12));
    }

    #[test]
    fn test_ln_gamma_half() {
        // Γ(1/2) = √π
        assert!(close(ln_gamma(0.5), PI.sqrt().ln(), 1e-12));
    }

    #[test]
    fn test_gamma_q_chi_square_reference() {
        // P(χ²₃ > 8.44) = 0.037741852...
        assert!(close(gamma_q(1.5, 4.22), 0.037_741_852_024_021, 1e-10));
        // P(χ²₁ > 0.01)
        assert!(close(gamma_q(0.5, 0.005), 0.920_344_325_445_942, 1e-10));
    }

    #[test]
    fn test_gamma_p_plus_q_is_one() {
        for &(a, x) in &[(0.5, 0.3), (2.0, 5.0), (10.0, 3.0), (75.0, 100.0)] {
            assert!(close(gamma_p(a, x) + gamma_q(a, x), 1.0, 1e-12));
        }
    }

    #[test]
    fn test_beta_inc_symmetry() {
        // I_x(a, b) = 1 - I_{1-x}(b, a)
        let lhs = beta_inc(2.5, 0.5, 0.7);
        let rhs = 1.0 - beta_inc(0.5, 2.5, 0.3);
        assert!(close(lhs, rhs, 1e-12));
    }

    #[test]
    fn test_beta_inc_uniform_case() {
        // I_x(1, 1) = x
        assert!(close(beta_inc(1.0, 1.0, 0.37), 0.37, 1e-12));
        assert_eq!(beta_inc(2.0, 3.0, 0.0), 0.0);
        assert_eq!(beta_inc(2.0, 3.0, 1.0), 1.0);
    }

    #[test]
    fn test_normal_reference_values() {
        assert!(close(standard_normal_cdf(0.0), 0.5, 1e-15));
        assert!(close(standard_normal_sf(1.96), 0.024_997_895_148_220_4, 1e-10));
        assert!(close(standard_normal_cdf(-1.96), 0.024_997_895_148_220_4, 1e-10));
        assert!(close(standard_normal_sf(5.0), 2.866_515_718_791_94e-7, 1e-8));
    }

    #[test]
    fn test_inverse_normal_reference_values() {
        assert!(close(inverse_normal_cdf(0.975), 1.959_963_984_540_054, 1e-10));
        assert!(close(inverse_normal_cdf(0.001), -3.090_232_306_167_813, 1e-10));
        assert_eq!(inverse_normal_cdf(0.5), 0.0);
        assert_eq!(inverse_normal_cdf(0.0), f64::NEG_INFINITY);
        assert_eq!(inverse_normal_cdf(1.0), f64::INFINITY);
    }

    #[test]
    fn test_inverse_normal_round_trip() {
        for &p in &[1e-8, 0.01, 0.2, 0.5, 0.8, 0.99, 1.0 - 1e-8] {
            let z = inverse_normal_cdf(p);
            assert!(close(standard_normal_cdf(z), p, 1e-9), "p = {}", p);
        }
    }

    #[test]
    fn test_polynomial_horner() {
        // 1 + 2x + 3x² at x = 2
        assert_eq!(polynomial(&[1.0, 2.0, 3.0], 2.0), 17.0);
        assert_eq!(polynomial(&[4.0], 10.0), 4.0);
    }

    #[test]
    fn test_invert_cdf_with_floor() {
        // Exponential(1): F(x) = 1 - e^{-x}
        let q = invert_cdf(|x| 1.0 - (-x).exp(), 0.5, 1.0, 2.0, Some(0.0));
        assert!(close(q, 2f64.ln(), 1e-9));
    }
}
