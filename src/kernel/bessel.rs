//! Modified Bessel function of the second kind, `K_ν(x)`, for real order.
//!
//! The Matérn kernel needs `K_ν` at arbitrary non-negative real order. The
//! evaluation follows Temme's method:
//!
//! - reduce the order to `μ = ν − N` with `|μ| ≤ 1/2`,
//! - evaluate `K_μ(x)` and `K_{μ+1}(x)` by Temme's power series for `x < 2`
//!   or by Steed's continued fraction (CF2) for `x ≥ 2`,
//! - recur upward `K_{μ+k+1} = K_{μ+k−1} + (2(μ+k)/x) K_{μ+k}` to reach `ν`.
//!
//! Upward recurrence is stable for `K`, so no normalization pass is needed.
//! Callers are responsible for `x > 0`; the singularity at the origin is
//! handled in [`crate::kernel::matern`].
use statrs::function::gamma::gamma;
use std::f64::consts::PI;

const BESSEL_EPS: f64 = 1e-16;
const BESSEL_MAX_ITER: usize = 10_000;
const SERIES_CUTOFF: f64 = 2.0;

// Taylor coefficients of 1/Γ(1+x) used when μ is too close to zero for the
// direct difference quotient.
const EULER_GAMMA: f64 = 0.577_215_664_901_532_9;
const RECIP_GAMMA_C4: f64 = -0.042_002_635_034_095_2;
const RECIP_GAMMA_C6: f64 = -0.042_197_734_555_544_3;
const SMALL_MU: f64 = 1e-3;

/// Evaluate `K_ν(x)` for `ν ≥ 0` and `x > 0`.
///
/// Returns `0.0` once `e^{−x}` underflows. The order is used through `|ν|`
/// since `K_{−ν} = K_ν`.
pub fn bessel_k(nu: f64, x: f64) -> f64 {
    let nu = nu.abs();
    let n_up = (nu + 0.5).floor() as usize;
    let mu = nu - n_up as f64;

    let (mut k_mu, mut k_mu1) =
        if x < SERIES_CUTOFF { temme_series(mu, x) } else { steed_continued_fraction(mu, x) };

    let two_over_x = 2.0 / x;
    for i in 1..=n_up {
        let next = (mu + i as f64) * two_over_x * k_mu1 + k_mu;
        k_mu = k_mu1;
        k_mu1 = next;
    }
    k_mu
}

/// `(Γ₁(μ), Γ₂(μ), 1/Γ(1+μ), 1/Γ(1−μ))` as used by Temme's series.
fn temme_gammas(mu: f64) -> (f64, f64, f64, f64) {
    let recip_plus = 1.0 / gamma(1.0 + mu);
    let recip_minus = 1.0 / gamma(1.0 - mu);
    let gam1 = if mu.abs() < SMALL_MU {
        let mu2 = mu * mu;
        -(EULER_GAMMA + RECIP_GAMMA_C4 * mu2 + RECIP_GAMMA_C6 * mu2 * mu2)
    } else {
        (recip_minus - recip_plus) / (2.0 * mu)
    };
    let gam2 = 0.5 * (recip_minus + recip_plus);
    (gam1, gam2, recip_plus, recip_minus)
}

fn temme_series(mu: f64, x: f64) -> (f64, f64) {
    let mu2 = mu * mu;
    let half_x = 0.5 * x;
    let pi_mu = PI * mu;
    let fact = if pi_mu.abs() < BESSEL_EPS { 1.0 } else { pi_mu / pi_mu.sin() };
    let d = -half_x.ln();
    let e = mu * d;
    let fact2 = if e.abs() < BESSEL_EPS { 1.0 } else { e.sinh() / e };
    let (gam1, gam2, recip_plus, recip_minus) = temme_gammas(mu);

    let mut ff = fact * (gam1 * e.cosh() + gam2 * fact2 * d);
    let mut sum = ff;
    let exp_e = e.exp();
    let mut p = 0.5 * exp_e / recip_plus;
    let mut q = 0.5 / (exp_e * recip_minus);
    let mut c = 1.0;
    let quarter_x2 = half_x * half_x;
    let mut sum1 = p;

    for i in 1..=BESSEL_MAX_ITER {
        let fi = i as f64;
        ff = (fi * ff + p + q) / (fi * fi - mu2);
        c *= quarter_x2 / fi;
        p /= fi - mu;
        q /= fi + mu;
        let del = c * ff;
        sum += del;
        sum1 += c * (p - fi * ff);
        if del.abs() < sum.abs() * BESSEL_EPS {
            break;
        }
    }
    (sum, sum1 * 2.0 / x)
}

fn steed_continued_fraction(mu: f64, x: f64) -> (f64, f64) {
    let mu2 = mu * mu;
    let mut b = 2.0 * (1.0 + x);
    let mut d = 1.0 / b;
    let mut delh = d;
    let mut h = d;
    let mut q1 = 0.0;
    let mut q2 = 1.0;
    let a1 = 0.25 - mu2;
    let mut q = a1;
    let mut c = a1;
    let mut a = -a1;
    let mut s = 1.0 + q * delh;

    for i in 2..=BESSEL_MAX_ITER {
        let fi = i as f64;
        a -= 2.0 * (fi - 1.0);
        c = -a * c / fi;
        let q_new = (q1 - b * q2) / a;
        q1 = q2;
        q2 = q_new;
        q += c * q_new;
        b += 2.0;
        d = 1.0 / (b + a * d);
        delh = (b * d - 1.0) * delh;
        h += delh;
        let dels = q * delh;
        s += dels;
        if (dels / s).abs() < BESSEL_EPS {
            break;
        }
    }
    let h = a1 * h;
    let k_mu = (PI / (2.0 * x)).sqrt() * (-x).exp() / s;
    let k_mu1 = k_mu * (mu + x + 0.5 - h) / x;
    (k_mu, k_mu1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Agreement with closed forms at half-integer orders, on both sides of
    //   the series / continued-fraction switch.
    // - Tabulated integer-order values (K₀, K₁, K₂ at x = 1).
    // - The μ → 0 branch of the Temme gamma helpers.
    // -------------------------------------------------------------------------

    fn k_half(x: f64) -> f64 {
        (PI / (2.0 * x)).sqrt() * (-x).exp()
    }

    #[test]
    // Purpose
    // -------
    // `K_{1/2}` and `K_{3/2}` have elementary closed forms; both evaluation
    // branches must reproduce them.
    //
    // Given
    // -----
    // - x ∈ {0.3, 1.7, 2.0, 3.5, 12.0}.
    //
    // Expect
    // ------
    // - Relative error below 1e-10.
    fn half_integer_orders_match_closed_forms() {
        for &x in &[0.3, 1.7, 2.0, 3.5, 12.0] {
            assert_relative_eq!(bessel_k(0.5, x), k_half(x), max_relative = 1e-10);
            assert_relative_eq!(
                bessel_k(1.5, x),
                k_half(x) * (1.0 + 1.0 / x),
                max_relative = 1e-10
            );
            assert_relative_eq!(
                bessel_k(2.5, x),
                k_half(x) * (1.0 + 3.0 / x + 3.0 / (x * x)),
                max_relative = 1e-10
            );
        }
    }

    #[test]
    // Purpose
    // -------
    // Integer orders exercise the μ = 0 branch of the gamma helpers.
    //
    // Expect
    // ------
    // - Tabulated values of K₀(1), K₁(1), K₂(1) to 1e-10.
    fn integer_orders_match_tabulated_values() {
        assert_relative_eq!(bessel_k(0.0, 1.0), 0.421_024_438_240_708_34, max_relative = 1e-10);
        assert_relative_eq!(bessel_k(1.0, 1.0), 0.601_907_230_197_234_6, max_relative = 1e-10);
        assert_relative_eq!(bessel_k(2.0, 1.0), 1.624_838_898_635_177_4, max_relative = 1e-10);
    }

    #[test]
    // Purpose
    // -------
    // The small-μ Taylor branch of Γ₁ must join the direct difference
    // quotient continuously.
    fn temme_gamma1_is_continuous_at_switch() {
        let (below, ..) = temme_gammas(SMALL_MU * 0.999);
        let (above, ..) = temme_gammas(SMALL_MU * 1.001);
        assert_relative_eq!(below, above, max_relative = 1e-8);
        let (at_zero, ..) = temme_gammas(0.0);
        assert_relative_eq!(at_zero, -EULER_GAMMA, max_relative = 1e-15);
    }

    #[test]
    // Purpose
    // -------
    // Far in the tail the function underflows to zero instead of producing
    // NaN.
    fn large_argument_underflows_to_zero() {
        let value = bessel_k(2.0, 800.0);
        assert!(value.is_finite());
        assert!(value >= 0.0 && value < 1e-300);
    }
}
