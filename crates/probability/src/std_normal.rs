//! The standard normal distribution `N(0, 1)`.
//!
//! These free functions are used on every transform call, so they evaluate
//! the closed forms through `statrs`' error functions rather than building a
//! distribution object. Their accuracy is that of `statrs`' rational
//! approximations, about `1e-11` absolute, so exact affine maps for normal
//! marginals live on [`Marginal`](crate::Marginal) instead.

use std::f64::consts::{FRAC_1_SQRT_2, SQRT_2};

use statrs::function::erf::{erfc, erfc_inv};

/// `1 / sqrt(2π)`.
const FRAC_1_SQRT_2PI: f64 = 0.398_942_280_401_432_7;

/// Cumulative distribution function `Φ(z)`.
#[must_use]
pub fn cdf(z: f64) -> f64 {
    0.5 * erfc(-z * FRAC_1_SQRT_2)
}

/// Probability density function `φ(z)`.
#[must_use]
pub fn pdf(z: f64) -> f64 {
    FRAC_1_SQRT_2PI * (-0.5 * z * z).exp()
}

/// Inverse cumulative distribution function `Φ⁻¹(p)`.
///
/// Returns `-∞` at `p = 0`, `+∞` at `p = 1`, and NaN outside `[0, 1]`.
#[must_use]
pub fn icdf(p: f64) -> f64 {
    if !(0.0..=1.0).contains(&p) {
        return f64::NAN;
    }
    -SQRT_2 * erfc_inv(2.0 * p)
}
