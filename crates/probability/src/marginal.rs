use std::f64::consts::SQRT_2;

use statrs::{
    distribution::{Continuous, ContinuousCDF, LogNormal, Normal, Uniform},
    function::erf::{erf, erf_inv, erfc},
    statistics::Distribution,
};
use thiserror::Error;

use crate::std_normal;

/// Errors that can occur when constructing a marginal distribution.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum DistributionError {
    /// A parameter is non-finite or outside its valid range.
    #[error("invalid {name}: {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    /// Truncation bounds do not satisfy `a < b`.
    #[error("invalid truncation bounds: a = {a}, b = {b}")]
    InvalidBounds { a: f64, b: f64 },
}

/// A univariate continuous distribution for one random input.
///
/// Parameters follow the `loc`/`scale` convention: the standardized variable
/// is `(x - loc) / scale`. Log-normal is parameterized by its shape `s`, so
/// that `ln(x - loc)` is normal with mean `ln(scale)` and standard deviation
/// `s`. Truncated normal bounds `a` and `b` are given in standardized units.
#[derive(Debug, Clone, PartialEq)]
pub struct Marginal {
    kind: Kind,
}

#[derive(Debug, Clone, PartialEq)]
enum Kind {
    Normal { dist: Normal, loc: f64, scale: f64 },
    Lognormal { dist: LogNormal, s: f64, loc: f64, scale: f64 },
    Uniform { dist: Uniform, loc: f64, scale: f64 },
    TruncatedNormal(Truncated),
    Levy { loc: f64, scale: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Truncated {
    a: f64,
    b: f64,
    loc: f64,
    scale: f64,
    cdf_a: f64,
    sf_b: f64,
    mass: f64,
}

impl Marginal {
    /// Normal distribution with mean `loc` and standard deviation `scale`.
    ///
    /// # Errors
    ///
    /// Returns an error if `loc` is non-finite or `scale` is not positive.
    pub fn normal(loc: f64, scale: f64) -> Result<Self, DistributionError> {
        check_loc(loc)?;
        check_scale(scale)?;
        let dist = Normal::new(loc, scale).map_err(|_| invalid("scale", scale))?;
        Ok(Self {
            kind: Kind::Normal { dist, loc, scale },
        })
    }

    /// Shifted log-normal distribution with shape `s`.
    ///
    /// # Errors
    ///
    /// Returns an error if `loc` is non-finite or `s`/`scale` is not positive.
    pub fn lognormal(s: f64, loc: f64, scale: f64) -> Result<Self, DistributionError> {
        if !(s.is_finite() && s > 0.0) {
            return Err(invalid("s", s));
        }
        check_loc(loc)?;
        check_scale(scale)?;
        let dist = LogNormal::new(scale.ln(), s).map_err(|_| invalid("s", s))?;
        Ok(Self {
            kind: Kind::Lognormal { dist, s, loc, scale },
        })
    }

    /// Uniform distribution on `[loc, loc + scale]`.
    ///
    /// # Errors
    ///
    /// Returns an error if `loc` is non-finite or `scale` is not positive.
    pub fn uniform(loc: f64, scale: f64) -> Result<Self, DistributionError> {
        check_loc(loc)?;
        check_scale(scale)?;
        let dist = Uniform::new(loc, loc + scale).map_err(|_| invalid("scale", scale))?;
        Ok(Self {
            kind: Kind::Uniform { dist, loc, scale },
        })
    }

    /// Normal distribution truncated to the standardized interval `[a, b]`.
    ///
    /// Either bound may be infinite.
    ///
    /// # Errors
    ///
    /// Returns an error if `a >= b`, if either bound is NaN, or if the
    /// interval carries no probability mass.
    pub fn truncated_normal(a: f64, b: f64, loc: f64, scale: f64) -> Result<Self, DistributionError> {
        check_loc(loc)?;
        check_scale(scale)?;
        if a.is_nan() || b.is_nan() || a >= b {
            return Err(DistributionError::InvalidBounds { a, b });
        }
        let cdf_a = std_normal::cdf(a);
        let sf_b = std_normal::cdf(-b);
        let mass = 1.0 - cdf_a - sf_b;
        if mass <= 0.0 {
            return Err(DistributionError::InvalidBounds { a, b });
        }
        Ok(Self {
            kind: Kind::TruncatedNormal(Truncated {
                a,
                b,
                loc,
                scale,
                cdf_a,
                sf_b,
                mass,
            }),
        })
    }

    /// Lévy distribution with location `loc` and scale `scale`.
    ///
    /// The Lévy distribution is heavy tailed: its mean and variance are
    /// infinite, so it can only be used with independent or directly
    /// specified `Z`-space correlation.
    ///
    /// # Errors
    ///
    /// Returns an error if `loc` is non-finite or `scale` is not positive.
    pub fn levy(loc: f64, scale: f64) -> Result<Self, DistributionError> {
        check_loc(loc)?;
        check_scale(scale)?;
        Ok(Self {
            kind: Kind::Levy { loc, scale },
        })
    }

    /// Cumulative distribution function `F(x)`.
    #[must_use]
    pub fn cdf(&self, x: f64) -> f64 {
        match &self.kind {
            Kind::Normal { dist, .. } => dist.cdf(x),
            Kind::Lognormal { dist, loc, .. } => dist.cdf(x - loc),
            Kind::Uniform { dist, .. } => dist.cdf(x),
            Kind::TruncatedNormal(t) => {
                let xi = ((x - t.loc) / t.scale).clamp(t.a, t.b);
                ((std_normal::cdf(xi) - t.cdf_a) / t.mass).clamp(0.0, 1.0)
            }
            Kind::Levy { loc, scale } => {
                let y = (x - loc) / scale;
                if y <= 0.0 { 0.0 } else { erfc((0.5 / y).sqrt()) }
            }
        }
    }

    /// Inverse cumulative distribution function `F⁻¹(p)`.
    ///
    /// Returns NaN for `p` outside `[0, 1]`.
    #[must_use]
    pub fn icdf(&self, p: f64) -> f64 {
        if !(0.0..=1.0).contains(&p) {
            return f64::NAN;
        }
        match &self.kind {
            Kind::Normal { dist, .. } => dist.inverse_cdf(p),
            Kind::Lognormal { s, loc, scale, .. } => loc + scale * (s * std_normal::icdf(p)).exp(),
            Kind::Uniform { loc, scale, .. } => loc + scale * p,
            Kind::TruncatedNormal(t) => {
                let xi = std_normal::icdf(t.cdf_a + p * t.mass).clamp(t.a, t.b);
                t.loc + t.scale * xi
            }
            Kind::Levy { loc, scale } => {
                let q = std_normal::icdf(1.0 - 0.5 * p);
                loc + scale / (q * q)
            }
        }
    }

    /// Probability density function `f(x)`.
    #[must_use]
    pub fn pdf(&self, x: f64) -> f64 {
        match &self.kind {
            Kind::Normal { dist, .. } => dist.pdf(x),
            Kind::Lognormal { dist, loc, .. } => {
                if x <= *loc { 0.0 } else { dist.pdf(x - loc) }
            }
            Kind::Uniform { dist, .. } => dist.pdf(x),
            Kind::TruncatedNormal(t) => {
                let xi = (x - t.loc) / t.scale;
                if xi < t.a || xi > t.b {
                    0.0
                } else {
                    std_normal::pdf(xi) / (t.scale * t.mass)
                }
            }
            Kind::Levy { loc, scale } => {
                let y = (x - loc) / scale;
                if y <= 0.0 {
                    0.0
                } else {
                    std_normal::pdf(1.0 / y.sqrt()) / (scale * y.powf(1.5))
                }
            }
        }
    }

    /// Maps a standard normal value to this distribution, `F⁻¹(Φ(z))`.
    ///
    /// Normal and log-normal marginals use their closed forms. The others
    /// take the upper half through the survival function, so the result
    /// stays finite wherever `Φ(-z)` is representable.
    #[must_use]
    pub fn z_to_x(&self, z: f64) -> f64 {
        match &self.kind {
            Kind::Normal { loc, scale, .. } => loc + scale * z,
            Kind::Lognormal { s, loc, scale, .. } => loc + scale * (s * z).exp(),
            Kind::Uniform { loc, scale, .. } => {
                let p = if z <= 0.0 { std_normal::cdf(z) } else { 1.0 - std_normal::cdf(-z) };
                loc + scale * p
            }
            Kind::TruncatedNormal(t) => {
                let xi = if z <= 0.0 {
                    std_normal::icdf(t.cdf_a + std_normal::cdf(z) * t.mass)
                } else {
                    -std_normal::icdf(t.sf_b + std_normal::cdf(-z) * t.mass)
                };
                t.loc + t.scale * xi.clamp(t.a, t.b)
            }
            Kind::Levy { loc, scale } => {
                // F(x) = 2 Φ(-1/√y), so 1/√y = -Φ⁻¹(Φ(z) / 2) = √2 erf⁻¹(Φ(-z)).
                let q = SQRT_2 * erf_inv(std_normal::cdf(-z));
                loc + scale / (q * q)
            }
        }
    }

    /// Maps a value of this distribution to standard normal space,
    /// `Φ⁻¹(F(x))`.
    ///
    /// The inverse of [`Marginal::z_to_x`].
    #[must_use]
    pub fn x_to_z(&self, x: f64) -> f64 {
        match &self.kind {
            Kind::Normal { loc, scale, .. } => (x - loc) / scale,
            Kind::Lognormal { s, loc, scale, .. } => {
                if x <= *loc {
                    f64::NEG_INFINITY
                } else {
                    ((x - loc) / scale).ln() / s
                }
            }
            Kind::Uniform { loc, scale, .. } => {
                let p = ((x - loc) / scale).clamp(0.0, 1.0);
                from_tails(p, 1.0 - p)
            }
            Kind::TruncatedNormal(t) => {
                let xi = ((x - t.loc) / t.scale).clamp(t.a, t.b);
                let lower = (std_normal::cdf(xi) - t.cdf_a) / t.mass;
                let upper = (std_normal::cdf(-xi) - t.sf_b) / t.mass;
                from_tails(lower.clamp(0.0, 1.0), upper.clamp(0.0, 1.0))
            }
            Kind::Levy { loc, scale } => {
                let y = (x - loc) / scale;
                if y <= 0.0 {
                    f64::NEG_INFINITY
                } else {
                    let w = (0.5 / y).sqrt();
                    from_tails(erfc(w), erf(w))
                }
            }
        }
    }

    /// Derivative `dx/dz` of [`Marginal::z_to_x`], `φ(z) / f(x(z))`.
    #[must_use]
    pub fn dx_dz(&self, z: f64) -> f64 {
        match &self.kind {
            Kind::Normal { scale, .. } => *scale,
            Kind::Lognormal { s, scale, .. } => scale * s * (s * z).exp(),
            _ => std_normal::pdf(z) / self.pdf(self.z_to_x(z)),
        }
    }

    /// Mean of the distribution, or `None` if it is not finite.
    #[must_use]
    pub fn mean(&self) -> Option<f64> {
        match &self.kind {
            Kind::Normal { loc, .. } => Some(*loc),
            Kind::Lognormal { dist, loc, .. } => dist.mean().map(|m| loc + m),
            Kind::Uniform { dist, .. } => dist.mean(),
            Kind::TruncatedNormal(t) => Some(t.loc + t.scale * t.standard_mean()),
            Kind::Levy { .. } => None,
        }
    }

    /// Standard deviation of the distribution, or `None` if it is not finite.
    #[must_use]
    pub fn std_dev(&self) -> Option<f64> {
        match &self.kind {
            Kind::Normal { scale, .. } => Some(*scale),
            Kind::Lognormal { dist, .. } => dist.std_dev(),
            Kind::Uniform { dist, .. } => dist.std_dev(),
            Kind::TruncatedNormal(t) => Some(t.scale * t.standard_variance().sqrt()),
            Kind::Levy { .. } => None,
        }
    }
}

impl Truncated {
    fn standard_mean(&self) -> f64 {
        (std_normal::pdf(self.a) - std_normal::pdf(self.b)) / self.mass
    }

    fn standard_variance(&self) -> f64 {
        let edge = |z: f64| if z.is_finite() { z * std_normal::pdf(z) } else { 0.0 };
        let mean = self.standard_mean();
        1.0 + (edge(self.a) - edge(self.b)) / self.mass - mean * mean
    }
}

/// `Φ⁻¹` of a probability given with its complement, inverting whichever
/// tail is smaller.
fn from_tails(lower: f64, upper: f64) -> f64 {
    if lower <= 0.5 {
        std_normal::icdf(lower)
    } else {
        -std_normal::icdf(upper)
    }
}

fn invalid(name: &'static str, value: f64) -> DistributionError {
    DistributionError::InvalidParameter { name, value }
}

fn check_loc(loc: f64) -> Result<(), DistributionError> {
    if loc.is_finite() { Ok(()) } else { Err(invalid("loc", loc)) }
}

fn check_scale(scale: f64) -> Result<(), DistributionError> {
    if scale.is_finite() && scale > 0.0 {
        Ok(())
    } else {
        Err(invalid("scale", scale))
    }
}
