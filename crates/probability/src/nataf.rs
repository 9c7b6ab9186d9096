//! The Nataf transform between physical and standard normal space.
//!
//! Three spaces are involved:
//!
//! - `X`: physical space, distributed according to the marginals.
//! - `Z`: correlated standard normal space, `zᵢ = Φ⁻¹(Fᵢ(xᵢ))`.
//! - `U`: uncorrelated standard normal space, `z = L u` where `L` is the
//!   Cholesky factor of the `Z`-space correlation.
//!
//! When the correlation is known in `X`, each coefficient is mapped to `Z`
//! by solving the Nataf integral equation (see [`Nataf::with_corr_x`]).

mod distortion;

use nalgebra::{SMatrix, SVector};
use thiserror::Error;

use relia_solvers::equation::bisection;

use crate::{Correlation, CorrelationError, JointDistribution, QuadratureError};

/// Errors that can occur when constructing a Nataf transform.
#[derive(Debug, Error)]
pub enum NatafError {
    /// Correlation was supplied in both `X` and `Z` space.
    #[error("correlation given in both X and Z space")]
    DualCorrelation,

    /// The assembled `Z`-space correlation is invalid.
    #[error("invalid Z-space correlation")]
    Correlation(#[from] CorrelationError),

    /// A marginal has no finite mean or variance.
    #[error("marginal {index} has no finite mean or variance")]
    UndefinedMoment { index: usize },

    /// No `Z`-space coefficient reproduces the requested `X` correlation.
    #[error("X correlation {target} between {row} and {col} is not attainable")]
    Unattainable { row: usize, col: usize, target: f64 },

    /// Building the quadrature rule failed.
    #[error("quadrature failed")]
    Quadrature(#[from] QuadratureError),

    /// Solving the distortion equation failed.
    #[error("distortion solve failed for ({row}, {col})")]
    Distortion {
        row: usize,
        col: usize,
        #[source]
        source: bisection::Error,
    },
}

/// Maps points between physical space `X` and standard normal space `U`.
#[derive(Debug, Clone, PartialEq)]
pub struct Nataf<const N: usize> {
    joint: JointDistribution<N>,
    corr_z: Correlation<N>,
}

impl<const N: usize> Nataf<N> {
    /// A transform with independent variables.
    #[must_use]
    pub fn independent(joint: JointDistribution<N>) -> Self {
        Self {
            joint,
            corr_z: Correlation::identity(),
        }
    }

    /// A transform with correlation specified directly in `Z` space.
    #[must_use]
    pub fn with_corr_z(joint: JointDistribution<N>, corr_z: Correlation<N>) -> Self {
        Self { joint, corr_z }
    }

    /// A transform with correlation specified in `X` space.
    ///
    /// Each off-diagonal coefficient `ρx` is matched by finding `ρz` such
    /// that the Gauss–Hermite estimate of the `X` correlation under a
    /// bivariate normal with coefficient `ρz` equals `ρx`.
    ///
    /// # Errors
    ///
    /// Returns an error if a marginal lacks finite moments, if a coefficient
    /// cannot be reproduced, or if the resulting matrix is not a valid
    /// correlation.
    pub fn with_corr_x(joint: JointDistribution<N>, corr_x: &Correlation<N>) -> Result<Self, NatafError> {
        let corr_z = distortion::corr_z_from_corr_x(&joint, corr_x)?;
        Ok(Self { joint, corr_z })
    }

    /// Builds a transform from optional `X`- or `Z`-space correlation.
    ///
    /// With neither, the variables are independent.
    ///
    /// # Errors
    ///
    /// Returns [`NatafError::DualCorrelation`] if both are given, or any
    /// error from [`Nataf::with_corr_x`].
    pub fn from_parts(
        joint: JointDistribution<N>,
        corr_x: Option<&Correlation<N>>,
        corr_z: Option<Correlation<N>>,
    ) -> Result<Self, NatafError> {
        match (corr_x, corr_z) {
            (Some(_), Some(_)) => Err(NatafError::DualCorrelation),
            (Some(corr_x), None) => Self::with_corr_x(joint, corr_x),
            (None, Some(corr_z)) => Ok(Self::with_corr_z(joint, corr_z)),
            (None, None) => Ok(Self::independent(joint)),
        }
    }

    /// Returns the joint distribution.
    #[must_use]
    pub fn joint(&self) -> &JointDistribution<N> {
        &self.joint
    }

    /// Returns the `Z`-space correlation.
    #[must_use]
    pub fn corr_z(&self) -> &Correlation<N> {
        &self.corr_z
    }

    /// Maps `X → Z` with `zᵢ = Φ⁻¹(Fᵢ(xᵢ))`.
    ///
    /// See [`Marginal::x_to_z`](crate::Marginal::x_to_z).
    #[must_use]
    pub fn x_to_z(&self, x: &SVector<f64, N>) -> SVector<f64, N> {
        SVector::from_fn(|i, _| self.joint.marginal(i).x_to_z(x[i]))
    }

    /// Maps `Z → X` with `xᵢ = Fᵢ⁻¹(Φ(zᵢ))`.
    ///
    /// Normal marginals map exactly as `loc + scale · z`.
    #[must_use]
    pub fn z_to_x(&self, z: &SVector<f64, N>) -> SVector<f64, N> {
        SVector::from_fn(|i, _| self.joint.marginal(i).z_to_x(z[i]))
    }

    /// Maps `U → Z` with `z = L u`.
    #[must_use]
    pub fn correlate(&self, u: &SVector<f64, N>) -> SVector<f64, N> {
        self.corr_z.mul_cholesky(u)
    }

    /// Maps `Z → U` with `u = L⁻¹ z`.
    #[must_use]
    pub fn decorrelate(&self, z: &SVector<f64, N>) -> SVector<f64, N> {
        self.corr_z.solve_cholesky(z)
    }

    /// Maps `U → X`.
    #[must_use]
    pub fn u_to_x(&self, u: &SVector<f64, N>) -> SVector<f64, N> {
        self.z_to_x(&self.correlate(u))
    }

    /// Maps `X → U`.
    #[must_use]
    pub fn x_to_u(&self, x: &SVector<f64, N>) -> SVector<f64, N> {
        self.decorrelate(&self.x_to_z(x))
    }

    /// Jacobian `∂x/∂z`, which is diagonal with entries `φ(zᵢ) / fᵢ(xᵢ)`.
    #[must_use]
    pub fn jacobian_xz(&self, z: &SVector<f64, N>) -> SMatrix<f64, N, N> {
        SMatrix::from_diagonal(&SVector::from_fn(|i, _| self.joint.marginal(i).dx_dz(z[i])))
    }

    /// Jacobian `∂x/∂u = J_xz · L`, evaluated at `u`.
    #[must_use]
    pub fn jacobian_xu(&self, u: &SVector<f64, N>) -> SMatrix<f64, N, N> {
        self.jacobian_xz(&self.correlate(u)) * self.corr_z.cholesky()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::Marginal;

    fn normals() -> JointDistribution<2> {
        JointDistribution::new([
            Marginal::normal(10.0, 2.0).unwrap(),
            Marginal::normal(-1.0, 0.5).unwrap(),
        ])
    }

    fn mixed() -> JointDistribution<3> {
        JointDistribution::new([
            Marginal::lognormal(0.3, 0.0, 5.0).unwrap(),
            Marginal::uniform(1.0, 2.0).unwrap(),
            Marginal::normal(0.0, 1.0).unwrap(),
        ])
    }

    #[test]
    fn independent_normals_are_affine() {
        let nataf = Nataf::independent(normals());
        let u = SVector::<f64, 2>::new(1.5, -2.0);

        let x = nataf.u_to_x(&u);

        assert_eq!(x, SVector::<f64, 2>::new(13.0, -2.0));
        assert_eq!(nataf.x_to_u(&x), u);
        assert_eq!(nataf.jacobian_xu(&u), SMatrix::<f64, 2, 2>::new(2.0, 0.0, 0.0, 0.5));
    }

    #[test]
    fn correlated_round_trip() {
        let corr_z = Correlation::new([[1.0, 0.4, 0.1], [0.4, 1.0, -0.2], [0.1, -0.2, 1.0]]).unwrap();
        let nataf = Nataf::with_corr_z(mixed(), corr_z);
        let u = SVector::<f64, 3>::new(0.2, -0.7, 1.1);

        assert_relative_eq!(nataf.x_to_u(&nataf.u_to_x(&u)), u, epsilon = 1e-8);
    }

    #[test]
    fn jacobian_matches_finite_differences() {
        let corr_z = Correlation::new([[1.0, 0.6, 0.0], [0.6, 1.0, 0.3], [0.0, 0.3, 1.0]]).unwrap();
        let nataf = Nataf::with_corr_z(mixed(), corr_z);
        let u = SVector::<f64, 3>::new(0.4, 0.1, -0.5);
        let h = 1e-6;

        let jac = nataf.jacobian_xu(&u);

        for j in 0..3 {
            let mut step = SVector::<f64, 3>::zeros();
            step[j] = h;
            let column = (nataf.u_to_x(&(u + step)) - nataf.u_to_x(&(u - step))) / (2.0 * h);
            for i in 0..3 {
                assert_relative_eq!(jac[(i, j)], column[i], epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn normal_marginals_keep_correlation() {
        let corr_x = Correlation::new([[1.0, 0.7], [0.7, 1.0]]).unwrap();

        let nataf = Nataf::with_corr_x(normals(), &corr_x).unwrap();

        assert_relative_eq!(nataf.corr_z().get(0, 1), 0.7, epsilon = 1e-8);
        assert_relative_eq!(nataf.corr_z().get(1, 0), 0.7, epsilon = 1e-8);
    }

    #[test]
    fn normal_x_correlation_solves_across_signs() {
        for rho in [-0.5, 0.5, 0.9] {
            let corr_x = Correlation::new([[1.0, rho], [rho, 1.0]]).unwrap();

            let nataf = Nataf::with_corr_x(normals(), &corr_x).unwrap();

            assert_relative_eq!(nataf.corr_z().get(0, 1), rho, epsilon = 1e-8);
        }
    }

    #[test]
    fn far_tail_maps_to_finite_points() {
        let nataf = Nataf::independent(normals());

        let high = nataf.u_to_x(&SVector::<f64, 2>::new(8.5, -8.5));

        assert_eq!(high, SVector::<f64, 2>::new(27.0, -5.25));
    }

    #[test]
    fn lognormal_correlation_is_amplified() {
        let joint = JointDistribution::new([
            Marginal::lognormal(0.5, 0.0, 1.0).unwrap(),
            Marginal::lognormal(0.5, 0.0, 1.0).unwrap(),
        ]);
        let corr_x = Correlation::new([[1.0, 0.5], [0.5, 1.0]]).unwrap();

        let nataf = Nataf::with_corr_x(joint, &corr_x).unwrap();

        // Closed form for equal shapes: ρz = ln(1 + ρx (e^{s²} - 1)) / s².
        let s2: f64 = 0.25;
        let expected = (1.0 + 0.5 * (s2.exp() - 1.0)).ln() / s2;
        assert_relative_eq!(nataf.corr_z().get(0, 1), expected, epsilon = 1e-6);
    }

    #[test]
    fn dual_correlation_is_rejected() {
        let corr = Correlation::identity();
        let result = Nataf::from_parts(normals(), Some(&corr), Some(corr.clone()));

        assert!(matches!(result, Err(NatafError::DualCorrelation)));
    }

    #[test]
    fn infinite_moments_are_rejected_for_x_correlation() {
        let joint = JointDistribution::new([
            Marginal::levy(0.0, 1.0).unwrap(),
            Marginal::normal(0.0, 1.0).unwrap(),
        ]);
        let corr_x = Correlation::new([[1.0, 0.3], [0.3, 1.0]]).unwrap();

        let result = Nataf::with_corr_x(joint, &corr_x);

        assert!(matches!(result, Err(NatafError::UndefinedMoment { index: 0 })));
    }
}
