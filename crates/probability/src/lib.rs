//! Probability distributions and the Nataf transform.
//!
//! Reliability methods work in standard normal space `U`, where the
//! variables are independent with zero mean and unit variance. This crate
//! supplies the pieces needed to move between that space and the physical
//! space `X` of a model's random inputs:
//!
//! - [`Marginal`] univariate distributions and the [`JointDistribution`]
//!   that groups them.
//! - [`Correlation`] matrices with a stored Cholesky factor.
//! - [`Nataf`], which maps `X → Z → U` and back, and provides the Jacobian
//!   of the mapping.
//!
//! Standard normal helpers live in [`std_normal`].

mod correlation;
mod joint;
mod marginal;
mod nataf;
mod quadrature;

pub mod std_normal;

pub use correlation::{Correlation, CorrelationError};
pub use joint::JointDistribution;
pub use marginal::{DistributionError, Marginal};
pub use nataf::{Nataf, NatafError};
pub use quadrature::{GaussHermite, QuadratureError};
