//! First-Order Reliability Method (FORM) for black-box performance functions.
//!
//! A reliability analysis asks how likely a system is to fail when its
//! inputs are random. The system is described by a performance function
//! `g(x)`, with `g > 0` safe and `g < 0` failed, evaluated by an external
//! [`Model`]. FORM linearizes `g` at the design point, the point on `g = 0`
//! closest to the origin in standard normal space, and reports the
//! Hasofer–Lind reliability index `β` and the failure probability `Φ(-β)`.
//!
//! # Pieces
//!
//! - [`RunModel`] evaluates a batch of physical-space points and records the
//!   samples and quantities of interest.
//! - [`form`] implements the Hasofer–Lind / Rackwitz–Fiessler iteration, its
//!   convergence policy, and the per-solver [`ResultLog`].
//!
//! # Example
//!
//! ```
//! use relia_probability::{JointDistribution, Marginal, Nataf};
//! use relia_reliability::{
//!     RunModel,
//!     form::{Config, Form, Seed},
//! };
//!
//! // Resistance minus load.
//! let joint = JointDistribution::new([
//!     Marginal::normal(10.0, 1.0).unwrap(),
//!     Marginal::normal(5.0, 1.0).unwrap(),
//! ]);
//! let mut evaluator = RunModel::from_fn(|x: &[f64; 2]| x[0] - x[1]);
//! let mut form = Form::new(Nataf::independent(joint), Config::default());
//!
//! let result = form.run(&mut evaluator, &Seed::Origin).unwrap();
//! assert!((result.beta - 5.0 / 2f64.sqrt()).abs() < 1e-6);
//! ```
//!
//! [`Model`]: relia_core::Model
//! [`ResultLog`]: form::ResultLog

mod limit_state;
mod run_model;

pub mod form;

pub use limit_state::{Direct, FnModel};
pub use run_model::{EvalError, RunModel};
