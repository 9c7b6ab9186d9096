//! Scalar root finders for the relia toolkit.
//!
//! Solvers in this crate drive [`EquationProblem`] residuals toward zero by
//! calling a black-box [`Model`]. The probabilistic transform uses them to
//! invert correlation distortions; they are equally usable on their own.
//!
//! [`EquationProblem`]: relia_core::EquationProblem
//! [`Model`]: relia_core::Model

pub mod equation;
