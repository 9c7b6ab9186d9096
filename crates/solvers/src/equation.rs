//! Root finding for [`EquationProblem`]s.
//!
//! The shared [`evaluate`] step maps solver variables through the problem,
//! calls the model, and rejects non-finite residuals. [`bisection`] builds on
//! it for bracketed scalar roots, which is what the Nataf correlation
//! distortion needs.
//!
//! [`EquationProblem`]: relia_core::EquationProblem

mod evaluate;

pub mod bisection;

pub use evaluate::{EvalError, EvaluateResult, Evaluation, evaluate};
