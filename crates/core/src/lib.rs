//! Core traits and types for the relia reliability toolkit.
//!
//! This crate defines the shared abstractions that solvers, observers, and
//! models build on:
//!
//! - [`Model`] — a black-box callable that maps a typed input to a typed output
//! - [`Snapshot`] — a captured input/output pair from a model call
//! - [`Observer`] — receives solver events and optionally returns control actions
//! - [`EquationProblem`], [`LimitStateProblem`] — problem traits that adapt
//!   solver variables to model inputs and extract residuals or performance
//!   values from outputs

mod model;
mod observer;
mod problems;

pub use observer::Observer;
pub use problems::{EquationProblem, LimitStateProblem};
pub use {model::Model, model::Snapshot};
