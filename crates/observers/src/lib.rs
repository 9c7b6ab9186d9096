//! Reusable observers for relia solvers.
//!
//! This crate provides [`Observer`] implementations and capability traits that
//! work across the bisection and FORM solvers.
//!
//! # Modules
//!
//! - [`traits`] — Capability traits for cross-solver observers
//!   ([`HasResidual`], [`HasReliabilityIndex`], [`CanStopEarly`])
//!
//! # Observers
//!
//! - [`LogObserver`] — forwards solver events to the `log` facade as
//!   `key=value` lines.
//!
//! [`Observer`]: relia_core::Observer
//! [`HasResidual`]: traits::HasResidual
//! [`HasReliabilityIndex`]: traits::HasReliabilityIndex
//! [`CanStopEarly`]: traits::CanStopEarly

pub mod traits;

mod logging;

pub use logging::{LogObserver, Loggable};
