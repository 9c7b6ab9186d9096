//! Capability traits for cross-solver observers.
//!
//! These traits abstract over solver-specific event and action types, enabling
//! observers to work generically across different solvers.
//!
//! # Event traits
//!
//! - [`HasResidual`] — events that carry a residual value
//! - [`HasReliabilityIndex`] — events that carry a reliability index
//!
//! # Action traits
//!
//! - [`CanStopEarly`] — actions that can signal early termination
//!
//! # Example
//!
//! ```rust
//! use relia_core::Observer;
//! use relia_observers::traits::{CanStopEarly, HasReliabilityIndex};
//!
//! /// Stops once beta moves less than `tolerance` between events.
//! struct Settled {
//!     tolerance: f64,
//!     last: Option<f64>,
//! }
//!
//! impl<E: HasReliabilityIndex, A: CanStopEarly> Observer<E, A> for Settled {
//!     fn observe(&mut self, event: &E) -> Option<A> {
//!         let beta = event.beta()?;
//!         let settled = self.last.is_some_and(|last| (beta - last).abs() < self.tolerance);
//!         self.last = Some(beta);
//!         settled.then(A::stop_early)
//!     }
//! }
//! ```

use relia_reliability::form;
use relia_solvers::equation::bisection;

/// An event that carries a residual value.
pub trait HasResidual {
    /// Returns the residual for this event.
    fn residual(&self) -> f64;
}

/// An event that carries a Hasofer–Lind reliability index.
pub trait HasReliabilityIndex {
    /// Returns the reliability index, or `None` when the event reports a
    /// failure and no iterate is available.
    fn beta(&self) -> Option<f64>;
}

/// An action type that can signal early termination.
pub trait CanStopEarly {
    /// Returns the action that stops the solver early.
    fn stop_early() -> Self;
}

impl<I, O> HasResidual for bisection::Event<'_, I, O> {
    fn residual(&self) -> f64 {
        self.eval.residuals[0]
    }
}

impl<const N: usize> HasResidual for form::Event<'_, N> {
    /// The performance value `g` plays the role of the residual.
    fn residual(&self) -> f64 {
        self.state().map_or(f64::NAN, |state| state.g)
    }
}

impl<const N: usize> HasReliabilityIndex for form::Event<'_, N> {
    fn beta(&self) -> Option<f64> {
        self.state().map(|state| state.beta)
    }
}

impl CanStopEarly for bisection::Action {
    fn stop_early() -> Self {
        Self::StopEarly
    }
}

impl CanStopEarly for form::Action {
    fn stop_early() -> Self {
        Self::StopEarly
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::convert::Infallible;

    use approx::assert_relative_eq;
    use relia_core::{EquationProblem, Model, Observer};
    use relia_probability::{JointDistribution, Marginal, Nataf};
    use relia_reliability::{
        RunModel,
        form::{Config, ConvergenceCriteria, FiniteDifferenceStep, Seed, Status},
    };

    /// Stops as soon as `|residual|` drops below a threshold.
    struct SmallResidual(f64);

    impl<E: HasResidual, A: CanStopEarly> Observer<E, A> for SmallResidual {
        fn observe(&mut self, event: &E) -> Option<A> {
            (event.residual().abs() < self.0).then(A::stop_early)
        }
    }

    struct Square;

    impl Model for Square {
        type Input = f64;
        type Output = f64;
        type Error = Infallible;

        fn call(&self, x: &f64) -> Result<f64, Self::Error> {
            Ok(x * x)
        }
    }

    struct Two;

    impl EquationProblem<1> for Two {
        type Input = f64;
        type Output = f64;
        type Error = Infallible;

        fn input(&self, x: &[f64; 1]) -> Result<f64, Self::Error> {
            Ok(x[0])
        }

        fn residuals(&self, _input: &f64, output: &f64) -> Result<[f64; 1], Self::Error> {
            Ok([output - 2.0])
        }
    }

    #[test]
    fn same_observer_stops_bisection() {
        let solution = bisection::solve(&Square, &Two, [0.0, 2.0], &bisection::Config::default(), SmallResidual(0.1))
            .unwrap();

        assert_eq!(solution.status, bisection::Status::StoppedByObserver);
        assert!(solution.residual.abs() < 0.1);
    }

    #[test]
    fn same_observer_stops_form() {
        let nataf = Nataf::independent(JointDistribution::new([Marginal::normal(0.0, 1.0).unwrap()]));
        let criteria = ConvergenceCriteria::from_tolerances(Some(1e-14), None, None).unwrap();
        let config = Config::new(100, FiniteDifferenceStep::default(), criteria).unwrap();
        let mut evaluator = RunModel::from_fn(|x: &[f64; 1]| 2.0 - x[0] - 0.1 * x[0] * x[0]);

        let result = form::solve(&nataf, &config, &mut evaluator, &Seed::Origin, SmallResidual(0.1)).unwrap();

        assert_eq!(result.status, Status::StoppedByObserver);
        assert_relative_eq!(result.design_point_u[0], 12.0 / 7.0, epsilon = 1e-9);
    }
}
