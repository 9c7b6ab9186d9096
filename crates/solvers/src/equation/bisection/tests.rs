use std::convert::Infallible;

use approx::assert_relative_eq;
use thiserror::Error as ThisError;

use relia_core::{EquationProblem, Model};

use super::{Action, BracketError, Config, Error, Event, Status, solve, solve_unobserved};

/// Cubic model: f(x) = x³.
struct Cube;

impl Model for Cube {
    type Input = f64;
    type Output = f64;
    type Error = Infallible;

    fn call(&self, x: &f64) -> Result<f64, Self::Error> {
        Ok(x.powi(3))
    }
}

/// Drives the model output to a target value.
struct Target(f64);

impl EquationProblem<1> for Target {
    type Input = f64;
    type Output = f64;
    type Error = Infallible;

    fn input(&self, x: &[f64; 1]) -> Result<f64, Self::Error> {
        Ok(x[0])
    }

    fn residuals(&self, _input: &f64, output: &f64) -> Result<[f64; 1], Self::Error> {
        Ok([output - self.0])
    }
}

#[test]
fn finds_cube_root() {
    let solution = solve_unobserved(&Cube, &Target(27.0), [0.0, 10.0], &Config::default())
        .expect("should converge");

    assert_eq!(solution.status, Status::Converged);
    assert_relative_eq!(solution.x, 3.0, epsilon = 1e-10);
    assert_relative_eq!(solution.snapshot.output, 27.0, epsilon = 1e-9);
}

#[test]
fn finds_negative_root_with_reversed_bracket() {
    let solution = solve_unobserved(&Cube, &Target(-8.0), [1.0, -5.0], &Config::default())
        .expect("should converge");

    assert_eq!(solution.status, Status::Converged);
    assert_relative_eq!(solution.x, -2.0, epsilon = 1e-10);
}

#[test]
fn endpoint_root_converges_without_iterating() {
    let solution = solve_unobserved(&Cube, &Target(1.0), [1.0, 4.0], &Config::default())
        .expect("should converge");

    assert_eq!(solution.status, Status::Converged);
    assert_eq!(solution.iters, 0);
    assert_relative_eq!(solution.x, 1.0);
}

#[test]
fn errors_without_sign_change() {
    let result = solve_unobserved(&Cube, &Target(-1.0), [0.0, 2.0], &Config::default());

    assert!(matches!(
        result,
        Err(Error::InvalidBracket(BracketError::NoSignChange))
    ));
}

#[test]
fn max_iters_returns_best_evaluation() {
    let config = Config::new(3, 0.0, 0.0, 0.0).expect("valid config");

    let solution =
        solve_unobserved(&Cube, &Target(27.0), [0.0, 10.0], &config).expect("should finish");

    // Midpoints 5.0, 2.5, 3.75: residuals 98, -11.375, 25.7 → best is 2.5.
    assert_eq!(solution.status, Status::MaxIters);
    assert_eq!(solution.iters, 3);
    assert_relative_eq!(solution.x, 2.5);
}

#[test]
fn observer_can_stop_early() {
    let mut seen = Vec::new();
    let observer = |event: &Event<'_, f64, f64>| {
        seen.push(event.iter);
        (event.iter == 2).then_some(Action::StopEarly)
    };

    let solution = solve(&Cube, &Target(27.0), [0.0, 10.0], &Config::default(), observer)
        .expect("should stop cleanly");

    assert_eq!(solution.status, Status::StoppedByObserver);
    assert_eq!(solution.iters, 2);
    assert_eq!(seen, vec![1, 2]);
}

#[derive(Debug, ThisError)]
#[error("diverged at {0}")]
struct Diverged(f64);

/// Model that fails above a threshold.
struct FailsAbove(f64);

impl Model for FailsAbove {
    type Input = f64;
    type Output = f64;
    type Error = Diverged;

    fn call(&self, x: &f64) -> Result<f64, Self::Error> {
        if *x > self.0 { Err(Diverged(*x)) } else { Ok(*x) }
    }
}

#[test]
fn model_failure_is_propagated() {
    let result = solve_unobserved(&FailsAbove(5.0), &Target(1.0), [0.0, 10.0], &Config::default());

    assert!(matches!(result, Err(Error::Model { x, .. }) if x == 10.0));
}
