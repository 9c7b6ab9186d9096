//! Bisection for scalar root finding.
//!
//! # Algorithm
//!
//! Bisection keeps a bracket `[left, right]` whose endpoint residuals have
//! opposite signs, evaluates the midpoint, and replaces the endpoint that
//! shares the midpoint's sign. The bracket width halves every iteration, so
//! convergence is guaranteed for any continuous residual with a sign change.
//!
//! # Termination
//!
//! The solver reports [`Status::Converged`] when the best residual magnitude
//! is within `residual_tol`, or when the bracket width satisfies
//! `x_abs_tol + x_rel_tol * |midpoint|`. Otherwise it stops with
//! [`Status::MaxIters`] and returns the best evaluation seen.
//!
//! # Observer Events
//!
//! The solver emits one [`Event`] per midpoint evaluation. Endpoint
//! evaluations are not observed. Observers can return [`Action::StopEarly`]
//! to halt with the best evaluation found so far.

mod action;
mod best;
mod bracket;
mod config;
mod error;
mod event;
mod solution;

#[cfg(test)]
mod tests;

pub use action::Action;
pub use bracket::{BracketError, Sign};
pub use config::{Config, ConfigError};
pub use error::Error;
pub use event::Event;
pub use solution::{Solution, Status};

use relia_core::{EquationProblem, Model, Observer};

use crate::equation::{EvalError, Evaluation, evaluate};

use best::Best;
use bracket::{Bounds, Bracket};

/// Finds a root of a scalar equation problem using bisection.
///
/// The observer receives an [`Event`] after each midpoint evaluation.
///
/// # Errors
///
/// Returns an error if the bracket is invalid or does not contain a sign
/// change, if a residual is not finite, or if the model or problem fails.
pub fn solve<M, P, Obs>(
    model: &M,
    problem: &P,
    bracket: [f64; 2],
    config: &Config,
    mut observer: Obs,
) -> Result<Solution<M::Input, M::Output>, Error>
where
    M: Model,
    P: EquationProblem<1, Input = M::Input, Output = M::Output>,
    Obs: for<'a> Observer<Event<'a, M::Input, M::Output>, Action>,
{
    let bounds = Bounds::new(bracket)?;
    let [left, right] = bounds.as_array();

    let left_eval = eval_at(model, problem, left)?;
    let left_sign = Sign::of(left_eval.residuals[0]);
    let right_eval = eval_at(model, problem, right)?;
    let right_sign = Sign::of(right_eval.residuals[0]);

    let mut best = Best::new(left_eval);
    best.update(right_eval);
    if best.is_residual_converged(config.residual_tol()) {
        return Ok(best.finish(Status::Converged, 0));
    }

    let mut bracket = Bracket::new(bounds, left_sign, right_sign)?;

    for iter in 1..=config.max_iters() {
        if bracket.is_x_converged(config.x_abs_tol(), config.x_rel_tol()) {
            return Ok(best.finish(Status::Converged, iter - 1));
        }

        let mid = bracket.midpoint();
        let eval = eval_at(model, problem, mid)?;
        let residual = eval.residuals[0];

        let event = Event {
            iter,
            bracket: bracket.as_array(),
            eval: &eval,
        };
        let action = observer.observe(&event);

        bracket.shrink(mid, Sign::of(residual));
        best.update(eval);

        if let Some(Action::StopEarly) = action {
            return Ok(best.finish(Status::StoppedByObserver, iter));
        }
        if best.is_residual_converged(config.residual_tol()) {
            return Ok(best.finish(Status::Converged, iter));
        }
    }

    Ok(best.finish(Status::MaxIters, config.max_iters()))
}

/// Finds a root using bisection without observer support.
///
/// This is a convenience wrapper around [`solve`] that uses a no-op observer.
///
/// # Errors
///
/// Returns an error if the bracket is invalid or does not contain a sign
/// change, if a residual is not finite, or if the model or problem fails.
pub fn solve_unobserved<M, P>(
    model: &M,
    problem: &P,
    bracket: [f64; 2],
    config: &Config,
) -> Result<Solution<M::Input, M::Output>, Error>
where
    M: Model,
    P: EquationProblem<1, Input = M::Input, Output = M::Output>,
{
    solve(model, problem, bracket, config, ())
}

/// Evaluates at a scalar `x`, attaching `x` to any failure.
fn eval_at<M, P>(model: &M, problem: &P, x: f64) -> Result<Evaluation<M::Input, M::Output, 1>, Error>
where
    M: Model,
    P: EquationProblem<1, Input = M::Input, Output = M::Output>,
{
    evaluate(model, problem, [x]).map_err(|err| match err {
        EvalError::Model(source) => Error::Model {
            x,
            source: Box::new(source),
        },
        EvalError::Problem(source) => Error::Problem {
            x,
            source: Box::new(source),
        },
        EvalError::NonFiniteResidual { value, .. } => Error::NonFiniteResidual { x, residual: value },
    })
}
