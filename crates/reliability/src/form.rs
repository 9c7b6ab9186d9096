//! The First-Order Reliability Method.
//!
//! # Algorithm
//!
//! FORM searches standard normal space `U` for the design point with the
//! Hasofer–Lind / Rackwitz–Fiessler (HL-RF) iteration. Starting from a seed
//! `u₀`, each iteration `k`:
//!
//! 1. maps `u_k` to `x_k` through the [`Nataf`] transform,
//! 2. evaluates `g(x_k)` and the central-difference gradient `∇g` with
//!    respect to `u` in a single batch of `2N + 1` model calls,
//! 3. forms the direction cosines `α = ∇g / ‖∇g‖` and the index
//!    `β_k = -u_k · α`,
//! 4. steps to `β_{k+1} = β_k + g(x_k) / ‖∇g‖` and `u_{k+1} = -β_{k+1} α`.
//!
//! # Termination
//!
//! After each update the step, index and gradient changes are checked by the
//! [`ConvergenceCriteria`] policy. On convergence at iteration `k` the result
//! reports `u_k`, `x_k` and `β_k` after `k + 1` iterations. When the
//! iteration cap is reached the run is not an error: it is logged, reported
//! with [`Status::MaxIters`], and carries the iterate with the smallest
//! `|g|`. The failure probability is always `Φ(-β)`.
//!
//! # Observer Events
//!
//! Observers receive [`Event::Iteration`] after every update and may return
//! [`Action::StopEarly`] to end the run at that iterate.
//! [`Event::EvaluationFailed`] precedes every fatal error raised inside the
//! loop, whether the batch failed or its gradient vanished, and
//! [`Event::NotConverged`] precedes a capped result.
//!
//! [`Nataf`]: relia_probability::Nataf

mod action;
mod best;
mod config;
mod criteria;
mod error;
mod event;
mod gradient;
mod results;
mod seed;
mod solution;
mod state;


pub use action::Action;
pub use config::{Config, ConfigError};
pub use criteria::{ConvergenceCriteria, Criterion, DEFAULT_TOLERANCE, Errors, Reducer};
pub use error::Error;
pub use event::Event;
pub use gradient::FiniteDifferenceStep;
pub use results::ResultLog;
pub use seed::Seed;
pub use solution::{History, RunResult, Status};
pub use state::IterationState;

use log::{debug, info, warn};
use nalgebra::SVector;

use relia_core::{LimitStateProblem, Model, Observer};
use relia_probability::{Nataf, std_normal};

use crate::RunModel;

use best::Best;

/// A FORM solver bound to a transform and a configuration.
///
/// The solver owns a [`ResultLog`]: each run appends its result so that runs
/// from different seeds can be compared afterwards.
#[derive(Debug, Clone)]
pub struct Form<const N: usize> {
    nataf: Nataf<N>,
    config: Config<N>,
    results: ResultLog<N>,
}

impl<const N: usize> Form<N> {
    #[must_use]
    pub fn new(nataf: Nataf<N>, config: Config<N>) -> Self {
        Self {
            nataf,
            config,
            results: ResultLog::default(),
        }
    }

    /// Runs FORM from `seed` and appends the result to the log.
    ///
    /// # Errors
    ///
    /// See [`solve`].
    pub fn run<M, P>(&mut self, evaluator: &mut RunModel<M, P, N>, seed: &Seed<N>) -> Result<&RunResult<N>, Error>
    where
        M: Model,
        P: LimitStateProblem<N, Input = M::Input, Output = M::Output>,
    {
        self.run_observed(evaluator, seed, ())
    }

    /// Runs FORM with an observer and appends the result to the log.
    ///
    /// # Errors
    ///
    /// See [`solve`].
    pub fn run_observed<M, P, Obs>(
        &mut self,
        evaluator: &mut RunModel<M, P, N>,
        seed: &Seed<N>,
        observer: Obs,
    ) -> Result<&RunResult<N>, Error>
    where
        M: Model,
        P: LimitStateProblem<N, Input = M::Input, Output = M::Output>,
        Obs: for<'a> Observer<Event<'a, N>, Action>,
    {
        let result = solve(&self.nataf, &self.config, evaluator, seed, observer)?;
        Ok(self.results.push(result))
    }

    /// Returns every run recorded so far.
    #[must_use]
    pub fn results(&self) -> &ResultLog<N> {
        &self.results
    }

    /// Clears the result log.
    pub fn reset(&mut self) {
        self.results.reset();
    }

    #[must_use]
    pub fn nataf(&self) -> &Nataf<N> {
        &self.nataf
    }

    #[must_use]
    pub fn config(&self) -> &Config<N> {
        &self.config
    }
}

/// Runs one HL-RF search without recording it in a log.
///
/// # Errors
///
/// Returns an error if the seed or an iterate maps to a non-finite point, if
/// the gradient norm vanishes, or if the evaluator fails. Reaching the
/// iteration cap is not an error.
pub fn solve<M, P, Obs, const N: usize>(
    nataf: &Nataf<N>,
    config: &Config<N>,
    evaluator: &mut RunModel<M, P, N>,
    seed: &Seed<N>,
    mut observer: Obs,
) -> Result<RunResult<N>, Error>
where
    M: Model,
    P: LimitStateProblem<N, Input = M::Input, Output = M::Output>,
    Obs: for<'a> Observer<Event<'a, N>, Action>,
{
    let mut u = seed.to_u(nataf);
    if !is_finite(&u) {
        return Err(Error::NonFinitePoint { k: 0 });
    }

    info!(
        "FORM: starting from {seed:?} with {} variables, max_iters = {}",
        N,
        config.max_iters()
    );

    let mut history = History::default();
    let mut best = Best::new();
    let mut previous_gradient = SVector::<f64, N>::zeros();

    for k in 0..config.max_iters() {
        let lin = match gradient::linearize(k, nataf, evaluator, config.step(), &u) {
            Ok(lin) => lin,
            Err(error) => {
                observer.observe(&Event::EvaluationFailed { k, error: &error });
                return Err(error);
            }
        };

        let norm = lin.gradient.norm();
        if !(norm.is_finite() && norm > 0.0) {
            let error = Error::ZeroGradient { k };
            observer.observe(&Event::EvaluationFailed { k, error: &error });
            return Err(error);
        }
        let alpha = lin.gradient / norm;
        let beta = -u.dot(&alpha);
        let beta_next = beta + lin.g / norm;
        let u_next = -beta_next * alpha;

        let errors = Errors {
            step: (u_next - u).norm(),
            beta: (beta_next - beta).abs(),
            gradient: (lin.gradient - previous_gradient).norm(),
        };
        let state = IterationState {
            k,
            u,
            x: lin.x,
            g: lin.g,
            gradient: lin.gradient,
            alpha,
            beta,
            jacobian_xu: nataf.jacobian_xu(&u),
        };

        debug!(
            "FORM: k = {k}, g = {:.6e}, beta = {beta:.6}, step = {:.3e}, dbeta = {:.3e}, dgrad = {:.3e}",
            lin.g, errors.step, errors.beta, errors.gradient
        );

        history.record(&state, errors);
        best.update(&state);

        let action = observer.observe(&Event::Iteration {
            state: &state,
            errors: &errors,
        });

        if config.criteria().is_satisfied(&errors) {
            info!("FORM: converged after {} iterations, beta = {beta:.6}", k + 1);
            return Ok(finish(&state, Status::Converged, k + 1, history));
        }
        if let Some(Action::StopEarly) = action {
            info!("FORM: stopped by observer after {} iterations", k + 1);
            return Ok(finish(&state, Status::StoppedByObserver, k + 1, history));
        }

        u = u_next;
        previous_gradient = lin.gradient;
    }

    let iters = config.max_iters();
    // At least one iteration ran, so a best iterate exists.
    let Some(state) = best.into_state() else {
        return Err(Error::Config(ConfigError::ZeroMaxIters));
    };
    warn!(
        "FORM: not converged after {iters} iterations; reporting iterate {} with |g| = {:.3e}",
        state.k,
        state.g.abs()
    );
    observer.observe(&Event::NotConverged { iters, best: &state });

    Ok(finish(&state, Status::MaxIters, iters, history))
}

/// Runs one HL-RF search without an observer.
///
/// # Errors
///
/// See [`solve`].
pub fn solve_unobserved<M, P, const N: usize>(
    nataf: &Nataf<N>,
    config: &Config<N>,
    evaluator: &mut RunModel<M, P, N>,
    seed: &Seed<N>,
) -> Result<RunResult<N>, Error>
where
    M: Model,
    P: LimitStateProblem<N, Input = M::Input, Output = M::Output>,
{
    solve(nataf, config, evaluator, seed, ())
}

fn finish<const N: usize>(
    state: &IterationState<N>,
    status: Status,
    iterations: usize,
    history: History<N>,
) -> RunResult<N> {
    RunResult {
        status,
        design_point_u: state.u,
        design_point_x: state.x,
        alpha: state.alpha,
        beta: state.beta,
        failure_probability: std_normal::cdf(-state.beta),
        iterations,
        history,
    }
}

fn is_finite<const N: usize>(v: &SVector<f64, N>) -> bool {
    v.iter().all(|x| x.is_finite())
}
