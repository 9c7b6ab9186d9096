use nalgebra::SVector;

use super::{IterationState, criteria::Errors};

/// Indicates how a FORM run terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The convergence policy was satisfied.
    Converged,

    /// Reached the iteration cap without converging.
    MaxIters,

    /// Stopped early due to an observer decision.
    StoppedByObserver,
}

/// Per-iteration records of a run, one entry per iteration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct History<const N: usize> {
    pub u_record: Vec<SVector<f64, N>>,
    pub x_record: Vec<SVector<f64, N>>,
    pub g_record: Vec<f64>,
    pub gradient_record: Vec<SVector<f64, N>>,
    pub alpha_record: Vec<SVector<f64, N>>,
    pub beta_record: Vec<f64>,
    pub error_record: Vec<Errors>,
}

impl<const N: usize> History<N> {
    pub(super) fn record(&mut self, state: &IterationState<N>, errors: Errors) {
        self.u_record.push(state.u);
        self.x_record.push(state.x);
        self.g_record.push(state.g);
        self.gradient_record.push(state.gradient);
        self.alpha_record.push(state.alpha);
        self.beta_record.push(state.beta);
        self.error_record.push(errors);
    }

    /// Returns the number of recorded iterations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.beta_record.len()
    }

    /// Returns true if no iterations were recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.beta_record.is_empty()
    }
}

/// The outcome of one FORM run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunResult<const N: usize> {
    /// How the run terminated.
    pub status: Status,

    /// Design point in standard normal space.
    pub design_point_u: SVector<f64, N>,

    /// Design point in physical space.
    pub design_point_x: SVector<f64, N>,

    /// Direction cosines at the design point.
    pub alpha: SVector<f64, N>,

    /// Hasofer–Lind reliability index.
    pub beta: f64,

    /// First-order failure probability `Φ(-β)`.
    pub failure_probability: f64,

    /// Number of iterations performed.
    pub iterations: usize,

    /// Per-iteration records.
    pub history: History<N>,
}

impl<const N: usize> RunResult<N> {
    /// Returns true if the run converged.
    #[must_use]
    pub fn is_converged(&self) -> bool {
        self.status == Status::Converged
    }
}
