use super::{Error, IterationState, criteria::Errors};

/// Events emitted by the FORM solver.
#[derive(Debug)]
pub enum Event<'a, const N: usize> {
    /// An HL-RF update was computed from `state`.
    Iteration {
        state: &'a IterationState<N>,
        errors: &'a Errors,
    },

    /// Linearizing at iteration `k` failed, either in the evaluator or
    /// because the gradient vanished; the run ends with `error`.
    EvaluationFailed { k: usize, error: &'a Error },

    /// The iteration cap was reached; `best` is the reported iterate.
    NotConverged {
        iters: usize,
        best: &'a IterationState<N>,
    },
}

impl<const N: usize> Event<'_, N> {
    /// Returns the state carried by the event, if any.
    #[must_use]
    pub fn state(&self) -> Option<&IterationState<N>> {
        match self {
            Event::Iteration { state, .. } => Some(*state),
            Event::NotConverged { best, .. } => Some(*best),
            Event::EvaluationFailed { .. } => None,
        }
    }
}
