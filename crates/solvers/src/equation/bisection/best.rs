use crate::equation::Evaluation;

use super::{Solution, Status};

/// Tracks the evaluation with the smallest residual magnitude.
pub(super) struct Best<I, O> {
    eval: Evaluation<I, O, 1>,
}

impl<I, O> Best<I, O> {
    /// Starts tracking from an initial evaluation.
    pub(super) fn new(eval: Evaluation<I, O, 1>) -> Self {
        Self { eval }
    }

    /// Replaces the tracked evaluation if `eval` has a smaller residual.
    pub(super) fn update(&mut self, eval: Evaluation<I, O, 1>) {
        if eval.residuals[0].abs() < self.eval.residuals[0].abs() {
            self.eval = eval;
        }
    }

    /// Returns true if the best residual meets the tolerance.
    pub(super) fn is_residual_converged(&self, residual_tol: f64) -> bool {
        self.eval.residuals[0].abs() <= residual_tol
    }

    /// Converts the tracked evaluation into a solution.
    pub(super) fn finish(self, status: Status, iters: usize) -> Solution<I, O> {
        Solution {
            status,
            x: self.eval.x[0],
            residual: self.eval.residuals[0],
            snapshot: self.eval.snapshot,
            iters,
        }
    }
}
