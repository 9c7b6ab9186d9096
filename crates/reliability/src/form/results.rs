use std::cmp::Ordering;

use nalgebra::SVector;

use super::{RunResult, Status};

/// Append-only record of every run made by a [`Form`] solver.
///
/// Each call to [`Form::run`] appends one [`RunResult`]. Accessors return
/// one entry per run, in run order.
///
/// [`Form`]: super::Form
/// [`Form::run`]: super::Form::run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultLog<const N: usize> {
    runs: Vec<RunResult<N>>,
}

impl<const N: usize> ResultLog<N> {
    pub(super) fn push(&mut self, result: RunResult<N>) -> &RunResult<N> {
        self.runs.push(result);
        let last = self.runs.len() - 1;
        &self.runs[last]
    }

    /// Clears all recorded runs.
    pub fn reset(&mut self) {
        self.runs.clear();
    }

    #[must_use]
    pub fn runs(&self) -> &[RunResult<N>] {
        &self.runs
    }

    #[must_use]
    pub fn last(&self) -> Option<&RunResult<N>> {
        self.runs.last()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.runs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    #[must_use]
    pub fn beta_form(&self) -> Vec<f64> {
        self.runs.iter().map(|r| r.beta).collect()
    }

    #[must_use]
    pub fn failure_probability(&self) -> Vec<f64> {
        self.runs.iter().map(|r| r.failure_probability).collect()
    }

    #[must_use]
    pub fn design_point_u(&self) -> Vec<SVector<f64, N>> {
        self.runs.iter().map(|r| r.design_point_u).collect()
    }

    #[must_use]
    pub fn design_point_x(&self) -> Vec<SVector<f64, N>> {
        self.runs.iter().map(|r| r.design_point_x).collect()
    }

    #[must_use]
    pub fn iterations(&self) -> Vec<usize> {
        self.runs.iter().map(|r| r.iterations).collect()
    }

    #[must_use]
    pub fn statuses(&self) -> Vec<Status> {
        self.runs.iter().map(|r| r.status).collect()
    }

    /// Returns the runs ordered by increasing reliability index.
    ///
    /// Runs started from different seeds may settle on different local
    /// design points; the first entry is the most critical one.
    #[must_use]
    pub fn sorted_by_beta(&self) -> Vec<&RunResult<N>> {
        let mut sorted: Vec<_> = self.runs.iter().collect();
        sorted.sort_by(|a, b| a.beta.partial_cmp(&b.beta).unwrap_or(Ordering::Equal));
        sorted
    }

    /// Returns the converged run with the smallest reliability index.
    #[must_use]
    pub fn most_critical(&self) -> Option<&RunResult<N>> {
        self.sorted_by_beta().into_iter().find(|r| r.is_converged())
    }
}
