use thiserror::Error;

use super::{ConvergenceCriteria, Criterion, FiniteDifferenceStep};

/// Errors that can occur when configuring a FORM run.
///
/// All of these are detected before the first model evaluation.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// A seed was given in both physical and standard normal space.
    #[error("seed given in both X and U space")]
    DualSeed,

    #[error("max_iters must be at least 1")]
    ZeroMaxIters,

    #[error("convergence policy has no criteria")]
    NoCriteria,

    #[error("tolerance must be finite and non-negative: {0:?}")]
    InvalidTolerance(Criterion),

    #[error("finite-difference step {index} must be finite and positive, got {value}")]
    InvalidStep { index: usize, value: f64 },
}

/// Configuration for the FORM solver.
#[derive(Debug, Clone, PartialEq)]
pub struct Config<const N: usize> {
    max_iters: usize,
    step: FiniteDifferenceStep<N>,
    criteria: ConvergenceCriteria,
}

impl<const N: usize> Default for Config<N> {
    fn default() -> Self {
        Self {
            max_iters: 100,
            step: FiniteDifferenceStep::default(),
            criteria: ConvergenceCriteria::default(),
        }
    }
}

impl<const N: usize> Config<N> {
    /// Creates a new config.
    ///
    /// # Errors
    ///
    /// Returns an error if `max_iters` is zero or a step is not positive.
    pub fn new(
        max_iters: usize,
        step: FiniteDifferenceStep<N>,
        criteria: ConvergenceCriteria,
    ) -> Result<Self, ConfigError> {
        if max_iters == 0 {
            return Err(ConfigError::ZeroMaxIters);
        }
        step.validate()?;
        Ok(Self {
            max_iters,
            step,
            criteria,
        })
    }

    /// Returns a copy with a different iteration cap.
    ///
    /// # Errors
    ///
    /// Returns an error if `max_iters` is zero.
    pub fn with_max_iters(self, max_iters: usize) -> Result<Self, ConfigError> {
        Self::new(max_iters, self.step, self.criteria)
    }

    /// Returns a copy with a different finite-difference step.
    ///
    /// # Errors
    ///
    /// Returns an error if a step is not finite and positive.
    pub fn with_step(self, step: FiniteDifferenceStep<N>) -> Result<Self, ConfigError> {
        Self::new(self.max_iters, step, self.criteria)
    }

    /// Returns a copy with a different convergence policy.
    #[must_use]
    pub fn with_criteria(self, criteria: ConvergenceCriteria) -> Self {
        Self { criteria, ..self }
    }

    /// Returns the iteration cap.
    #[must_use]
    pub fn max_iters(&self) -> usize {
        self.max_iters
    }

    /// Returns the finite-difference step.
    #[must_use]
    pub fn step(&self) -> &FiniteDifferenceStep<N> {
        &self.step
    }

    /// Returns the convergence policy.
    #[must_use]
    pub fn criteria(&self) -> &ConvergenceCriteria {
        &self.criteria
    }
}
