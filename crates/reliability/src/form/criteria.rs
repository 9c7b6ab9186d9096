use super::ConfigError;

/// Tolerance used for every criterion when none is configured.
pub const DEFAULT_TOLERANCE: f64 = 1e-3;

/// The three convergence errors of one iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Errors {
    /// Step size `‖u_{k+1} - u_k‖`.
    pub step: f64,

    /// Reliability index change `|β_{k+1} - β_k|`.
    pub beta: f64,

    /// Gradient change `‖∇g_k - ∇g_{k-1}‖`.
    pub gradient: f64,
}

/// A single convergence test with its tolerance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Criterion {
    /// Satisfied when `errors.step <= tol`.
    Step(f64),

    /// Satisfied when `errors.beta <= tol`.
    Beta(f64),

    /// Satisfied when `errors.gradient <= tol`.
    Gradient(f64),
}

impl Criterion {
    /// Returns the tolerance.
    #[must_use]
    pub fn tolerance(self) -> f64 {
        match self {
            Criterion::Step(tol) | Criterion::Beta(tol) | Criterion::Gradient(tol) => tol,
        }
    }

    /// Returns the error this criterion checks.
    #[must_use]
    pub fn error(self, errors: &Errors) -> f64 {
        match self {
            Criterion::Step(_) => errors.step,
            Criterion::Beta(_) => errors.beta,
            Criterion::Gradient(_) => errors.gradient,
        }
    }

    /// Returns true if the checked error is within tolerance.
    #[must_use]
    pub fn is_satisfied(self, errors: &Errors) -> bool {
        self.error(errors) <= self.tolerance()
    }
}

/// How individual criteria combine into a convergence decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reducer {
    /// Converged when every criterion is satisfied.
    AllOf,

    /// Converged when at least one criterion is satisfied.
    AnyOf,
}

/// The convergence policy of the FORM solver.
///
/// A set of [`Criterion`]s, each checked independently, combined with a
/// [`Reducer`].
#[derive(Debug, Clone, PartialEq)]
pub struct ConvergenceCriteria {
    criteria: Vec<Criterion>,
    reducer: Reducer,
}

impl ConvergenceCriteria {
    /// Creates a policy from explicit criteria and a reducer.
    ///
    /// # Errors
    ///
    /// Returns an error if no criteria are given or a tolerance is negative
    /// or non-finite.
    pub fn new(criteria: Vec<Criterion>, reducer: Reducer) -> Result<Self, ConfigError> {
        if criteria.is_empty() {
            return Err(ConfigError::NoCriteria);
        }
        for criterion in &criteria {
            let tol = criterion.tolerance();
            if !(tol.is_finite() && tol >= 0.0) {
                return Err(ConfigError::InvalidTolerance(*criterion));
            }
        }
        Ok(Self { criteria, reducer })
    }

    /// Builds the policy from the three optional named tolerances.
    ///
    /// With none configured, all three criteria are checked at
    /// [`DEFAULT_TOLERANCE`] and any one of them suffices. Otherwise only the
    /// configured criteria are checked, and all of them must hold.
    ///
    /// # Errors
    ///
    /// Returns an error if a configured tolerance is negative or non-finite.
    pub fn from_tolerances(
        step: Option<f64>,
        beta: Option<f64>,
        gradient: Option<f64>,
    ) -> Result<Self, ConfigError> {
        let criteria: Vec<Criterion> = [
            step.map(Criterion::Step),
            beta.map(Criterion::Beta),
            gradient.map(Criterion::Gradient),
        ]
        .into_iter()
        .flatten()
        .collect();

        if criteria.is_empty() {
            return Self::new(
                vec![
                    Criterion::Step(DEFAULT_TOLERANCE),
                    Criterion::Beta(DEFAULT_TOLERANCE),
                    Criterion::Gradient(DEFAULT_TOLERANCE),
                ],
                Reducer::AnyOf,
            );
        }
        Self::new(criteria, Reducer::AllOf)
    }

    /// Returns the active criteria.
    #[must_use]
    pub fn criteria(&self) -> &[Criterion] {
        &self.criteria
    }

    /// Returns the reducer.
    #[must_use]
    pub fn reducer(&self) -> Reducer {
        self.reducer
    }

    /// Returns true if the errors satisfy the policy.
    #[must_use]
    pub fn is_satisfied(&self, errors: &Errors) -> bool {
        let mut checks = self.criteria.iter().map(|c| c.is_satisfied(errors));
        match self.reducer {
            Reducer::AllOf => checks.all(|ok| ok),
            Reducer::AnyOf => checks.any(|ok| ok),
        }
    }
}

impl Default for ConvergenceCriteria {
    fn default() -> Self {
        Self {
            criteria: vec![
                Criterion::Step(DEFAULT_TOLERANCE),
                Criterion::Beta(DEFAULT_TOLERANCE),
                Criterion::Gradient(DEFAULT_TOLERANCE),
            ],
            reducer: Reducer::AnyOf,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn errors(step: f64, beta: f64, gradient: f64) -> Errors {
        Errors { step, beta, gradient }
    }

    #[test]
    fn none_configured_is_any_of_defaults() {
        let policy = ConvergenceCriteria::from_tolerances(None, None, None).unwrap();

        assert_eq!(policy, ConvergenceCriteria::default());
        assert!(policy.is_satisfied(&errors(1.0, 1.0, 1e-4)));
        assert!(policy.is_satisfied(&errors(1e-3, 1.0, 1.0)));
        assert!(!policy.is_satisfied(&errors(2e-3, 2e-3, 2e-3)));
    }

    #[test]
    fn single_tolerance_checks_only_that_error() {
        let step = ConvergenceCriteria::from_tolerances(Some(0.1), None, None).unwrap();
        assert!(step.is_satisfied(&errors(0.05, 10.0, 10.0)));
        assert!(!step.is_satisfied(&errors(0.2, 0.0, 0.0)));

        let beta = ConvergenceCriteria::from_tolerances(None, Some(0.1), None).unwrap();
        assert!(beta.is_satisfied(&errors(10.0, 0.05, 10.0)));
        assert!(!beta.is_satisfied(&errors(0.0, 0.2, 0.0)));

        let gradient = ConvergenceCriteria::from_tolerances(None, None, Some(0.1)).unwrap();
        assert!(gradient.is_satisfied(&errors(10.0, 10.0, 0.1)));
        assert!(!gradient.is_satisfied(&errors(0.0, 0.0, 0.2)));
    }

    #[test]
    fn pairs_require_both() {
        let step_beta = ConvergenceCriteria::from_tolerances(Some(0.1), Some(0.01), None).unwrap();
        assert_eq!(step_beta.reducer(), Reducer::AllOf);
        assert!(step_beta.is_satisfied(&errors(0.05, 0.005, 99.0)));
        // Beta is compared against its own tolerance, not the step tolerance.
        assert!(!step_beta.is_satisfied(&errors(0.05, 0.05, 0.0)));

        let step_gradient =
            ConvergenceCriteria::from_tolerances(Some(0.1), None, Some(0.1)).unwrap();
        assert!(!step_gradient.is_satisfied(&errors(0.05, 0.0, 0.5)));

        let beta_gradient =
            ConvergenceCriteria::from_tolerances(None, Some(0.1), Some(0.1)).unwrap();
        assert!(beta_gradient.is_satisfied(&errors(5.0, 0.1, 0.1)));
    }

    #[test]
    fn all_three_require_all() {
        let policy = ConvergenceCriteria::from_tolerances(Some(0.1), Some(0.1), Some(0.1)).unwrap();

        assert_eq!(policy.criteria().len(), 3);
        assert!(policy.is_satisfied(&errors(0.1, 0.1, 0.1)));
        assert!(!policy.is_satisfied(&errors(0.1, 0.1, 0.11)));
    }

    #[test]
    fn rejects_invalid_tolerances() {
        assert_eq!(
            ConvergenceCriteria::from_tolerances(Some(-1.0), None, None),
            Err(ConfigError::InvalidTolerance(Criterion::Step(-1.0)))
        );
        assert!(matches!(
            ConvergenceCriteria::from_tolerances(None, None, Some(f64::NAN)),
            Err(ConfigError::InvalidTolerance(Criterion::Gradient(_)))
        ));
        assert_eq!(
            ConvergenceCriteria::new(Vec::new(), Reducer::AnyOf),
            Err(ConfigError::NoCriteria)
        );
    }
}
