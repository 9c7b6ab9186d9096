use crate::Marginal;

/// A joint distribution of `N` independent marginals.
///
/// Dependence between variables is introduced by the [`Nataf`] transform,
/// not here.
///
/// [`Nataf`]: crate::Nataf
#[derive(Debug, Clone, PartialEq)]
pub struct JointDistribution<const N: usize> {
    marginals: [Marginal; N],
}

impl<const N: usize> JointDistribution<N> {
    /// Creates a joint distribution from its marginals.
    #[must_use]
    pub fn new(marginals: [Marginal; N]) -> Self {
        Self { marginals }
    }

    /// Returns all marginals.
    #[must_use]
    pub fn marginals(&self) -> &[Marginal; N] {
        &self.marginals
    }

    /// Returns the marginal of variable `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= N`.
    #[must_use]
    pub fn marginal(&self, index: usize) -> &Marginal {
        &self.marginals[index]
    }

    /// Evaluates each marginal CDF at the matching component of `x`.
    #[must_use]
    pub fn cdf(&self, x: &[f64; N]) -> [f64; N] {
        std::array::from_fn(|i| self.marginals[i].cdf(x[i]))
    }

    /// Evaluates each marginal inverse CDF at the matching component of `p`.
    #[must_use]
    pub fn icdf(&self, p: &[f64; N]) -> [f64; N] {
        std::array::from_fn(|i| self.marginals[i].icdf(p[i]))
    }

    /// Evaluates each marginal PDF at the matching component of `x`.
    #[must_use]
    pub fn pdf(&self, x: &[f64; N]) -> [f64; N] {
        std::array::from_fn(|i| self.marginals[i].pdf(x[i]))
    }
}

impl<const N: usize> From<[Marginal; N]> for JointDistribution<N> {
    fn from(marginals: [Marginal; N]) -> Self {
        Self::new(marginals)
    }
}
