use nalgebra::SVector;

use relia_probability::Nataf;

use super::ConfigError;

/// Starting point of a FORM run.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Seed<const N: usize> {
    /// The origin of standard normal space.
    #[default]
    Origin,

    /// A point in physical space, mapped through `X → Z → U`.
    X([f64; N]),

    /// A point in standard normal space.
    U([f64; N]),
}

impl<const N: usize> Seed<N> {
    /// Builds a seed from optional physical and standard normal points.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DualSeed`] if both points are given.
    pub fn from_parts(x: Option<[f64; N]>, u: Option<[f64; N]>) -> Result<Self, ConfigError> {
        match (x, u) {
            (Some(_), Some(_)) => Err(ConfigError::DualSeed),
            (Some(x), None) => Ok(Seed::X(x)),
            (None, Some(u)) => Ok(Seed::U(u)),
            (None, None) => Ok(Seed::Origin),
        }
    }

    /// Returns the seed in standard normal space.
    pub(super) fn to_u(self, nataf: &Nataf<N>) -> SVector<f64, N> {
        match self {
            Seed::Origin => SVector::zeros(),
            Seed::X(x) => nataf.x_to_u(&SVector::from(x)),
            Seed::U(u) => SVector::from(u),
        }
    }
}
