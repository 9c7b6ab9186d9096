use nalgebra::SVector;

use relia_core::{LimitStateProblem, Model};
use relia_probability::Nataf;

use crate::RunModel;

use super::{ConfigError, Error};

/// Step sizes for central finite differences in standard normal space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FiniteDifferenceStep<const N: usize> {
    /// The same step in every direction.
    Uniform(f64),

    /// One step per variable.
    PerDimension([f64; N]),
}

impl<const N: usize> Default for FiniteDifferenceStep<N> {
    fn default() -> Self {
        FiniteDifferenceStep::Uniform(0.01)
    }
}

impl<const N: usize> FiniteDifferenceStep<N> {
    /// Returns the step along variable `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> f64 {
        match self {
            FiniteDifferenceStep::Uniform(h) => *h,
            FiniteDifferenceStep::PerDimension(h) => h[index],
        }
    }

    pub(super) fn validate(&self) -> Result<(), ConfigError> {
        for index in 0..N {
            let value = self.get(index);
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::InvalidStep { index, value });
            }
        }
        Ok(())
    }
}

/// Performance value and its gradient in standard normal space.
#[derive(Debug, Clone, Copy)]
pub(super) struct Linearization<const N: usize> {
    pub x: SVector<f64, N>,
    pub g: f64,
    pub gradient: SVector<f64, N>,
}

/// Evaluates `g` at `u` and its central-difference gradient in one batch.
///
/// The batch holds the `2N + 1` physical-space points in the order
/// `u, u + h₀e₀, u - h₀e₀, u + h₁e₁, …`.
pub(super) fn linearize<M, P, const N: usize>(
    k: usize,
    nataf: &Nataf<N>,
    evaluator: &mut RunModel<M, P, N>,
    step: &FiniteDifferenceStep<N>,
    u: &SVector<f64, N>,
) -> Result<Linearization<N>, Error>
where
    M: Model,
    P: LimitStateProblem<N, Input = M::Input, Output = M::Output>,
{
    let mut points = Vec::with_capacity(2 * N + 1);
    points.push(*u);
    for i in 0..N {
        let mut offset = SVector::<f64, N>::zeros();
        offset[i] = step.get(i);
        points.push(u + offset);
        points.push(u - offset);
    }

    let samples = points
        .iter()
        .map(|u| {
            let x = nataf.u_to_x(u);
            if x.iter().all(|v| v.is_finite()) {
                Ok(array(&x))
            } else {
                Err(Error::NonFinitePoint { k })
            }
        })
        .collect::<Result<Vec<_>, _>>()?;

    let qoi = evaluator.run(&samples, false)?;

    Ok(Linearization {
        x: SVector::from(samples[0]),
        g: qoi[0],
        gradient: SVector::from_fn(|i, _| (qoi[2 * i + 1] - qoi[2 * i + 2]) / (2.0 * step.get(i))),
    })
}

pub(super) fn array<const N: usize>(v: &SVector<f64, N>) -> [f64; N] {
    std::array::from_fn(|i| v[i])
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use relia_probability::{JointDistribution, Marginal};

    #[test]
    fn quadratic_gradient_is_exact() {
        let nataf = Nataf::independent(JointDistribution::new([
            Marginal::normal(0.0, 1.0).unwrap(),
            Marginal::normal(0.0, 1.0).unwrap(),
        ]));
        let mut evaluator = RunModel::from_fn(|x: &[f64; 2]| x[0] * x[0] + 3.0 * x[1]);
        let u = SVector::<f64, 2>::new(1.5, -0.5);

        let lin = linearize(0, &nataf, &mut evaluator, &FiniteDifferenceStep::Uniform(0.1), &u).unwrap();

        assert_relative_eq!(lin.g, 0.75, epsilon = 1e-12);
        assert_relative_eq!(lin.gradient[0], 3.0, epsilon = 1e-12);
        assert_relative_eq!(lin.gradient[1], 3.0, epsilon = 1e-12);
        assert_eq!(evaluator.samples().len(), 5);
        assert_relative_eq!(evaluator.samples()[0][0], 1.5, epsilon = 1e-12);
        assert_relative_eq!(evaluator.samples()[2][0], 1.4, epsilon = 1e-12);
    }

    #[test]
    fn gradient_is_taken_in_u_space() {
        let nataf = Nataf::independent(JointDistribution::new([Marginal::normal(10.0, 4.0).unwrap()]));
        let mut evaluator = RunModel::from_fn(|x: &[f64; 1]| x[0]);

        let lin = linearize(
            0,
            &nataf,
            &mut evaluator,
            &FiniteDifferenceStep::PerDimension([0.05]),
            &SVector::zeros(),
        )
        .unwrap();

        assert_relative_eq!(lin.x[0], 10.0, epsilon = 1e-12);
        assert_relative_eq!(lin.gradient[0], 4.0, epsilon = 1e-10);
    }

    #[test]
    fn step_validation() {
        assert!(FiniteDifferenceStep::<3>::Uniform(0.01).validate().is_ok());
        assert!(matches!(
            FiniteDifferenceStep::<1>::Uniform(f64::NAN).validate(),
            Err(ConfigError::InvalidStep { index: 0, .. })
        ));
    }
}
