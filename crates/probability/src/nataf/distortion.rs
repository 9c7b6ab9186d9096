use std::convert::Infallible;

use relia_core::{EquationProblem, Model};
use relia_solvers::equation::bisection::{self, BracketError, Config};

use crate::{Correlation, GaussHermite, JointDistribution, Marginal};

use super::NatafError;

/// Order of the Gauss–Hermite rule used in each direction.
///
/// Correlated nodes reach `|z|` of about 10, so the integrand relies on
/// [`Marginal::z_to_x`] staying finite there.
const QUADRATURE_ORDER: usize = 20;

/// Search interval for `ρz`, kept off ±1 so the result stays factorable.
const BRACKET: [f64; 2] = [-1.0 + 1e-9, 1.0 - 1e-9];

/// Solves every off-diagonal entry of the `Z`-space correlation.
pub(super) fn corr_z_from_corr_x<const N: usize>(
    joint: &JointDistribution<N>,
    corr_x: &Correlation<N>,
) -> Result<Correlation<N>, NatafError> {
    if corr_x.is_identity() {
        return Ok(Correlation::identity());
    }

    let rule = GaussHermite::new(QUADRATURE_ORDER)?;
    let mut moments = [(0.0, 1.0); N];
    for (index, marginal) in joint.marginals().iter().enumerate() {
        moments[index] = match (marginal.mean(), marginal.std_dev()) {
            (Some(mean), Some(std_dev)) if mean.is_finite() && std_dev > 0.0 => (mean, std_dev),
            _ => return Err(NatafError::UndefinedMoment { index }),
        };
    }

    let config = Config::new(200, 1e-12, 0.0, 1e-12).unwrap_or_default();
    let mut rows = [[0.0; N]; N];
    for row in 0..N {
        rows[row][row] = 1.0;
        for col in row + 1..N {
            let target = corr_x.get(row, col);
            let rho_z = if target == 0.0 {
                0.0
            } else {
                let model = Integral {
                    rule: &rule,
                    pair: [
                        Standardized::new(joint.marginal(row), moments[row]),
                        Standardized::new(joint.marginal(col), moments[col]),
                    ],
                };
                solve_pair(&model, target, &config).map_err(|err| match err {
                    bisection::Error::InvalidBracket(BracketError::NoSignChange) => {
                        NatafError::Unattainable { row, col, target }
                    }
                    source => NatafError::Distortion { row, col, source },
                })?
            };
            rows[row][col] = rho_z;
            rows[col][row] = rho_z;
        }
    }

    Ok(Correlation::new(rows)?)
}

fn solve_pair(model: &Integral<'_>, target: f64, config: &Config) -> Result<f64, bisection::Error> {
    let solution = bisection::solve_unobserved(model, &MatchCorrelation(target), BRACKET, config)?;
    Ok(solution.x)
}

/// A marginal with its mean and standard deviation.
struct Standardized<'a> {
    marginal: &'a Marginal,
    mean: f64,
    std_dev: f64,
}

impl<'a> Standardized<'a> {
    fn new(marginal: &'a Marginal, (mean, std_dev): (f64, f64)) -> Self {
        Self { marginal, mean, std_dev }
    }

    /// Standardized physical value `(x(z) - μ) / σ` for a `Z`-space value.
    fn at(&self, z: f64) -> f64 {
        (self.marginal.z_to_x(z) - self.mean) / self.std_dev
    }
}

/// Maps a `Z`-space coefficient to the `X`-space coefficient it induces.
struct Integral<'a> {
    rule: &'a GaussHermite,
    pair: [Standardized<'a>; 2],
}

impl Model for Integral<'_> {
    type Input = f64;
    type Output = f64;
    type Error = Infallible;

    fn call(&self, rho_z: &f64) -> Result<f64, Self::Error> {
        let [first, second] = &self.pair;
        let orth = (1.0 - rho_z * rho_z).max(0.0).sqrt();
        Ok(self.rule.expect(|za| {
            let xa = first.at(za);
            self.rule.expect(|zb| xa * second.at(rho_z * za + orth * zb))
        }))
    }
}

/// Residual between the induced and requested `X` correlation.
struct MatchCorrelation(f64);

impl EquationProblem<1> for MatchCorrelation {
    type Input = f64;
    type Output = f64;
    type Error = Infallible;

    fn input(&self, x: &[f64; 1]) -> Result<f64, Self::Error> {
        Ok(x[0])
    }

    fn residuals(&self, _rho_z: &f64, rho_x: &f64) -> Result<[f64; 1], Self::Error> {
        Ok([rho_x - self.0])
    }
}
