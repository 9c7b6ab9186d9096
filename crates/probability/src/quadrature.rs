use std::f64::consts::{PI, SQRT_2};

use thiserror::Error;

/// π^(-1/4), the leading coefficient of the orthonormal Hermite recurrence.
const PIM4: f64 = 0.751_125_544_464_942_5;

const NEWTON_TOL: f64 = 1e-14;
const NEWTON_MAX_ITERS: usize = 10;

/// Errors that can occur when computing quadrature rules.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum QuadratureError {
    #[error("quadrature order must be at least 1")]
    ZeroOrder,

    #[error("Newton iteration for node {node} did not converge")]
    NoConvergence { node: usize },
}

/// Gauss–Hermite quadrature for expectations under `N(0, 1)`.
///
/// Nodes and weights are in probabilists' form: the weights sum to one and
/// `Σ wₖ f(zₖ)` approximates `E[f(Z)]` for a standard normal `Z`. The rule
/// is exact for polynomials of degree up to `2n - 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct GaussHermite {
    nodes: Vec<f64>,
    weights: Vec<f64>,
}

impl GaussHermite {
    /// Computes an `n`-point rule.
    ///
    /// Roots of the Hermite polynomial are found by Newton iteration from
    /// asymptotic initial guesses, largest root first; symmetry supplies the
    /// negative half.
    ///
    /// # Errors
    ///
    /// Returns an error if `n` is zero or a root does not converge.
    pub fn new(n: usize) -> Result<Self, QuadratureError> {
        if n == 0 {
            return Err(QuadratureError::ZeroOrder);
        }

        let nf = n as f64;
        let mut nodes = vec![0.0; n];
        let mut weights = vec![0.0; n];
        let mut z = 0.0;

        for i in 0..n.div_ceil(2) {
            z = match i {
                0 => (2.0 * nf + 1.0).sqrt() - 1.855_75 * (2.0 * nf + 1.0).powf(-0.166_67),
                1 => z - 1.14 * nf.powf(0.426) / z,
                2 => 1.86 * z - 0.86 * nodes[0],
                3 => 1.91 * z - 0.91 * nodes[1],
                _ => 2.0 * z - nodes[i - 2],
            };

            let mut derivative = 0.0;
            let mut converged = false;
            for _ in 0..NEWTON_MAX_ITERS {
                let (value, slope) = hermite(n, z);
                derivative = slope;
                let previous = z;
                z = previous - value / slope;
                if (z - previous).abs() <= NEWTON_TOL {
                    converged = true;
                    break;
                }
            }
            if !converged {
                return Err(QuadratureError::NoConvergence { node: i });
            }

            nodes[i] = z;
            nodes[n - 1 - i] = -z;
            weights[i] = 2.0 / (derivative * derivative);
            weights[n - 1 - i] = weights[i];
        }

        let norm = PI.sqrt();
        Ok(Self {
            nodes: nodes.into_iter().map(|x| x * SQRT_2).collect(),
            weights: weights.into_iter().map(|w| w / norm).collect(),
        })
    }

    /// Returns the quadrature nodes.
    #[must_use]
    pub fn nodes(&self) -> &[f64] {
        &self.nodes
    }

    /// Returns the quadrature weights.
    #[must_use]
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Approximates `E[f(Z)]` for a standard normal `Z`.
    pub fn expect(&self, mut f: impl FnMut(f64) -> f64) -> f64 {
        self.nodes
            .iter()
            .zip(&self.weights)
            .map(|(&z, &w)| w * f(z))
            .sum()
    }
}

/// Evaluates the orthonormal Hermite polynomial of order `n` at `z` and
/// returns it with its derivative.
fn hermite(n: usize, z: f64) -> (f64, f64) {
    let mut p1 = PIM4;
    let mut p2 = 0.0;
    for j in 1..=n {
        let jf = j as f64;
        let p3 = p2;
        p2 = p1;
        p1 = z * (2.0 / jf).sqrt() * p2 - ((jf - 1.0) / jf).sqrt() * p3;
    }
    (p1, (2.0 * n as f64).sqrt() * p2)
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn weights_sum_to_one() {
        for n in [1, 2, 5, 20] {
            let rule = GaussHermite::new(n).unwrap();
            assert_relative_eq!(rule.weights().iter().sum::<f64>(), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn two_point_rule() {
        let rule = GaussHermite::new(2).unwrap();
        assert_relative_eq!(rule.nodes()[0], 1.0, epsilon = 1e-12);
        assert_relative_eq!(rule.nodes()[1], -1.0, epsilon = 1e-12);
        assert_relative_eq!(rule.weights()[0], 0.5, epsilon = 1e-12);
    }

    #[test]
    fn reproduces_normal_moments() {
        let rule = GaussHermite::new(20).unwrap();
        assert_relative_eq!(rule.expect(|z| z), 0.0, epsilon = 1e-12);
        assert_relative_eq!(rule.expect(|z| z * z), 1.0, epsilon = 1e-10);
        assert_relative_eq!(rule.expect(|z| z.powi(4)), 3.0, epsilon = 1e-9);
        assert_relative_eq!(rule.expect(|z| z.powi(6)), 15.0, epsilon = 1e-8);
    }

    #[test]
    fn rejects_zero_order() {
        assert_eq!(GaussHermite::new(0), Err(QuadratureError::ZeroOrder));
    }
}
