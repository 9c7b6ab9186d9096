use nalgebra::{SMatrix, SVector};

/// Everything known about one HL-RF iterate.
///
/// `u` and `x` correspond through the transform, and `jacobian_xu` is
/// `∂x/∂u` evaluated at `u`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IterationState<const N: usize> {
    /// Iteration index, starting at 0.
    pub k: usize,

    /// Point in standard normal space.
    pub u: SVector<f64, N>,

    /// Point in physical space.
    pub x: SVector<f64, N>,

    /// Performance value `g(x)`.
    pub g: f64,

    /// Gradient of `g` with respect to `u`.
    pub gradient: SVector<f64, N>,

    /// Direction cosines `∇g / ‖∇g‖`.
    pub alpha: SVector<f64, N>,

    /// Reliability index `-u · alpha`.
    pub beta: f64,

    /// Jacobian `∂x/∂u` at `u`.
    pub jacobian_xu: SMatrix<f64, N, N>,
}
