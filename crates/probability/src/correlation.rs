use nalgebra::{SMatrix, SVector};
use thiserror::Error;

/// Tolerance for the unit-diagonal and symmetry checks.
const TOL: f64 = 1e-10;

/// Errors that can occur when validating a correlation matrix.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum CorrelationError {
    #[error("entry ({row}, {col}) is not finite")]
    NonFinite { row: usize, col: usize },

    #[error("entry ({row}, {col}) = {value} is outside [-1, 1]")]
    OutOfRange { row: usize, col: usize, value: f64 },

    #[error("diagonal entry {index} = {value} is not 1")]
    NonUnitDiagonal { index: usize, value: f64 },

    #[error("entries ({row}, {col}) and ({col}, {row}) differ")]
    Asymmetric { row: usize, col: usize },

    #[error("matrix is not positive definite")]
    NotPositiveDefinite,
}

/// A validated correlation matrix and its lower Cholesky factor.
///
/// The matrix is square, symmetric, has a unit diagonal, has off-diagonal
/// entries in `[-1, 1]`, and is positive definite. The factor `L` satisfies
/// `R = L Lᵀ`.
#[derive(Debug, Clone, PartialEq)]
pub struct Correlation<const N: usize> {
    matrix: SMatrix<f64, N, N>,
    cholesky: SMatrix<f64, N, N>,
}

impl<const N: usize> Correlation<N> {
    /// Validates a correlation matrix given in row-major form.
    ///
    /// # Errors
    ///
    /// Returns a [`CorrelationError`] describing the first violated property.
    pub fn new(rows: [[f64; N]; N]) -> Result<Self, CorrelationError> {
        for (row, values) in rows.iter().enumerate() {
            for (col, &value) in values.iter().enumerate() {
                if !value.is_finite() {
                    return Err(CorrelationError::NonFinite { row, col });
                }
                if value.abs() > 1.0 {
                    return Err(CorrelationError::OutOfRange { row, col, value });
                }
                if row == col && (value - 1.0).abs() > TOL {
                    return Err(CorrelationError::NonUnitDiagonal { index: row, value });
                }
                if col > row && (value - rows[col][row]).abs() > TOL {
                    return Err(CorrelationError::Asymmetric { row, col });
                }
            }
        }

        let matrix = SMatrix::<f64, N, N>::from_fn(|i, j| rows[i][j]);
        let cholesky = matrix
            .cholesky()
            .ok_or(CorrelationError::NotPositiveDefinite)?
            .l();

        Ok(Self { matrix, cholesky })
    }

    /// The identity correlation (independent variables).
    #[must_use]
    pub fn identity() -> Self {
        Self {
            matrix: SMatrix::identity(),
            cholesky: SMatrix::identity(),
        }
    }

    /// Returns the correlation coefficient between variables `i` and `j`.
    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.matrix[(i, j)]
    }

    /// Returns the full correlation matrix.
    #[must_use]
    pub fn matrix(&self) -> &SMatrix<f64, N, N> {
        &self.matrix
    }

    /// Returns the lower Cholesky factor `L`.
    #[must_use]
    pub fn cholesky(&self) -> &SMatrix<f64, N, N> {
        &self.cholesky
    }

    /// Returns true if all off-diagonal entries are zero.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.matrix == SMatrix::<f64, N, N>::identity()
    }

    /// Computes `L v`.
    pub(crate) fn mul_cholesky(&self, v: &SVector<f64, N>) -> SVector<f64, N> {
        self.cholesky * v
    }

    /// Solves `L u = v` by forward substitution.
    pub(crate) fn solve_cholesky(&self, v: &SVector<f64, N>) -> SVector<f64, N> {
        // L has a strictly positive diagonal, so the solve cannot fail.
        self.cholesky
            .solve_lower_triangular(v)
            .unwrap_or_else(|| SVector::repeat(f64::NAN))
    }
}

impl<const N: usize> Default for Correlation<N> {
    fn default() -> Self {
        Self::identity()
    }
}
