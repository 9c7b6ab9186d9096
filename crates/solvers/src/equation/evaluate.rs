use thiserror::Error;

use relia_core::{EquationProblem, Model, Snapshot};

/// Model input/output and residuals at one solver point.
#[derive(Debug, Clone)]
pub struct Evaluation<I, O, const N: usize> {
    pub x: [f64; N],
    pub residuals: [f64; N],
    pub snapshot: Snapshot<I, O>,
}

/// Why an equation problem could not be evaluated at a point.
#[derive(Debug, Error)]
pub enum EvalError<ME, PE> {
    #[error("model call failed")]
    Model(#[source] ME),

    #[error("problem error")]
    Problem(#[source] PE),

    /// Residual `index` is NaN or infinite.
    #[error("residual {index} is not finite: {value}")]
    NonFiniteResidual { index: usize, value: f64 },
}

/// Result of [`evaluate`] for a model and problem pair.
pub type EvaluateResult<M, P, const N: usize> = Result<
    Evaluation<<M as Model>::Input, <M as Model>::Output, N>,
    EvalError<<M as Model>::Error, <P as EquationProblem<N>>::Error>,
>;

/// Maps `x` through the problem, calls the model, and computes residuals.
///
/// Solvers compare and bisect on residual signs, so a non-finite residual is
/// reported as an error rather than returned.
///
/// # Errors
///
/// Returns an error if the problem or model fails, or if any residual is not
/// finite.
pub fn evaluate<M, P, const N: usize>(model: &M, problem: &P, x: [f64; N]) -> EvaluateResult<M, P, N>
where
    M: Model,
    P: EquationProblem<N, Input = M::Input, Output = M::Output>,
{
    let input = problem.input(&x).map_err(EvalError::Problem)?;
    let output = model.call(&input).map_err(EvalError::Model)?;
    let residuals = problem
        .residuals(&input, &output)
        .map_err(EvalError::Problem)?;

    if let Some((index, &value)) = residuals.iter().enumerate().find(|(_, r)| !r.is_finite()) {
        return Err(EvalError::NonFiniteResidual { index, value });
    }

    Ok(Evaluation {
        x,
        residuals,
        snapshot: Snapshot::new(input, output),
    })
}
