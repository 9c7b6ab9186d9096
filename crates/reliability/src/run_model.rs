use thiserror::Error;

use relia_core::{LimitStateProblem, Model};

/// Errors that can occur when evaluating a batch of samples.
#[derive(Debug, Error)]
pub enum EvalError<ME, PE> {
    /// The model call failed for the sample at `index`.
    #[error("model call failed for sample {index}")]
    Model {
        index: usize,
        #[source]
        source: ME,
    },

    /// Mapping the sample or extracting its performance value failed.
    #[error("problem error for sample {index}")]
    Problem {
        index: usize,
        #[source]
        source: PE,
    },

    /// The performance value is NaN or infinite.
    #[error("non-finite performance value {value} for sample {index}")]
    NonFinite { index: usize, value: f64 },
}

/// Batch evaluator of a limit-state problem.
///
/// `RunModel` owns the model and the problem that adapts it, and records the
/// physical-space samples it was last asked to evaluate together with the
/// resulting quantities of interest (performance values). Both lists always
/// have the same length.
pub struct RunModel<M, P, const N: usize> {
    model: M,
    problem: P,
    samples: Vec<[f64; N]>,
    qoi: Vec<f64>,
}

impl<M, P, const N: usize> RunModel<M, P, N>
where
    M: Model,
    P: LimitStateProblem<N, Input = M::Input, Output = M::Output>,
{
    /// Creates an evaluator with empty records.
    pub fn new(model: M, problem: P) -> Self {
        Self {
            model,
            problem,
            samples: Vec::new(),
            qoi: Vec::new(),
        }
    }

    /// Evaluates every sample and returns the quantities of interest for
    /// this batch, in sample order.
    ///
    /// With `append = false` the records are replaced by this batch; with
    /// `append = true` the batch is added to them. If any sample fails, the
    /// records are left untouched.
    ///
    /// # Errors
    ///
    /// Returns an [`EvalError`] identifying the first failing sample.
    pub fn run(&mut self, samples: &[[f64; N]], append: bool) -> Result<&[f64], EvalError<M::Error, P::Error>> {
        let qoi = samples
            .iter()
            .enumerate()
            .map(|(index, x)| self.evaluate(index, x))
            .collect::<Result<Vec<_>, _>>()?;

        if !append {
            self.samples.clear();
            self.qoi.clear();
        }
        let start = self.qoi.len();
        self.samples.extend_from_slice(samples);
        self.qoi.extend(qoi);

        Ok(&self.qoi[start..])
    }

    fn evaluate(&self, index: usize, x: &[f64; N]) -> Result<f64, EvalError<M::Error, P::Error>> {
        let input = self
            .problem
            .input(x)
            .map_err(|source| EvalError::Problem { index, source })?;
        let output = self
            .model
            .call(&input)
            .map_err(|source| EvalError::Model { index, source })?;
        let value = self
            .problem
            .performance(&input, &output)
            .map_err(|source| EvalError::Problem { index, source })?;

        if value.is_finite() {
            Ok(value)
        } else {
            Err(EvalError::NonFinite { index, value })
        }
    }
}

impl<M, P, const N: usize> RunModel<M, P, N> {
    /// Returns the recorded samples.
    pub fn samples(&self) -> &[[f64; N]] {
        &self.samples
    }

    /// Returns the recorded quantities of interest.
    pub fn qoi(&self) -> &[f64] {
        &self.qoi
    }

    /// Returns the wrapped model.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Returns the wrapped problem.
    pub fn problem(&self) -> &P {
        &self.problem
    }

    /// Clears the recorded samples and quantities of interest.
    pub fn clear(&mut self) {
        self.samples.clear();
        self.qoi.clear();
    }
}
