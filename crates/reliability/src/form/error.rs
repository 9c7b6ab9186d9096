use std::error::Error as StdError;

use thiserror::Error;

use crate::EvalError;

use super::ConfigError;

/// Errors that can occur during a FORM run.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// The performance gradient vanished, leaving the search direction
    /// undefined.
    #[error("zero gradient norm at iteration {k}")]
    ZeroGradient { k: usize },

    /// A point mapped to physical space is NaN or infinite.
    #[error("non-finite point at iteration {k}")]
    NonFinitePoint { k: usize },

    /// The performance value for a sample is NaN or infinite.
    #[error("non-finite performance value {value} for sample {index}")]
    NonFinitePerformance { index: usize, value: f64 },

    #[error("model call failed for sample {index}")]
    Model {
        index: usize,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    #[error("problem error for sample {index}")]
    Problem {
        index: usize,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },
}

impl<ME, PE> From<EvalError<ME, PE>> for Error
where
    ME: StdError + Send + Sync + 'static,
    PE: StdError + Send + Sync + 'static,
{
    fn from(err: EvalError<ME, PE>) -> Self {
        match err {
            EvalError::Model { index, source } => Self::Model {
                index,
                source: Box::new(source),
            },
            EvalError::Problem { index, source } => Self::Problem {
                index,
                source: Box::new(source),
            },
            EvalError::NonFinite { index, value } => Self::NonFinitePerformance { index, value },
        }
    }
}
