use thiserror::Error;

use super::ConfigError;

/// Errors that can occur during a Newton solve.
///
/// Running out of iterations is not an error; it is reported through the
/// convergence flags of the returned results.
#[derive(Debug, Error)]
pub enum Error<E> {
    #[error("invalid config: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error("starting point has {expected} components but the function has {found} residuals")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("jacobian must be {expected}x{expected}, found {rows}x{cols}")]
    JacobianShape {
        expected: usize,
        rows: usize,
        cols: usize,
    },

    #[error("non-finite residual at the starting point")]
    NonFiniteResidual,

    /// The LU factorization hit a zero pivot.
    ///
    /// At iteration 1 this is also how a function that fills fewer rows than
    /// the starting point has components shows up, unless it declares its
    /// dimension.
    #[error("singular jacobian at iteration {iteration}")]
    SingularJacobian { iteration: usize },

    #[error("non-finite newton step at iteration {iteration}")]
    NonFiniteStep { iteration: usize },

    /// A caller-supplied evaluator failed; the error is passed through as is.
    #[error("function evaluation failed")]
    Evaluation(#[source] E),
}

impl<E> Error<E> {
    /// Returns the evaluator error, if that is what stopped the solve.
    pub fn into_evaluation(self) -> Option<E> {
        match self {
            Self::Evaluation(error) => Some(error),
            _ => None,
        }
    }
}
