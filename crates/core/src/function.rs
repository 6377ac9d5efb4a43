use std::error::Error as StdError;

use nalgebra::DMatrix;

/// A vector function `F: ℝⁿ → ℝⁿ` that can also produce its Jacobian.
///
/// Evaluators write into caller-owned buffers. The residual buffer has the
/// length of `x` and the Jacobian buffer is pre-shaped `n × n`; both are
/// borrowed exclusively for the duration of a call and must not be retained.
/// Solvers allocate these buffers once and reuse them for every iteration.
pub trait Differentiable {
    /// Error returned by the evaluators.
    ///
    /// Solvers hand this error back to their caller unchanged.
    type Error: StdError + Send + Sync + 'static;

    /// Evaluates `F(x)` into `fx`.
    ///
    /// # Errors
    ///
    /// Returns an error if the residual cannot be computed at `x`.
    fn residual(&self, x: &[f64], fx: &mut [f64]) -> Result<(), Self::Error>;

    /// Evaluates the Jacobian `J(x)` into `jx`.
    ///
    /// # Errors
    ///
    /// Returns an error if the Jacobian cannot be computed at `x`.
    fn jacobian(&self, x: &[f64], jx: &mut DMatrix<f64>) -> Result<(), Self::Error>;

    /// Evaluates both `F(x)` and `J(x)`.
    ///
    /// The default calls [`residual`](Self::residual) and then
    /// [`jacobian`](Self::jacobian). Override it when the two share work.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by either evaluator.
    fn residual_and_jacobian(
        &self,
        x: &[f64],
        fx: &mut [f64],
        jx: &mut DMatrix<f64>,
    ) -> Result<(), Self::Error> {
        self.residual(x, fx)?;
        self.jacobian(x, jx)
    }

    /// Returns the length of the residual vector, if known.
    ///
    /// Solvers use this to reject a starting point of the wrong size before
    /// any evaluation happens.
    fn dimension(&self) -> Option<usize> {
        None
    }
}

impl<T: Differentiable + ?Sized> Differentiable for &T {
    type Error = T::Error;

    fn residual(&self, x: &[f64], fx: &mut [f64]) -> Result<(), Self::Error> {
        (**self).residual(x, fx)
    }

    fn jacobian(&self, x: &[f64], jx: &mut DMatrix<f64>) -> Result<(), Self::Error> {
        (**self).jacobian(x, jx)
    }

    fn residual_and_jacobian(
        &self,
        x: &[f64],
        fx: &mut [f64],
        jx: &mut DMatrix<f64>,
    ) -> Result<(), Self::Error> {
        (**self).residual_and_jacobian(x, fx, jx)
    }

    fn dimension(&self) -> Option<usize> {
        (**self).dimension()
    }
}

/// Marker for a combined evaluator synthesized from the separate ones.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sequential;

/// A caller-supplied combined evaluator.
#[derive(Debug, Clone, Copy)]
pub struct Fused<FJ>(pub FJ);

/// A [`Differentiable`] built from closures.
///
/// The combined evaluator is fixed at construction: [`new`](Self::new)
/// synthesizes it from the residual and Jacobian closures, while
/// [`with_fused`](Self::with_fused) takes an explicit one.
///
/// ```
/// use std::convert::Infallible;
///
/// use nlroot_core::{Differentiable, DifferentiableFunction};
///
/// let f = DifferentiableFunction::new(
///     |x: &[f64], fx: &mut [f64]| {
///         fx[0] = x[0] * x[0] - 2.0;
///         Ok::<(), Infallible>(())
///     },
///     |x: &[f64], jx: &mut nalgebra::DMatrix<f64>| {
///         jx[(0, 0)] = 2.0 * x[0];
///         Ok::<(), Infallible>(())
///     },
/// );
///
/// let mut fx = [0.0];
/// f.residual(&[3.0], &mut fx).unwrap();
/// assert_eq!(fx, [7.0]);
/// ```
#[derive(Debug, Clone)]
pub struct DifferentiableFunction<F, J, FJ = Sequential> {
    residual: F,
    jacobian: J,
    combined: FJ,
    dimension: Option<usize>,
}

impl<F, J> DifferentiableFunction<F, J, Sequential> {
    /// Creates a function whose combined evaluator calls the residual and
    /// then the Jacobian closure.
    pub fn new<E>(residual: F, jacobian: J) -> Self
    where
        F: Fn(&[f64], &mut [f64]) -> Result<(), E>,
        J: Fn(&[f64], &mut DMatrix<f64>) -> Result<(), E>,
    {
        Self {
            residual,
            jacobian,
            combined: Sequential,
            dimension: None,
        }
    }
}

impl<F, J, FJ> DifferentiableFunction<F, J, Fused<FJ>> {
    /// Creates a function with an explicit combined evaluator.
    ///
    /// `fused` must produce the same values as calling `residual` and then
    /// `jacobian`; it exists so callers can share work between the two.
    pub fn with_fused<E>(residual: F, jacobian: J, fused: FJ) -> Self
    where
        F: Fn(&[f64], &mut [f64]) -> Result<(), E>,
        J: Fn(&[f64], &mut DMatrix<f64>) -> Result<(), E>,
        FJ: Fn(&[f64], &mut [f64], &mut DMatrix<f64>) -> Result<(), E>,
    {
        Self {
            residual,
            jacobian,
            combined: Fused(fused),
            dimension: None,
        }
    }
}

impl<F, J, FJ> DifferentiableFunction<F, J, FJ> {
    /// Declares the length of the residual vector.
    #[must_use]
    pub fn with_dimension(mut self, dimension: usize) -> Self {
        self.dimension = Some(dimension);
        self
    }
}

impl<F, J, E> Differentiable for DifferentiableFunction<F, J, Sequential>
where
    F: Fn(&[f64], &mut [f64]) -> Result<(), E>,
    J: Fn(&[f64], &mut DMatrix<f64>) -> Result<(), E>,
    E: StdError + Send + Sync + 'static,
{
    type Error = E;

    fn residual(&self, x: &[f64], fx: &mut [f64]) -> Result<(), E> {
        (self.residual)(x, fx)
    }

    fn jacobian(&self, x: &[f64], jx: &mut DMatrix<f64>) -> Result<(), E> {
        (self.jacobian)(x, jx)
    }

    fn dimension(&self) -> Option<usize> {
        self.dimension
    }
}

impl<F, J, FJ, E> Differentiable for DifferentiableFunction<F, J, Fused<FJ>>
where
    F: Fn(&[f64], &mut [f64]) -> Result<(), E>,
    J: Fn(&[f64], &mut DMatrix<f64>) -> Result<(), E>,
    FJ: Fn(&[f64], &mut [f64], &mut DMatrix<f64>) -> Result<(), E>,
    E: StdError + Send + Sync + 'static,
{
    type Error = E;

    fn residual(&self, x: &[f64], fx: &mut [f64]) -> Result<(), E> {
        (self.residual)(x, fx)
    }

    fn jacobian(&self, x: &[f64], jx: &mut DMatrix<f64>) -> Result<(), E> {
        (self.jacobian)(x, jx)
    }

    fn residual_and_jacobian(
        &self,
        x: &[f64],
        fx: &mut [f64],
        jx: &mut DMatrix<f64>,
    ) -> Result<(), E> {
        (self.combined.0)(x, fx, jx)
    }

    fn dimension(&self) -> Option<usize> {
        self.dimension
    }
}
