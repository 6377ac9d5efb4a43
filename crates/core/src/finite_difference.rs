use std::cell::RefCell;
use std::error::Error as StdError;

use nalgebra::DMatrix;

use crate::Differentiable;

/// A [`Differentiable`] that approximates the Jacobian by central differences.
///
/// Only a residual closure is required. Each Jacobian evaluation costs `2n`
/// residual evaluations, made on internal scratch buffers that are reused
/// across calls. Because of that scratch state the adapter is not `Sync`, so
/// each concurrent solve needs its own instance.
pub struct FiniteDifference<F> {
    residual: F,
    scratch: RefCell<Scratch>,
    dimension: Option<usize>,
}

#[derive(Debug, Default)]
struct Scratch {
    x: Vec<f64>,
    f_plus: Vec<f64>,
    f_minus: Vec<f64>,
}

impl<F> FiniteDifference<F> {
    /// Wraps a residual closure.
    pub fn new(residual: F) -> Self {
        Self {
            residual,
            scratch: RefCell::new(Scratch::default()),
            dimension: None,
        }
    }

    /// Declares the length of the residual vector.
    #[must_use]
    pub fn with_dimension(mut self, dimension: usize) -> Self {
        self.dimension = Some(dimension);
        self
    }
}

/// Central difference step for a component with value `x`.
fn step_size(x: f64) -> f64 {
    f64::EPSILON.cbrt() * x.abs().max(1.0)
}

impl<F, E> Differentiable for FiniteDifference<F>
where
    F: Fn(&[f64], &mut [f64]) -> Result<(), E>,
    E: StdError + Send + Sync + 'static,
{
    type Error = E;

    fn residual(&self, x: &[f64], fx: &mut [f64]) -> Result<(), E> {
        (self.residual)(x, fx)
    }

    fn jacobian(&self, x: &[f64], jx: &mut DMatrix<f64>) -> Result<(), E> {
        let rows = jx.nrows();
        let cols = x.len().min(jx.ncols());

        let mut scratch = self.scratch.borrow_mut();
        let Scratch {
            x: shifted,
            f_plus,
            f_minus,
        } = &mut *scratch;

        shifted.clear();
        shifted.extend_from_slice(x);
        f_plus.resize(rows, 0.0);
        f_minus.resize(rows, 0.0);

        for j in 0..cols {
            let h = step_size(x[j]);
            let forward = x[j] + h;
            let backward = x[j] - h;

            shifted[j] = forward;
            (self.residual)(shifted.as_slice(), f_plus.as_mut_slice())?;
            shifted[j] = backward;
            (self.residual)(shifted.as_slice(), f_minus.as_mut_slice())?;
            shifted[j] = x[j];

            // Representable width, not 2h.
            let width = forward - backward;
            for i in 0..rows {
                jx[(i, j)] = (f_plus[i] - f_minus[i]) / width;
            }
        }

        Ok(())
    }

    fn dimension(&self) -> Option<usize> {
        self.dimension
    }
}
