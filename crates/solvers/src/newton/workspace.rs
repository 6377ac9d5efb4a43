use std::mem;

use nalgebra::{DMatrix, DVector, LU};

use nlroot_core::{Differentiable, MetaValue, Metadata};

use super::Error;

/// Buffers for one Newton solve, allocated once and reused every iteration.
pub(super) struct Workspace {
    pub(super) x: Vec<f64>,
    pub(super) x_prev: Vec<f64>,
    pub(super) fx: Vec<f64>,
    jx: DMatrix<f64>,
    factors: DMatrix<f64>,
    step: DVector<f64>,
    pub(super) residual_calls: usize,
    pub(super) jacobian_calls: usize,
}

impl Workspace {
    pub(super) fn new(initial_x: &[f64]) -> Self {
        let n = initial_x.len();
        Self {
            x: initial_x.to_vec(),
            x_prev: initial_x.to_vec(),
            fx: vec![0.0; n],
            jx: DMatrix::zeros(n, n),
            factors: DMatrix::zeros(n, n),
            step: DVector::zeros(n),
            residual_calls: 0,
            jacobian_calls: 0,
        }
    }

    /// Evaluates `F` and `J` at the current iterate.
    pub(super) fn evaluate<D: Differentiable>(
        &mut self,
        function: &D,
    ) -> Result<(), Error<D::Error>> {
        self.residual_calls += 1;
        self.jacobian_calls += 1;
        function
            .residual_and_jacobian(&self.x, &mut self.fx, &mut self.jx)
            .map_err(Error::Evaluation)?;

        let n = self.x.len();
        let (rows, cols) = self.jx.shape();
        if rows != n || cols != n {
            return Err(Error::JacobianShape {
                expected: n,
                rows,
                cols,
            });
        }
        Ok(())
    }

    /// Solves `J δ = -F` for the Newton step and returns `‖δ‖₂`.
    pub(super) fn newton_step<E>(&mut self, iteration: usize) -> Result<f64, Error<E>> {
        self.step.copy_from_slice(&self.fx);
        self.step.neg_mut();

        // `jx` must survive for the extended trace, so factor a copy. `LU` takes
        // its matrix by value and `l_unpack` hands the same storage back; only
        // the pivot sequence is allocated per step.
        self.factors.copy_from(&self.jx);
        let lu = LU::new(mem::replace(&mut self.factors, DMatrix::zeros(0, 0)));
        let solved = lu.solve_mut(&mut self.step);
        self.factors = lu.l_unpack();

        if !solved {
            tracing::warn!(iteration, "singular jacobian");
            return Err(Error::SingularJacobian { iteration });
        }
        if self.step.iter().any(|value| !value.is_finite()) {
            tracing::warn!(iteration, "non-finite newton step");
            return Err(Error::NonFiniteStep { iteration });
        }

        Ok(self.step.norm())
    }

    /// Moves to `x + δ`, keeping the old iterate in `x_prev`.
    pub(super) fn advance(&mut self) {
        self.x_prev.copy_from_slice(&self.x);
        for (x, delta) in self.x.iter_mut().zip(self.step.iter()) {
            *x += delta;
        }
    }

    /// Snapshot of the buffers for an extended trace entry.
    pub(super) fn metadata(&self, with_step: bool) -> Metadata {
        let mut metadata = Metadata::new();
        metadata.insert("x".into(), MetaValue::from(self.x.as_slice()));
        metadata.insert("f(x)".into(), MetaValue::from(self.fx.as_slice()));
        metadata.insert("J(x)".into(), MetaValue::Matrix(self.jx.clone()));
        if with_step {
            metadata.insert("step".into(), MetaValue::from(self.step.as_slice()));
        }
        metadata
    }
}
