use std::fmt;

use crate::SolverTrace;

/// Summary of a completed nonlinear solve.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolverResults {
    /// Name of the algorithm that produced the result.
    pub method: String,

    /// Starting point handed to the solver.
    pub initial_x: Vec<f64>,

    /// Final iterate.
    pub zero: Vec<f64>,

    /// Infinity norm of the residual at [`zero`](Self::zero).
    pub residual_norm: f64,

    /// Number of iterations performed.
    pub iterations: usize,

    /// Whether the last step was shorter than [`xtol`](Self::xtol).
    pub x_converged: bool,

    /// Step tolerance the solve ran with.
    pub xtol: f64,

    /// Whether the final residual was below [`ftol`](Self::ftol).
    pub f_converged: bool,

    /// Residual tolerance the solve ran with.
    pub ftol: f64,

    /// Per-iteration log; empty unless the trace was stored.
    pub trace: SolverTrace,

    /// Number of residual evaluations.
    pub residual_calls: usize,

    /// Number of Jacobian evaluations.
    pub jacobian_calls: usize,
}

impl SolverResults {
    /// Returns `true` if either convergence criterion was met.
    #[must_use]
    pub fn converged(&self) -> bool {
        self.x_converged || self.f_converged
    }
}

impl fmt::Display for SolverResults {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Results of Nonlinear Solver Algorithm")?;
        writeln!(f, " * Algorithm: {}", self.method)?;
        writeln!(f, " * Starting Point: {:?}", self.initial_x)?;
        writeln!(f, " * Zero: {:?}", self.zero)?;
        writeln!(f, " * Inf-norm of residuals: {:.6}", self.residual_norm)?;
        writeln!(f, " * Iterations: {}", self.iterations)?;
        writeln!(f, " * Convergence: {}", self.converged())?;
        writeln!(f, "   * |x - x'| < {:.1e}: {}", self.xtol, self.x_converged)?;
        writeln!(f, "   * |f(x)| < {:.1e}: {}", self.ftol, self.f_converged)?;
        writeln!(f, " * Function Calls (f): {}", self.residual_calls)?;
        write!(f, " * Jacobian Calls (df/dx): {}", self.jacobian_calls)
    }
}
