//! Newton's method for square systems of nonlinear equations.
//!
//! # Algorithm
//!
//! Starting from `x₀`, each iteration solves the linear system
//! `J(xₖ) δ = -F(xₖ)` exactly (LU with partial pivoting) and moves to
//! `xₖ₊₁ = xₖ + δ`. No damping or line search is applied.
//!
//! The solve stops as soon as either criterion holds:
//!
//! - `‖xₖ₊₁ - xₖ‖∞ < xtol` (disabled by the default `xtol = 0`)
//! - `‖F(xₖ₊₁)‖∞ < ftol`
//!
//! or when [`Options::iterations`] have been performed. Hitting the iteration
//! limit is a normal outcome, visible through [`SolverResults::converged`].
//!
//! # Evaluations
//!
//! The residual and Jacobian are evaluated together once at `x₀` and once
//! per iteration, so after `N` iterations both call counts are `N + 1`.
//!
//! # Trace
//!
//! With [`Options::store_trace`] the results carry one [`SolverState`] per
//! iteration, starting with iteration `0` at `x₀`. With
//! [`Options::show_trace`] the same entries are written to the diagnostic
//! output as they are produced. [`Options::extended_trace`] adds the
//! iterate, residual, Jacobian and step to each entry.
//!
//! [`SolverResults::converged`]: nlroot_core::SolverResults::converged
//! [`SolverState`]: nlroot_core::SolverState

mod error;
mod options;
mod workspace;


pub use error::Error;
pub use options::{ConfigError, Options};

use std::io::{self, Write};

use nlroot_core::{
    Convergence, Differentiable, Metadata, SolverResults, SolverState, SolverTrace,
    assess_convergence, inf_norm,
};

use workspace::Workspace;

/// Name reported in [`SolverResults::method`].
pub const METHOD: &str = "Newton";

/// Solves `F(x) = 0` with Newton's method, showing any trace on stdout.
///
/// See the [module docs](self) for the stopping rules.
///
/// Stdout is locked per write, not for the whole solve, so concurrent solves
/// on other threads are never held up.
///
/// # Errors
///
/// Returns an error if the options are invalid, the function's dimensions do
/// not match `initial_x`, the residual at `initial_x` is not finite, the
/// Jacobian is singular, or an evaluator fails.
///
/// The dimension check only runs when the function declares
/// [`Differentiable::dimension`]. An undeclared function that fills fewer
/// rows than `initial_x` has components leaves zero rows in the Jacobian,
/// which usually surfaces as [`Error::SingularJacobian`] at iteration 1.
pub fn solve<D>(
    function: &D,
    initial_x: &[f64],
    options: &Options,
) -> Result<SolverResults, Error<D::Error>>
where
    D: Differentiable,
{
    solve_with_writer(function, initial_x, options, &mut io::stdout())
}

/// Solves `F(x) = 0` with Newton's method using the default [`Options`].
///
/// # Errors
///
/// See [`solve`].
pub fn solve_with_defaults<D>(
    function: &D,
    initial_x: &[f64],
) -> Result<SolverResults, Error<D::Error>>
where
    D: Differentiable,
{
    solve(function, initial_x, &Options::default())
}

/// Solves `F(x) = 0` with Newton's method, showing any trace on `out`.
///
/// Failures while writing to `out` are logged and do not affect the solve.
///
/// # Errors
///
/// See [`solve`].
pub fn solve_with_writer<D, W>(
    function: &D,
    initial_x: &[f64],
    options: &Options,
    out: &mut W,
) -> Result<SolverResults, Error<D::Error>>
where
    D: Differentiable,
    W: Write + ?Sized,
{
    options.validate()?;

    let n = initial_x.len();
    if let Some(found) = function.dimension() {
        if found != n {
            return Err(Error::DimensionMismatch { expected: n, found });
        }
    }

    tracing::debug!(
        n,
        xtol = options.xtol,
        ftol = options.ftol,
        iterations = options.iterations,
        "starting newton solve"
    );

    let mut ws = Workspace::new(initial_x);
    ws.evaluate(function)?;
    if ws.fx.iter().any(|value| !value.is_finite()) {
        return Err(Error::NonFiniteResidual);
    }

    let store = options.store_trace;
    let show = options.shows_trace();
    let extended = options.extended_trace;

    let mut trace = SolverTrace::new();
    if show {
        if let Err(error) = SolverTrace::write_header(out) {
            tracing::warn!(%error, "failed to show trace header");
        }
    }

    let mut residual_norm = inf_norm(&ws.fx);
    if options.traces() {
        let metadata = extended_metadata(&ws, extended, false);
        let state = SolverState::with_metadata(0, residual_norm, f64::NAN, metadata);
        trace.update(state, store, show, out);
    }

    // No step has been taken yet, so only the residual criterion can hold.
    let mut convergence = Convergence {
        x_converged: false,
        f_converged: residual_norm < options.ftol,
    };

    let mut iteration = 0;
    while !convergence.converged() && iteration < options.iterations {
        iteration += 1;

        let step_norm = ws.newton_step::<D::Error>(iteration)?;
        ws.advance();
        ws.evaluate(function)?;

        residual_norm = inf_norm(&ws.fx);
        convergence = assess_convergence(&ws.x, &ws.x_prev, &ws.fx, options.xtol, options.ftol);

        if options.traces() {
            let metadata = extended_metadata(&ws, extended, true);
            let state = SolverState::with_metadata(iteration, residual_norm, step_norm, metadata);
            trace.update(state, store, show, out);
        }

        if residual_norm.is_nan() {
            tracing::warn!(iteration, "residual is NaN; stopping");
            break;
        }
    }

    tracing::debug!(
        iterations = iteration,
        converged = convergence.converged(),
        residual_norm,
        "newton solve finished"
    );

    Ok(SolverResults {
        method: METHOD.to_owned(),
        initial_x: initial_x.to_vec(),
        zero: ws.x,
        residual_norm,
        iterations: iteration,
        x_converged: convergence.x_converged,
        xtol: options.xtol,
        f_converged: convergence.f_converged,
        ftol: options.ftol,
        trace,
        residual_calls: ws.residual_calls,
        jacobian_calls: ws.jacobian_calls,
    })
}

fn extended_metadata(ws: &Workspace, extended: bool, with_step: bool) -> Metadata {
    if extended {
        ws.metadata(with_step)
    } else {
        Metadata::new()
    }
}
