//! Core types for solving systems of nonlinear equations `F(x) = 0`.
//!
//! This crate defines the scaffolding that root-finding algorithms plug into:
//!
//! - [`Differentiable`]: a vector function that can also produce its Jacobian,
//!   with [`DifferentiableFunction`] and [`FiniteDifference`] as closure-based
//!   implementations
//! - [`SolverState`] and [`SolverTrace`]: per-iteration diagnostics
//! - [`assess_convergence`]: the step and residual convergence tests
//! - [`SolverResults`]: the summary returned by a solve

mod convergence;
mod finite_difference;
mod function;
mod results;
mod state;
mod trace;

pub use convergence::{Convergence, assess_convergence, inf_norm, inf_norm_diff, norm2};
pub use finite_difference::FiniteDifference;
pub use function::{Differentiable, DifferentiableFunction, Fused, Sequential};
pub use results::SolverResults;
pub use state::{MetaValue, Metadata, SolverState};
pub use trace::SolverTrace;
