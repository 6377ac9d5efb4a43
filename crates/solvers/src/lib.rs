//! Solvers for systems of nonlinear equations `F(x) = 0`.
//!
//! A [`Differentiable`] supplies the residual `F(x)` and its Jacobian. Solvers
//! in this crate drive the residual toward zero and return a
//! [`SolverResults`] describing the run.
//!
//! # Solvers
//!
//! - [`newton`]: Newton's method with an exact linear solve per iteration
//!
//! # Example
//!
//! ```
//! use std::convert::Infallible;
//!
//! use nalgebra::DMatrix;
//! use nlroot_core::DifferentiableFunction;
//! use nlroot_solvers::{Options, solve};
//!
//! let function = DifferentiableFunction::new(
//!     |x: &[f64], fx: &mut [f64]| {
//!         fx[0] = x[0] * x[0] - 2.0;
//!         Ok::<(), Infallible>(())
//!     },
//!     |x: &[f64], jx: &mut DMatrix<f64>| {
//!         jx[(0, 0)] = 2.0 * x[0];
//!         Ok::<(), Infallible>(())
//!     },
//! );
//!
//! let results = solve(&function, &[1.0], &Options::default()).unwrap();
//! assert!(results.converged());
//! assert!((results.zero[0] - 2.0_f64.sqrt()).abs() < 1e-8);
//! ```
//!
//! [`Differentiable`]: nlroot_core::Differentiable
//! [`SolverResults`]: nlroot_core::SolverResults

pub mod newton;

pub use newton::{Error, Options, solve, solve_with_defaults, solve_with_writer};
