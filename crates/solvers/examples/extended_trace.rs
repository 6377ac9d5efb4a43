//! Solves a small nonlinear system and prints the extended trace.
//!
//! ```sh
//! cargo run -p nlroot-solvers --example extended_trace
//! ```

use std::convert::Infallible;

use nalgebra::DMatrix;
use nlroot_core::DifferentiableFunction;
use nlroot_solvers::{Options, solve};

fn main() {
    // Intersection of the circle x² + y² = 4 with the curve y = eˣ - 1.
    let function = DifferentiableFunction::new(
        |x: &[f64], fx: &mut [f64]| {
            fx[0] = x[0] * x[0] + x[1] * x[1] - 4.0;
            fx[1] = x[0].exp() - 1.0 - x[1];
            Ok::<(), Infallible>(())
        },
        |x: &[f64], jx: &mut DMatrix<f64>| {
            jx[(0, 0)] = 2.0 * x[0];
            jx[(0, 1)] = 2.0 * x[1];
            jx[(1, 0)] = x[0].exp();
            jx[(1, 1)] = -1.0;
            Ok::<(), Infallible>(())
        },
    )
    .with_dimension(2);

    let options = Options {
        ftol: 1e-12,
        extended_trace: true,
        ..Options::default()
    };

    match solve(&function, &[1.0, 1.0], &options) {
        Ok(results) => println!("\n{results}"),
        Err(error) => eprintln!("solve failed: {error}"),
    }
}
