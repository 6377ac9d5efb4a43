/// Outcome of testing an iterate against the step and residual tolerances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Convergence {
    /// `‖x - x_prev‖∞ < xtol`.
    pub x_converged: bool,
    /// `‖f‖∞ < ftol`.
    pub f_converged: bool,
}

impl Convergence {
    /// Returns `true` if either criterion is met.
    #[must_use]
    pub fn converged(&self) -> bool {
        self.x_converged || self.f_converged
    }
}

/// Tests `x` against both convergence criteria.
///
/// The step criterion compares `x` with `x_prev` and the residual criterion
/// looks only at `f`. Both comparisons are strict, so a tolerance of zero
/// disables the corresponding criterion.
#[must_use]
pub fn assess_convergence(
    x: &[f64],
    x_prev: &[f64],
    f: &[f64],
    xtol: f64,
    ftol: f64,
) -> Convergence {
    Convergence {
        x_converged: inf_norm_diff(x, x_prev) < xtol,
        f_converged: inf_norm(f) < ftol,
    }
}

/// Returns the largest absolute component of `v`.
///
/// An empty vector has norm `0`. Any `NaN` component makes the norm `NaN`.
#[must_use]
pub fn inf_norm(v: &[f64]) -> f64 {
    v.iter()
        .try_fold(0.0_f64, |max, &value| {
            if value.is_nan() {
                None
            } else {
                Some(max.max(value.abs()))
            }
        })
        .unwrap_or(f64::NAN)
}

/// Returns `‖a - b‖∞` without allocating.
///
/// Extra trailing components of the longer slice are ignored.
#[must_use]
pub fn inf_norm_diff(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .try_fold(0.0_f64, |max, (&ai, &bi)| {
            let diff = ai - bi;
            if diff.is_nan() {
                None
            } else {
                Some(max.max(diff.abs()))
            }
        })
        .unwrap_or(f64::NAN)
}

/// Returns the Euclidean norm of `v`.
#[must_use]
pub fn norm2(v: &[f64]) -> f64 {
    v.iter().map(|value| value * value).sum::<f64>().sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn inf_norm_of_empty_is_zero() {
        assert_eq!(inf_norm(&[]), 0.0);
        assert_eq!(inf_norm_diff(&[], &[]), 0.0);
    }

    #[test]
    fn inf_norm_takes_largest_magnitude() {
        assert_eq!(inf_norm(&[1.0, -3.5, 2.0]), 3.5);
        assert_eq!(inf_norm_diff(&[1.0, 2.0], &[1.5, -1.0]), 3.0);
    }

    #[test]
    fn inf_norm_propagates_nan() {
        assert!(inf_norm(&[0.0, f64::NAN, 1.0]).is_nan());
        assert!(inf_norm_diff(&[f64::NAN], &[0.0]).is_nan());
    }

    #[test]
    fn norm2_is_euclidean() {
        assert_relative_eq!(norm2(&[3.0, 4.0]), 5.0);
        assert_eq!(norm2(&[]), 0.0);
    }

    #[test]
    fn step_criterion_ignores_residual() {
        let x = [1.0, 2.0];
        let x_prev = [1.0, 2.0 + 1e-9];

        let small_f = assess_convergence(&x, &x_prev, &[0.0, 0.0], 1e-6, 0.0);
        let large_f = assess_convergence(&x, &x_prev, &[1e6, -1e6], 1e-6, 0.0);

        assert!(small_f.x_converged);
        assert!(large_f.x_converged);
        assert!(!large_f.f_converged);
        assert!(large_f.converged());
    }

    #[test]
    fn residual_criterion_ignores_step() {
        let f = [1e-10, -1e-11];

        let near = assess_convergence(&[0.0], &[0.0], &f, 0.0, 1e-8);
        let far = assess_convergence(&[100.0], &[-100.0], &f, 0.0, 1e-8);

        assert!(near.f_converged && far.f_converged);
        assert!(!near.x_converged && !far.x_converged);
        assert!(far.converged());
    }

    #[test]
    fn comparisons_are_strict() {
        let at_tol = assess_convergence(&[1.0], &[0.5], &[0.5], 0.5, 0.5);
        assert_eq!(at_tol, Convergence::default());
        assert!(!at_tol.converged());
    }

    #[test]
    fn zero_tolerance_never_converges() {
        let exact = assess_convergence(&[1.0], &[1.0], &[0.0], 0.0, 0.0);
        assert!(!exact.converged());
    }

    #[test]
    fn either_criterion_suffices() {
        for (x_ok, f_ok) in [(false, false), (true, false), (false, true), (true, true)] {
            let x_prev = if x_ok { [0.0] } else { [1.0] };
            let f = if f_ok { [0.0] } else { [1.0] };

            let result = assess_convergence(&[0.0], &x_prev, &f, 0.5, 0.5);

            assert_eq!(result.x_converged, x_ok);
            assert_eq!(result.f_converged, f_ok);
            assert_eq!(result.converged(), x_ok || f_ok);
        }
    }
}
