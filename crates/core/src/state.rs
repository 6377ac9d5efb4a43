use std::collections::BTreeMap;
use std::fmt;

use nalgebra::DMatrix;

/// A diagnostic value attached to a [`SolverState`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MetaValue {
    /// A single scalar.
    Number(f64),
    /// Free-form text, rendered as is.
    Text(String),
    /// A vector such as an iterate or residual.
    Vector(Vec<f64>),
    /// A matrix such as the Jacobian, rendered row by row.
    Matrix(DMatrix<f64>),
}

/// Named diagnostics recorded alongside a [`SolverState`].
///
/// Keys render in sorted order.
pub type Metadata = BTreeMap<String, MetaValue>;

impl fmt::Display for MetaValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(text) => f.write_str(text),
            Self::Vector(values) => write!(f, "{values:?}"),
            Self::Matrix(matrix) => {
                f.write_str("[")?;
                for (i, row) in matrix.row_iter().enumerate() {
                    if i > 0 {
                        f.write_str("; ")?;
                    }
                    for (j, value) in row.iter().enumerate() {
                        if j > 0 {
                            f.write_str(" ")?;
                        }
                        write!(f, "{value}")?;
                    }
                }
                f.write_str("]")
            }
        }
    }
}

impl From<f64> for MetaValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<String> for MetaValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for MetaValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<Vec<f64>> for MetaValue {
    fn from(value: Vec<f64>) -> Self {
        Self::Vector(value)
    }
}

impl From<&[f64]> for MetaValue {
    fn from(value: &[f64]) -> Self {
        Self::Vector(value.to_vec())
    }
}

impl From<DMatrix<f64>> for MetaValue {
    fn from(value: DMatrix<f64>) -> Self {
        Self::Matrix(value)
    }
}

/// A snapshot of one solver iteration.
///
/// The initial state has no preceding step, so its `step_norm` is `NaN`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolverState {
    /// Iteration index, `0` for the starting point.
    pub iteration: usize,

    /// Infinity norm of the residual at this iteration's iterate.
    pub residual_norm: f64,

    /// Euclidean norm of the step that produced this iterate.
    pub step_norm: f64,

    /// Extra diagnostics, empty unless requested.
    pub metadata: Metadata,
}

impl SolverState {
    /// Creates a state with no step and no metadata.
    #[must_use]
    pub fn new(iteration: usize, residual_norm: f64) -> Self {
        Self::with_step(iteration, residual_norm, f64::NAN)
    }

    /// Creates a state with a step norm and no metadata.
    #[must_use]
    pub fn with_step(iteration: usize, residual_norm: f64, step_norm: f64) -> Self {
        Self::with_metadata(iteration, residual_norm, step_norm, Metadata::new())
    }

    /// Creates a state with a step norm and metadata.
    #[must_use]
    pub fn with_metadata(
        iteration: usize,
        residual_norm: f64,
        step_norm: f64,
        metadata: Metadata,
    ) -> Self {
        Self {
            iteration,
            residual_norm,
            step_norm,
            metadata,
        }
    }
}

impl fmt::Display for SolverState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:6}   {:14.6e}   {:14.6e}",
            self.iteration, self.residual_norm, self.step_norm
        )?;
        for (key, value) in &self.metadata {
            writeln!(f, " * {key}: {value}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_fill_defaults() {
        let initial = SolverState::new(0, 2.5);
        assert_eq!(initial.iteration, 0);
        assert!(initial.step_norm.is_nan());
        assert!(initial.metadata.is_empty());

        let stepped = SolverState::with_step(3, 1e-4, 0.5);
        assert_eq!(stepped.step_norm, 0.5);
        assert!(stepped.metadata.is_empty());
    }

    #[test]
    fn renders_fixed_width_line() {
        let state = SolverState::with_step(2, 1.5e-3, 0.25);
        assert_eq!(
            state.to_string(),
            "     2      1.500000e-3      2.500000e-1\n"
        );
    }

    #[test]
    fn renders_nan_step_for_initial_state() {
        let rendered = SolverState::new(0, 1.0).to_string();
        assert!(rendered.trim_end().ends_with("NaN"));
    }

    #[test]
    fn renders_metadata_lines_in_key_order() {
        let mut metadata = Metadata::new();
        metadata.insert("x".into(), MetaValue::Vector(vec![1.0, 2.0]));
        metadata.insert("damping".into(), MetaValue::Number(0.5));
        metadata.insert("note".into(), "accepted".into());

        let state = SolverState::with_metadata(1, 1.0, 1.0, metadata);
        let rendered = state.to_string();
        let lines: Vec<_> = rendered.lines().skip(1).collect();

        assert_eq!(
            lines,
            vec![" * damping: 0.5", " * note: accepted", " * x: [1.0, 2.0]"]
        );
    }

    #[test]
    fn renders_matrix_by_rows() {
        let matrix = DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(MetaValue::from(matrix).to_string(), "[1 2; 3 4]");
    }
}
