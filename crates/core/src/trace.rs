use std::fmt;
use std::io::{self, Write};
use std::ops::{Index, IndexMut};

use crate::SolverState;

const HEADER: &str = "Iter     f(x) inf-norm    Step 2-norm \n------   --------------   --------------\n";

/// An append-only log of [`SolverState`]s, one per recorded iteration.
///
/// ```
/// use nlroot_core::{SolverState, SolverTrace};
///
/// let mut trace = SolverTrace::new();
/// assert!(trace.is_empty());
///
/// trace.push(SolverState::new(0, 1.0));
/// trace.push(SolverState::with_step(1, 0.25, 0.5));
///
/// assert_eq!(trace.len(), 2);
/// assert_eq!(trace.last().map(|state| state.iteration), Some(1));
/// assert_eq!(trace.iter().map(|state| state.residual_norm).sum::<f64>(), 1.25);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolverTrace {
    states: Vec<SolverState>,
}

impl SolverTrace {
    /// Creates an empty trace.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a state.
    pub fn push(&mut self, state: SolverState) {
        self.states.push(state);
    }

    /// Returns the number of recorded states.
    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Returns `true` if no state has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Returns the most recent state, if any.
    #[must_use]
    pub fn last(&self) -> Option<&SolverState> {
        self.states.last()
    }

    /// Iterates over the states in iteration order.
    pub fn iter(&self) -> std::slice::Iter<'_, SolverState> {
        self.states.iter()
    }

    /// Writes the two-line column header.
    ///
    /// # Errors
    ///
    /// Returns any error raised by `out`.
    pub fn write_header<W: Write + ?Sized>(out: &mut W) -> io::Result<()> {
        out.write_all(HEADER.as_bytes())
    }

    /// Records a state, showing it on `out` and/or storing it.
    ///
    /// `store` and `show` are independent. Failures while writing to `out`
    /// are logged and otherwise ignored so that rendering never interrupts a
    /// solve.
    pub fn update<W: Write + ?Sized>(
        &mut self,
        state: SolverState,
        store: bool,
        show: bool,
        out: &mut W,
    ) {
        if show {
            if let Err(error) = write!(out, "{state}") {
                tracing::warn!(%error, iteration = state.iteration, "failed to show solver state");
            }
        }
        if store {
            self.push(state);
        }
    }
}

impl Index<usize> for SolverTrace {
    type Output = SolverState;

    fn index(&self, index: usize) -> &SolverState {
        &self.states[index]
    }
}

impl IndexMut<usize> for SolverTrace {
    fn index_mut(&mut self, index: usize) -> &mut SolverState {
        &mut self.states[index]
    }
}

impl<'a> IntoIterator for &'a SolverTrace {
    type Item = &'a SolverState;
    type IntoIter = std::slice::Iter<'a, SolverState>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for SolverTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(HEADER)?;
        for state in &self.states {
            write!(f, "{state}")?;
        }
        Ok(())
    }
}
