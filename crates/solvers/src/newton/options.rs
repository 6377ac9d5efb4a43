use thiserror::Error;

/// Options for Newton's method.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Options {
    /// Step tolerance; converged when `‖x - x_prev‖∞ < xtol`.
    ///
    /// The default of zero disables the step criterion.
    pub xtol: f64,

    /// Residual tolerance; converged when `‖F(x)‖∞ < ftol`.
    pub ftol: f64,

    /// Maximum number of Newton iterations.
    pub iterations: usize,

    /// Keep the per-iteration trace in the returned results.
    pub store_trace: bool,

    /// Write each iteration to the diagnostic output as it happens.
    pub show_trace: bool,

    /// Add the iterate, residual, Jacobian and step to every trace entry.
    ///
    /// Implies `show_trace`.
    pub extended_trace: bool,
}

/// Errors that can occur when validating Newton [`Options`].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("xtol must be finite and non-negative")]
    XTol,

    #[error("ftol must be finite and non-negative")]
    FTol,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            xtol: 0.0,
            ftol: 1e-8,
            iterations: 1_000,
            store_trace: false,
            show_trace: false,
            extended_trace: false,
        }
    }
}

impl Options {
    /// Validates that both tolerances are finite and non-negative.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first invalid tolerance.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.xtol.is_finite() || self.xtol < 0.0 {
            return Err(ConfigError::XTol);
        }
        if !self.ftol.is_finite() || self.ftol < 0.0 {
            return Err(ConfigError::FTol);
        }
        Ok(())
    }

    /// Returns whether iterations are written to the diagnostic output.
    #[must_use]
    pub fn shows_trace(&self) -> bool {
        self.show_trace || self.extended_trace
    }

    /// Returns whether the solver needs to build trace entries at all.
    #[must_use]
    pub(super) fn traces(&self) -> bool {
        self.store_trace || self.shows_trace()
    }
}
