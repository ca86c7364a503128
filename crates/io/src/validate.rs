//! Accumulated validation.
//!
//! [`ValidationCollector`] gathers every problem found in an input before
//! failing, so a malformed file is reported in one pass.

use crate::error::IoError;

/// Accumulates validation errors and converts them into a single
/// [`IoError::Validation`].
#[derive(Debug, Default)]
pub(crate) struct ValidationCollector {
    errors: Vec<String>,
}

impl ValidationCollector {
    /// Create an empty collector.
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Record one validation error.
    pub(crate) fn push(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    /// Record `msg` when `failed` is true.
    pub(crate) fn check(&mut self, failed: bool, msg: impl FnOnce() -> String) {
        if failed {
            self.errors.push(msg());
        }
    }

    /// Returns `true` when no errors have been recorded.
    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the number of recorded errors.
    pub(crate) fn len(&self) -> usize {
        self.errors.len()
    }

    /// Consume the collector and return `Ok(())` if no errors were recorded,
    /// or `Err(IoError::Validation { count, details })` otherwise.
    ///
    /// The `details` string joins all messages with `"; "`.
    pub(crate) fn finish(self) -> Result<(), IoError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(IoError::Validation {
                count: self.errors.len(),
                details: self.errors.join("; "),
            })
        }
    }
}

/// Check that an area value is finite and non-negative.
pub(crate) fn check_area(c: &mut ValidationCollector, row: usize, column: &str, value: f64) {
    c.check(!value.is_finite() || value < 0.0, || {
        format!("row {row}: {column} must be finite and >= 0, got {value}")
    });
}
