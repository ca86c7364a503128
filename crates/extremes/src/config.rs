//! Configuration for growing-season indicator aggregation.

use crate::error::ExtremesError;
use crate::indicator::Variable;

/// Configuration for [`aggregate_cell`](crate::aggregate_cell).
///
/// # Example
///
/// ```
/// use cropex_extremes::{ExtremesConfig, Variable};
///
/// let config = ExtremesConfig::new(Variable::Temperature)
///     .with_high_percentile(0.9);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ExtremesConfig {
    variable: Variable,
    high_percentile: f64,
    low_percentile: f64,
}

impl ExtremesConfig {
    /// Creates a configuration with `high_percentile = 0.95` and
    /// `low_percentile = 0.05`.
    pub fn new(variable: Variable) -> Self {
        Self {
            variable,
            high_percentile: 0.95,
            low_percentile: 0.05,
        }
    }

    /// Sets the percentile of the high (wet/hot) threshold.
    pub fn with_high_percentile(mut self, p: f64) -> Self {
        self.high_percentile = p;
        self
    }

    /// Sets the percentile of the low (dry) threshold.
    ///
    /// Ignored for variables without low-threshold indicators.
    pub fn with_low_percentile(mut self, p: f64) -> Self {
        self.low_percentile = p;
        self
    }

    /// Returns the climate variable.
    pub fn variable(&self) -> Variable {
        self.variable
    }

    /// Returns the high threshold percentile.
    pub fn high_percentile(&self) -> f64 {
        self.high_percentile
    }

    /// Returns the low threshold percentile.
    pub fn low_percentile(&self) -> f64 {
        self.low_percentile
    }

    /// `true` if the variable's indicators need a low threshold.
    pub fn uses_low(&self) -> bool {
        self.variable.uses_low()
    }

    /// Validates this configuration.
    ///
    /// The high percentile must be finite and in [0, 1]. When the low side
    /// is used, the same holds for the low percentile and `low < high`.
    pub fn validate(&self) -> Result<(), ExtremesError> {
        check_percentile("high_percentile", self.high_percentile)?;
        if !self.uses_low() {
            return Ok(());
        }
        check_percentile("low_percentile", self.low_percentile)?;
        if self.low_percentile >= self.high_percentile {
            return Err(ExtremesError::PercentileOrder {
                low: self.low_percentile,
                high: self.high_percentile,
            });
        }
        Ok(())
    }
}

fn check_percentile(name: &'static str, value: f64) -> Result<(), ExtremesError> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(ExtremesError::InvalidPercentile { name, value });
    }
    Ok(())
}
