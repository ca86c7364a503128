//! Season-relative percentile thresholds.

use cropex_calendar::SeasonWindow;
use cropex_stats::{quantile_type7, sorted_present};

use crate::config::ExtremesConfig;
use crate::error::ExtremesError;
use crate::time::TimeAxis;

/// High and low thresholds of one grid cell.
///
/// Both are computed once from every in-window day of the whole record and
/// reused for every season-year of the cell. The low side is absent for
/// variables whose indicators only count high extremes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    high: f64,
    low: Option<f64>,
}

impl Thresholds {
    /// Creates thresholds from known values.
    pub fn new(high: f64, low: f64) -> Self {
        Self {
            high,
            low: Some(low),
        }
    }

    /// Pools the in-window values of the record and takes the configured
    /// type-7 percentiles, skipping missing values. The low percentile is
    /// only taken when [`ExtremesConfig::uses_low`] holds.
    ///
    /// # Errors
    ///
    /// Returns [`ExtremesError::LengthMismatch`] if `values` does not match
    /// `time`, and [`ExtremesError::NoThreshold`] if every pooled value is
    /// missing.
    pub fn from_record(
        time: &TimeAxis,
        values: &[f64],
        window: SeasonWindow,
        config: &ExtremesConfig,
    ) -> Result<Self, ExtremesError> {
        if values.len() != time.len() {
            return Err(ExtremesError::LengthMismatch {
                time_len: time.len(),
                values_len: values.len(),
            });
        }
        let pooled: Vec<f64> = time
            .stamps()
            .iter()
            .zip(values)
            .filter(|(stamp, _)| window.contains(stamp.doy()))
            .map(|(_, &v)| v)
            .collect();

        let sorted = sorted_present(&pooled);
        if sorted.is_empty() {
            return Err(ExtremesError::NoThreshold {
                start: window.start().get(),
                end: window.end().get(),
            });
        }
        Ok(Self {
            high: quantile_type7(&sorted, config.high_percentile()),
            low: config
                .uses_low()
                .then(|| quantile_type7(&sorted, config.low_percentile())),
        })
    }

    /// Threshold a value must reach to count as a high extreme.
    pub fn high(&self) -> f64 {
        self.high
    }

    /// Threshold a value must not exceed to count as a low extreme.
    pub fn low(&self) -> Option<f64> {
        self.low
    }

    /// `true` if `value >= high`. Missing values are never extreme.
    #[inline]
    pub fn is_high(&self, value: f64) -> bool {
        value >= self.high
    }

    /// `true` if `value <= low`. Missing values are never extreme, and
    /// nothing is without a low threshold.
    #[inline]
    pub fn is_low(&self, value: f64) -> bool {
        self.low.is_some_and(|low| value <= low)
    }
}
