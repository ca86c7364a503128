//! Error types for the cropex-extremes crate.

/// Error type for all fallible operations in the cropex-extremes crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExtremesError {
    /// Returned when a percentile is outside [0, 1].
    #[error("invalid percentile {name}: {value} (must be finite and in [0, 1])")]
    InvalidPercentile {
        /// Which percentile.
        name: &'static str,
        /// The offending value.
        value: f64,
    },

    /// Returned when the low percentile is not below the high percentile.
    #[error("low percentile {low} must be below high percentile {high}")]
    PercentileOrder {
        /// Low percentile.
        low: f64,
        /// High percentile.
        high: f64,
    },

    /// Returned when the time axis has no steps.
    #[error("time axis is empty")]
    EmptyRecord,

    /// Returned when time stamps are not strictly increasing.
    #[error("time axis is not strictly increasing at step {index}")]
    NonIncreasingTime {
        /// Index of the first out-of-order step.
        index: usize,
    },

    /// Returned when a value series does not match the time axis.
    #[error("length mismatch: time axis has {time_len} steps, values have {values_len}")]
    LengthMismatch {
        /// Number of time steps.
        time_len: usize,
        /// Number of values.
        values_len: usize,
    },

    /// Returned when every pooled in-season value is missing.
    #[error("no threshold: every value in window ({start}, {end}) is missing")]
    NoThreshold {
        /// Window start day.
        start: u16,
        /// Window end day.
        end: u16,
    },

    /// Returned when a data buffer does not match its declared shape.
    #[error("shape mismatch: expected {expected} values, got {got}")]
    ShapeMismatch {
        /// Expected element count.
        expected: usize,
        /// Actual element count.
        got: usize,
    },

    /// Returned when a grid axis is empty or out of order.
    #[error("invalid {axis} axis: {reason}")]
    InvalidAxis {
        /// Axis name.
        axis: &'static str,
        /// Description of the problem.
        reason: String,
    },

    /// Returned when a grid index is out of bounds.
    #[error("grid index ({year_idx}, {lat_idx}, {lon_idx}) out of bounds for shape {shape:?}")]
    IndexOutOfBounds {
        /// Season-year index.
        year_idx: usize,
        /// Latitude index.
        lat_idx: usize,
        /// Longitude index.
        lon_idx: usize,
        /// Grid shape (years, lats, lons).
        shape: (usize, usize, usize),
    },

    /// Returned when the worker pool cannot be built.
    #[error("thread pool: {reason}")]
    ThreadPool {
        /// Description of the problem.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_threshold_message() {
        let e = ExtremesError::NoThreshold { start: 350, end: 10 };
        assert_eq!(
            e.to_string(),
            "no threshold: every value in window (350, 10) is missing"
        );
    }

    #[test]
    fn length_mismatch_message() {
        let e = ExtremesError::LengthMismatch {
            time_len: 365,
            values_len: 364,
        };
        assert_eq!(
            e.to_string(),
            "length mismatch: time axis has 365 steps, values have 364"
        );
    }

    #[test]
    fn out_of_bounds_message() {
        let e = ExtremesError::IndexOutOfBounds {
            year_idx: 3,
            lat_idx: 0,
            lon_idx: 1,
            shape: (2, 2, 2),
        };
        assert_eq!(
            e.to_string(),
            "grid index (3, 0, 1) out of bounds for shape (2, 2, 2)"
        );
    }

    #[test]
    fn error_is_clone() {
        let e = ExtremesError::EmptyRecord;
        assert_eq!(e.clone(), e);
    }
}
