//! Error types for the cropex-calendar crate.

/// Error type for all fallible operations in the cropex-calendar crate.
///
/// Covers day-of-year validation, unsupported CF calendar names, and dates
/// that do not exist in the selected calendar.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalendarError {
    /// Returned when a day-of-year value is outside the valid range 1..=366.
    #[error("invalid day of year: {doy} (must be 1..=366)")]
    InvalidDoy {
        /// The invalid day-of-year value that was provided.
        doy: u16,
    },

    /// Returned when a day-of-year does not exist in the given year.
    #[error("day of year {doy} does not exist in {year} ({calendar} calendar)")]
    DoyOutOfYear {
        /// The day-of-year value.
        doy: u16,
        /// The calendar year.
        year: i32,
        /// Name of the calendar in use.
        calendar: &'static str,
    },

    /// Returned when a CF `calendar` attribute names an unsupported calendar.
    #[error("unsupported calendar: '{name}'")]
    UnsupportedCalendar {
        /// The calendar name as found in the file.
        name: String,
    },

    /// Returned when a base date or an offset cannot be represented.
    #[error("invalid date: {reason}")]
    InvalidDate {
        /// Description of the problem.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_invalid_doy() {
        let err = CalendarError::InvalidDoy { doy: 0 };
        assert_eq!(err.to_string(), "invalid day of year: 0 (must be 1..=366)");
    }

    #[test]
    fn error_doy_out_of_year() {
        let err = CalendarError::DoyOutOfYear {
            doy: 366,
            year: 1981,
            calendar: "standard",
        };
        assert_eq!(
            err.to_string(),
            "day of year 366 does not exist in 1981 (standard calendar)"
        );
    }

    #[test]
    fn error_unsupported_calendar() {
        let err = CalendarError::UnsupportedCalendar {
            name: "360_day".to_string(),
        };
        assert_eq!(err.to_string(), "unsupported calendar: '360_day'");
    }

    #[test]
    fn error_is_std_error() {
        fn assert_impl<T: std::error::Error>() {}
        assert_impl::<CalendarError>();
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<CalendarError>();
    }
}
