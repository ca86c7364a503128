//! Error types for cropex-io.

use std::path::PathBuf;

/// Error type for all fallible operations in the cropex-io crate.
///
/// Covers missing files, format-specific errors from NetCDF, Parquet, Arrow
/// and JSON, time decoding problems, validation failures, and data-model
/// errors raised while assembling the in-memory types.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when a required file does not exist on disk.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// Wraps an error originating from the NetCDF library.
    #[error("netcdf error: {reason}")]
    Netcdf {
        /// Description of the underlying NetCDF failure.
        reason: String,
    },

    /// Wraps an error originating from the Parquet or Arrow libraries.
    #[error("parquet error: {reason}")]
    Parquet {
        /// Description of the underlying Parquet failure.
        reason: String,
    },

    /// Wraps a JSON serialisation failure.
    #[error("json error: {reason}")]
    Json {
        /// Description of the underlying serde_json failure.
        reason: String,
    },

    /// Wraps a filesystem error.
    #[error("i/o error on {}: {reason}", path.display())]
    Fs {
        /// Path being accessed.
        path: PathBuf,
        /// Description of the failure.
        reason: String,
    },

    /// Returned when one or more validation checks fail.
    #[error("{count} validation error(s): {details}")]
    Validation {
        /// Number of accumulated validation failures.
        count: usize,
        /// Human-readable summary of the failures.
        details: String,
    },

    /// Returned when a required variable is not present in a file.
    #[error("variable '{name}' not found in {}", path.display())]
    MissingVariable {
        /// Name of the missing variable.
        name: String,
        /// Path to the file that was inspected.
        path: PathBuf,
    },

    /// Returned when a dimension has an unexpected size.
    #[error("dimension '{name}' mismatch: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Name of the dimension.
        name: String,
        /// Expected size.
        expected: usize,
        /// Actual size.
        got: usize,
    },

    /// Returned when a time axis cannot be decoded.
    #[error("invalid time: {reason}")]
    InvalidTime {
        /// Description of the time decoding issue.
        reason: String,
    },

    /// Wraps an error raised while assembling climate cubes or grids.
    #[error("data error: {reason}")]
    Data {
        /// Description of the underlying failure.
        reason: String,
    },
}

impl From<netcdf::Error> for IoError {
    fn from(e: netcdf::Error) -> Self {
        IoError::Netcdf {
            reason: e.to_string(),
        }
    }
}

impl From<parquet::errors::ParquetError> for IoError {
    fn from(e: parquet::errors::ParquetError) -> Self {
        IoError::Parquet {
            reason: e.to_string(),
        }
    }
}

impl From<arrow::error::ArrowError> for IoError {
    fn from(e: arrow::error::ArrowError) -> Self {
        IoError::Parquet {
            reason: e.to_string(),
        }
    }
}

impl From<serde_json::Error> for IoError {
    fn from(e: serde_json::Error) -> Self {
        IoError::Json {
            reason: e.to_string(),
        }
    }
}

impl From<cropex_calendar::CalendarError> for IoError {
    fn from(e: cropex_calendar::CalendarError) -> Self {
        IoError::InvalidTime {
            reason: e.to_string(),
        }
    }
}

impl From<cropex_extremes::ExtremesError> for IoError {
    fn from(e: cropex_extremes::ExtremesError) -> Self {
        IoError::Data {
            reason: e.to_string(),
        }
    }
}

impl From<cropex_season::ResolveError> for IoError {
    fn from(e: cropex_season::ResolveError) -> Self {
        IoError::Data {
            reason: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_file_not_found() {
        let err = IoError::FileNotFound {
            path: PathBuf::from("/tmp/missing.nc"),
        };
        assert_eq!(err.to_string(), "file not found: /tmp/missing.nc");
    }

    #[test]
    fn display_validation() {
        let err = IoError::Validation {
            count: 2,
            details: "row 3: unknown crop 'bar'; row 7: negative irr_area -1".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "2 validation error(s): row 3: unknown crop 'bar'; row 7: negative irr_area -1"
        );
    }

    #[test]
    fn display_missing_variable() {
        let err = IoError::MissingVariable {
            name: "planting_day".to_string(),
            path: PathBuf::from("/data/cal.nc"),
        };
        assert_eq!(
            err.to_string(),
            "variable 'planting_day' not found in /data/cal.nc"
        );
    }

    #[test]
    fn display_fs() {
        let err = IoError::Fs {
            path: PathBuf::from("out/run_report.json"),
            reason: "permission denied".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "i/o error on out/run_report.json: permission denied"
        );
    }

    #[test]
    fn from_netcdf_error() {
        let err: IoError = netcdf::Error::Str("test nc error".to_string()).into();
        assert!(matches!(err, IoError::Netcdf { .. }));
        assert!(err.to_string().contains("test nc error"));
    }

    #[test]
    fn from_parquet_error() {
        let err: IoError = parquet::errors::ParquetError::General("bad footer".to_string()).into();
        assert!(matches!(err, IoError::Parquet { .. }));
        assert!(err.to_string().contains("bad footer"));
    }

    #[test]
    fn from_calendar_error() {
        let err: IoError = cropex_calendar::CalendarError::InvalidDoy { doy: 0 }.into();
        assert!(matches!(err, IoError::InvalidTime { .. }));
    }

    #[test]
    fn from_extremes_error() {
        let err: IoError = cropex_extremes::ExtremesError::EmptyRecord.into();
        assert_eq!(err.to_string(), "data error: time axis is empty");
    }

    #[test]
    fn error_is_send_sync_and_std_error() {
        fn assert_bounds<T: Send + Sync + std::error::Error>() {}
        assert_bounds::<IoError>();
    }
}
