//! Error types for the cropex-season crate.

use crate::crop::{Crop, LandUse};

/// Error type for all fallible operations in the cropex-season crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ResolveError {
    /// Returned when a crop code is not one of the tracked crops.
    #[error("unknown crop code: '{code}'")]
    UnknownCrop {
        /// The unrecognised code.
        code: String,
    },

    /// Returned when a land-use token is neither `firr` nor `noirr`.
    #[error("unknown land use: '{token}' (expected 'firr' or 'noirr')")]
    UnknownLandUse {
        /// The unrecognised token.
        token: String,
    },

    /// Returned when a cell has no area for any requested crop.
    #[error("no tracked crop is grown at ({lat}, {lon})")]
    NoCropPresent {
        /// Cell latitude.
        lat: f64,
        /// Cell longitude.
        lon: f64,
    },

    /// Returned when a single-crop resolution targets a cell without that crop.
    #[error("crop {crop} has no area at ({lat}, {lon})")]
    CropAbsent {
        /// The requested crop.
        crop: Crop,
        /// Cell latitude.
        lat: f64,
        /// Cell longitude.
        lon: f64,
    },

    /// Returned when the calendar needed for a crop is undefined at a cell.
    #[error("no {land_use} calendar for crop {crop} at ({lat}, {lon})")]
    MissingCalendar {
        /// The crop whose calendar is missing.
        crop: Crop,
        /// The land-use mode whose calendar is missing.
        land_use: LandUse,
        /// Cell latitude.
        lat: f64,
        /// Cell longitude.
        lon: f64,
    },

    /// Returned when calendar coordinate and value arrays disagree in shape.
    #[error("calendar grid shape mismatch: expected {expected} values, got {got}")]
    CalendarShape {
        /// Expected number of values (`lats * lons`).
        expected: usize,
        /// Actual number of values.
        got: usize,
    },
}
