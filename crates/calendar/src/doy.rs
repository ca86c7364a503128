//! Day-of-year newtype.

use crate::error::CalendarError;

/// Day-of-year (1..=366).
///
/// Day 366 only exists in leap years of the standard calendar; whether a
/// given `Doy` exists in a particular year is checked by
/// [`CalendarKind::days_in_year`](crate::CalendarKind::days_in_year).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Doy(u16);

impl Doy {
    /// Highest representable day-of-year.
    pub const MAX: u16 = 366;

    /// Creates a new `Doy` from a day-of-year value.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidDoy`] if `doy` is not in 1..=366.
    pub fn new(doy: u16) -> Result<Self, CalendarError> {
        if !(1..=Self::MAX).contains(&doy) {
            return Err(CalendarError::InvalidDoy { doy });
        }
        Ok(Self(doy))
    }

    /// Creates a `Doy` from a floating-point calendar value.
    ///
    /// Crop calendars store planting and maturity days as floats. Returns
    /// `None` for non-finite, non-integral or out-of-range values so that
    /// fill values are never mistaken for a real day.
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() || value.fract() != 0.0 {
            return None;
        }
        if !(1.0..=f64::from(Self::MAX)).contains(&value) {
            return None;
        }
        Some(Self(value as u16))
    }

    /// Wraps a value already known to be in 1..=366.
    pub(crate) fn from_raw(doy: u16) -> Self {
        debug_assert!((1..=Self::MAX).contains(&doy));
        Self(doy)
    }

    /// Returns the inner day-of-year value (1..=366).
    pub fn get(self) -> u16 {
        self.0
    }

    /// Returns the 0-based index (0..=365).
    pub fn index(self) -> usize {
        (self.0 - 1) as usize
    }
}
