//! Growing-season window in day-of-year space.

use crate::doy::Doy;
use crate::error::CalendarError;

/// Nominal year length used for the length of wrapping seasons.
const NOMINAL_YEAR_DAYS: u16 = 365;

/// A growing season expressed as a `(start, end)` day-of-year pair.
///
/// When `start <= end` the season lies inside one calendar year. When
/// `start > end` the season wraps: it runs from `start` to the end of the
/// year and continues from day 1 of the following year through `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SeasonWindow {
    start: Doy,
    end: Doy,
}

impl SeasonWindow {
    /// Creates a window from validated day-of-year bounds.
    pub fn new(start: Doy, end: Doy) -> Self {
        Self { start, end }
    }

    /// Creates a window from raw day-of-year values.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidDoy`] if either bound is outside 1..=366.
    pub fn from_days(start: u16, end: u16) -> Result<Self, CalendarError> {
        Ok(Self::new(Doy::new(start)?, Doy::new(end)?))
    }

    /// First day of the season.
    pub fn start(self) -> Doy {
        self.start
    }

    /// Last day of the season.
    pub fn end(self) -> Doy {
        self.end
    }

    /// Returns `true` if the season crosses the calendar year boundary.
    pub fn wraps(self) -> bool {
        self.start > self.end
    }

    /// Nominal number of days in the season.
    ///
    /// `end - start + 1` for single-year windows and
    /// `(365 - start + 1) + end` for wrapping ones. The wrapping length
    /// assumes a 365-day year regardless of leap years.
    pub fn nominal_length(self) -> u16 {
        let (start, end) = (self.start.get(), self.end.get());
        if self.wraps() {
            (NOMINAL_YEAR_DAYS + 1).saturating_sub(start) + end
        } else {
            end - start + 1
        }
    }

    /// Returns `true` if `doy` falls inside the season.
    pub fn contains(self, doy: Doy) -> bool {
        if self.wraps() {
            doy >= self.start || doy <= self.end
        } else {
            self.start <= doy && doy <= self.end
        }
    }

    /// Widens this window to cover `other` by taking the earlier start and
    /// the later end.
    ///
    /// This is a plain min/max on the day-of-year bounds. It does not detect
    /// or canonicalise wrapping inputs: combining `(300, 50)` with `(100, 200)`
    /// yields `(100, 200)`.
    pub fn widen(self, other: Self) -> Self {
        Self {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}
