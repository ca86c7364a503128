//! Calendar year plus day-of-year.

use chrono::{Datelike, NaiveDate};

use crate::doy::Doy;
use crate::kind::CalendarKind;

/// One daily time step, identified by calendar year and day-of-year.
///
/// Ordering is chronological: by year, then by day-of-year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DayStamp {
    year: i32,
    doy: Doy,
}

impl DayStamp {
    /// Creates a stamp without checking that `doy` exists in `year`.
    ///
    /// Use [`CalendarKind::stamp`] when the calendar matters.
    pub fn new(year: i32, doy: Doy) -> Self {
        Self { year, doy }
    }

    /// Creates a stamp from a proleptic Gregorian date.
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            doy: Doy::from_raw(date.ordinal() as u16),
        }
    }

    /// Returns the calendar year.
    pub fn year(self) -> i32 {
        self.year
    }

    /// Returns the day-of-year.
    pub fn doy(self) -> Doy {
        self.doy
    }

    /// Returns the next day in the given calendar.
    ///
    /// The last day of a year (365 or 366 depending on `kind`) rolls over to
    /// day 1 of the following year.
    pub fn next(self, kind: CalendarKind) -> Self {
        if self.doy.get() >= kind.days_in_year(self.year) {
            Self::new(self.year + 1, Doy::from_raw(1))
        } else {
            Self::new(self.year, Doy::from_raw(self.doy.get() + 1))
        }
    }
}
