//! Standard and no-leap calendars and CF time offset decoding.

use chrono::{Datelike, NaiveDate, TimeDelta};

use crate::doy::Doy;
use crate::error::CalendarError;
use crate::stamp::DayStamp;

/// Calendar used by a daily record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CalendarKind {
    /// Proleptic Gregorian calendar with leap days (day-of-year 1..=366).
    #[default]
    Standard,
    /// 365-day calendar without leap days.
    NoLeap,
}

impl CalendarKind {
    /// Parses a CF-convention `calendar` attribute.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::UnsupportedCalendar`] for calendars other than
    /// `standard`, `gregorian`, `proleptic_gregorian`, `noleap` and `365_day`.
    pub fn from_cf(name: &str) -> Result<Self, CalendarError> {
        match name.trim().to_lowercase().as_str() {
            "standard" | "gregorian" | "proleptic_gregorian" => Ok(Self::Standard),
            "noleap" | "no_leap" | "365_day" => Ok(Self::NoLeap),
            _ => Err(CalendarError::UnsupportedCalendar {
                name: name.to_string(),
            }),
        }
    }

    /// Short calendar name used in messages.
    pub fn name(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::NoLeap => "noleap",
        }
    }

    /// Number of days in `year` under this calendar.
    pub fn days_in_year(self, year: i32) -> u16 {
        match self {
            Self::Standard if is_leap_year(year) => 366,
            _ => 365,
        }
    }

    /// Builds a stamp, checking that `doy` exists in `year`.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::DoyOutOfYear`] for day 366 outside leap years.
    pub fn stamp(self, year: i32, doy: Doy) -> Result<DayStamp, CalendarError> {
        if doy.get() > self.days_in_year(year) {
            return Err(CalendarError::DoyOutOfYear {
                doy: doy.get(),
                year,
                calendar: self.name(),
            });
        }
        Ok(DayStamp::new(year, doy))
    }

    /// Converts a whole-day offset from a CF base date into a stamp.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidDate`] if the offset overflows, or if
    /// the base date is February 29 under the no-leap calendar.
    pub fn stamp_from_offset(self, base: NaiveDate, days: i64) -> Result<DayStamp, CalendarError> {
        match self {
            Self::Standard => {
                let delta = TimeDelta::try_days(days).ok_or_else(|| CalendarError::InvalidDate {
                    reason: format!("offset of {days} days is out of range"),
                })?;
                let date =
                    base.checked_add_signed(delta)
                        .ok_or_else(|| CalendarError::InvalidDate {
                            reason: format!("date overflow adding {days} days to {base}"),
                        })?;
                Ok(DayStamp::from_date(date))
            }
            Self::NoLeap => {
                let leap = is_leap_year(base.year());
                if leap && base.month() == 2 && base.day() == 29 {
                    return Err(CalendarError::InvalidDate {
                        reason: format!("base date {base} does not exist in the noleap calendar"),
                    });
                }
                let mut doy0 = i64::from(base.ordinal0());
                if leap && base.month() > 2 {
                    doy0 -= 1;
                }
                let total = doy0 + days;
                let year = i64::from(base.year()) + total.div_euclid(365);
                let year = i32::try_from(year).map_err(|_| CalendarError::InvalidDate {
                    reason: format!("year {year} is out of range"),
                })?;
                let doy = total.rem_euclid(365) as u16 + 1;
                Ok(DayStamp::new(year, Doy::from_raw(doy)))
            }
        }
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn from_cf_names() {
        assert_eq!(CalendarKind::from_cf("standard").unwrap(), CalendarKind::Standard);
        assert_eq!(
            CalendarKind::from_cf("proleptic_gregorian").unwrap(),
            CalendarKind::Standard
        );
        assert_eq!(CalendarKind::from_cf("365_day").unwrap(), CalendarKind::NoLeap);
        assert_eq!(CalendarKind::from_cf("NoLeap").unwrap(), CalendarKind::NoLeap);
        assert!(matches!(
            CalendarKind::from_cf("360_day"),
            Err(CalendarError::UnsupportedCalendar { .. })
        ));
    }

    #[test]
    fn days_in_year() {
        assert_eq!(CalendarKind::Standard.days_in_year(1984), 366);
        assert_eq!(CalendarKind::Standard.days_in_year(1900), 365);
        assert_eq!(CalendarKind::Standard.days_in_year(2000), 366);
        assert_eq!(CalendarKind::NoLeap.days_in_year(1984), 365);
    }

    #[test]
    fn stamp_rejects_366_outside_leap_year() {
        let doy = Doy::new(366).unwrap();
        assert!(CalendarKind::Standard.stamp(1984, doy).is_ok());
        assert!(matches!(
            CalendarKind::Standard.stamp(1985, doy),
            Err(CalendarError::DoyOutOfYear { year: 1985, .. })
        ));
        assert!(CalendarKind::NoLeap.stamp(1984, doy).is_err());
    }

    #[test]
    fn standard_offsets() {
        let kind = CalendarKind::Standard;
        let s = kind.stamp_from_offset(base(1661, 1, 1), 0).unwrap();
        assert_eq!((s.year(), s.doy().get()), (1661, 1));
        let s = kind.stamp_from_offset(base(1984, 1, 1), 365).unwrap();
        assert_eq!((s.year(), s.doy().get()), (1984, 366));
        let s = kind.stamp_from_offset(base(1984, 1, 1), 366).unwrap();
        assert_eq!((s.year(), s.doy().get()), (1985, 1));
    }

    #[test]
    fn noleap_offsets() {
        let kind = CalendarKind::NoLeap;
        let s = kind.stamp_from_offset(base(2000, 1, 1), 365).unwrap();
        assert_eq!((s.year(), s.doy().get()), (2001, 1));
        // Mar 1 of a Gregorian leap year is noleap day 60.
        let s = kind.stamp_from_offset(base(2000, 3, 1), 0).unwrap();
        assert_eq!((s.year(), s.doy().get()), (2000, 60));
        let s = kind.stamp_from_offset(base(2000, 1, 1), -1).unwrap();
        assert_eq!((s.year(), s.doy().get()), (1999, 365));
    }

    #[test]
    fn noleap_rejects_feb_29_base() {
        assert!(matches!(
            CalendarKind::NoLeap.stamp_from_offset(base(2000, 2, 29), 0),
            Err(CalendarError::InvalidDate { .. })
        ));
    }
}
