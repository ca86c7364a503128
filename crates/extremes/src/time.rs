//! Daily time axis of a climate record.

use cropex_calendar::{CalendarKind, DayStamp};

use crate::error::ExtremesError;

/// Strictly increasing daily stamps in one calendar.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeAxis {
    stamps: Vec<DayStamp>,
    kind: CalendarKind,
}

impl TimeAxis {
    /// Wraps a sequence of stamps.
    ///
    /// # Errors
    ///
    /// Returns [`ExtremesError::EmptyRecord`] for an empty sequence and
    /// [`ExtremesError::NonIncreasingTime`] if any stamp does not follow its
    /// predecessor.
    pub fn new(stamps: Vec<DayStamp>, kind: CalendarKind) -> Result<Self, ExtremesError> {
        if stamps.is_empty() {
            return Err(ExtremesError::EmptyRecord);
        }
        if let Some(i) = stamps.windows(2).position(|w| w[1] <= w[0]) {
            return Err(ExtremesError::NonIncreasingTime { index: i + 1 });
        }
        Ok(Self { stamps, kind })
    }

    /// Returns the stamps.
    pub fn stamps(&self) -> &[DayStamp] {
        &self.stamps
    }

    /// Returns the calendar.
    pub fn kind(&self) -> CalendarKind {
        self.kind
    }

    /// Number of time steps.
    pub fn len(&self) -> usize {
        self.stamps.len()
    }

    /// Always `false`; construction rejects empty axes.
    pub fn is_empty(&self) -> bool {
        self.stamps.is_empty()
    }

    /// Calendar year of the first step.
    pub fn first_year(&self) -> i32 {
        self.stamps[0].year()
    }

    /// Calendar year of the last step.
    pub fn last_year(&self) -> i32 {
        self.stamps[self.stamps.len() - 1].year()
    }

    /// `true` if the axis spans `first..=last`.
    pub fn covers(&self, first: DayStamp, last: DayStamp) -> bool {
        self.stamps[0] <= first && last <= self.stamps[self.stamps.len() - 1]
    }

    /// Appends `other`, which must start after this axis ends and share its
    /// calendar.
    pub fn concat(mut self, other: TimeAxis) -> Result<Self, ExtremesError> {
        if other.kind != self.kind {
            return Err(ExtremesError::InvalidAxis {
                axis: "time",
                reason: format!(
                    "cannot join {} and {} calendars",
                    self.kind.name(),
                    other.kind.name()
                ),
            });
        }
        let boundary = self.stamps.len();
        if other.stamps[0] <= self.stamps[boundary - 1] {
            return Err(ExtremesError::NonIncreasingTime { index: boundary });
        }
        self.stamps.extend(other.stamps);
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cropex_calendar::{Doy, daily_sequence};

    fn stamp(year: i32, doy: u16) -> DayStamp {
        DayStamp::new(year, Doy::new(doy).unwrap())
    }

    #[test]
    fn years_from_record() {
        let axis = TimeAxis::new(
            daily_sequence(stamp(1981, 1), 730, CalendarKind::NoLeap),
            CalendarKind::NoLeap,
        )
        .unwrap();
        assert_eq!(axis.first_year(), 1981);
        assert_eq!(axis.last_year(), 1982);
        assert_eq!(axis.len(), 730);
    }

    #[test]
    fn covers_checks_both_ends() {
        let axis = TimeAxis::new(
            daily_sequence(stamp(1981, 200), 300, CalendarKind::NoLeap),
            CalendarKind::NoLeap,
        )
        .unwrap();
        assert!(axis.covers(stamp(1981, 200), stamp(1982, 134)));
        assert!(!axis.covers(stamp(1981, 199), stamp(1981, 300)));
        assert!(!axis.covers(stamp(1981, 250), stamp(1982, 135)));
    }

    #[test]
    fn rejects_empty() {
        assert_eq!(
            TimeAxis::new(Vec::new(), CalendarKind::Standard),
            Err(ExtremesError::EmptyRecord)
        );
    }

    #[test]
    fn rejects_repeated_day() {
        let stamps = vec![stamp(1981, 1), stamp(1981, 2), stamp(1981, 2)];
        assert_eq!(
            TimeAxis::new(stamps, CalendarKind::Standard),
            Err(ExtremesError::NonIncreasingTime { index: 2 })
        );
    }

    #[test]
    fn concat_joins_consecutive_axes() {
        let kind = CalendarKind::Standard;
        let a = TimeAxis::new(daily_sequence(stamp(1990, 1), 365, kind), kind).unwrap();
        let b = TimeAxis::new(daily_sequence(stamp(1991, 1), 365, kind), kind).unwrap();
        let joined = a.concat(b).unwrap();
        assert_eq!(joined.len(), 730);
        assert_eq!(joined.last_year(), 1991);
    }

    #[test]
    fn concat_rejects_overlap() {
        let kind = CalendarKind::Standard;
        let a = TimeAxis::new(daily_sequence(stamp(1990, 1), 365, kind), kind).unwrap();
        let b = TimeAxis::new(daily_sequence(stamp(1990, 300), 100, kind), kind).unwrap();
        assert_eq!(a.concat(b), Err(ExtremesError::NonIncreasingTime { index: 365 }));
    }

    #[test]
    fn concat_rejects_mixed_calendars() {
        let a = TimeAxis::new(
            daily_sequence(stamp(1990, 1), 10, CalendarKind::Standard),
            CalendarKind::Standard,
        )
        .unwrap();
        let b = TimeAxis::new(
            daily_sequence(stamp(1991, 1), 10, CalendarKind::NoLeap),
            CalendarKind::NoLeap,
        )
        .unwrap();
        assert!(matches!(a.concat(b), Err(ExtremesError::InvalidAxis { .. })));
    }
}
