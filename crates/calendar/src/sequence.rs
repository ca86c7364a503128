//! Daily stamp sequence generation.

use crate::kind::CalendarKind;
use crate::stamp::DayStamp;

/// Generates a contiguous sequence of daily stamps.
///
/// Starting from `start`, produces exactly `n_days` consecutive stamps in the
/// given calendar. Year boundaries (including day 366 in standard leap
/// years) are handled automatically.
pub fn daily_sequence(start: DayStamp, n_days: usize, kind: CalendarKind) -> Vec<DayStamp> {
    let mut stamps = Vec::with_capacity(n_days);
    if n_days == 0 {
        return stamps;
    }
    stamps.push(start);
    let mut current = start;
    for _ in 1..n_days {
        current = current.next(kind);
        stamps.push(current);
    }
    stamps
}
