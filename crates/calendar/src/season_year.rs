//! Season-year attribution.

use crate::stamp::DayStamp;
use crate::window::SeasonWindow;

/// Returns the growing-season-year a day belongs to.
///
/// For a wrapping window, days on or after the window start belong to the
/// *next* calendar year's season. Every other day keeps its calendar year.
/// The result is only meaningful for days inside the window.
///
/// # Examples
///
/// ```ignore
/// let window = SeasonWindow::from_days(350, 10).unwrap();
/// let dec = DayStamp::new(1981, Doy::new(355).unwrap());
/// let jan = DayStamp::new(1982, Doy::new(5).unwrap());
/// assert_eq!(season_year(dec, window), 1982);
/// assert_eq!(season_year(jan, window), 1982);
/// ```
pub fn season_year(stamp: DayStamp, window: SeasonWindow) -> i32 {
    if window.wraps() && stamp.doy() >= window.start() {
        stamp.year() + 1
    } else {
        stamp.year()
    }
}
