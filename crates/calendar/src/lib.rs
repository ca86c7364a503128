//! # cropex-calendar
//!
//! Pure date arithmetic for growing-season aggregation.
//!
//! ## Architecture
//!
//! ```mermaid
//! graph LR
//!     A["Doy (1..=366)"] -->|"SeasonWindow::new()"| B["SeasonWindow"]
//!     C["CF offset"] -->|"CalendarKind::stamp_from_offset()"| D["DayStamp"]
//!     D -->|".next()"| D
//!     D -->|"daily_sequence()"| E["Vec of DayStamp"]
//!     B -->|"season_year()"| F["season-year label"]
//!     D -->|"season_year()"| F
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use cropex_calendar::{CalendarKind, DayStamp, Doy, SeasonWindow, season_year};
//!
//! // A southern-hemisphere season planted mid-December, harvested in April.
//! let window = SeasonWindow::from_days(350, 110).unwrap();
//! assert!(window.wraps());
//! assert_eq!(window.nominal_length(), 126);
//!
//! // Day 360 of 1981 belongs to the 1982 season.
//! let stamp = DayStamp::new(1981, Doy::new(360).unwrap());
//! assert_eq!(season_year(stamp, window), 1982);
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `doy` | Day-of-year newtype |
//! | `stamp` | Calendar year plus day-of-year |
//! | `kind` | Standard and no-leap calendars, CF offset decoding |
//! | `window` | Growing-season window in day-of-year space |
//! | `season_year` | Season-year attribution |
//! | `sequence` | Daily stamp sequence generation |
//! | `error` | Error types |

mod doy;
mod error;
mod kind;
mod season_year;
mod sequence;
mod stamp;
mod window;

pub use doy::Doy;
pub use error::CalendarError;
pub use kind::CalendarKind;
pub use season_year::season_year;
pub use sequence::daily_sequence;
pub use stamp::DayStamp;
pub use window::SeasonWindow;
