//! Growing-season climate-extreme indicators.
//!
//! Reduces a daily gridded climate record into one value per grid cell and
//! growing-season-year for each indicator, restricted to the cell's resolved
//! growing-season window.
//!
//! # Pipeline
//!
//! ```text
//!  ┌──────────────┐     ┌────────────────┐     ┌──────────────────┐
//!  │  resolve     │────▶│  thresholds    │────▶│  aggregate_cell  │
//!  │  (window)    │     │  (pooled pXX)  │     │  (per season-yr) │
//!  └──────────────┘     └────────────────┘     └────────┬─────────┘
//!                                                       ▼
//!                                              ┌──────────────────┐
//!                                              │  IndicatorGrid   │
//!                                              │ (year, lat, lon) │
//!                                              └──────────────────┘
//! ```
//!
//! # Quick start
//!
//! ```rust
//! use cropex_calendar::{CalendarKind, DayStamp, Doy, SeasonWindow, daily_sequence};
//! use cropex_extremes::{ExtremesConfig, TimeAxis, Variable, aggregate_cell};
//!
//! let kind = CalendarKind::NoLeap;
//! let start = DayStamp::new(2001, Doy::new(1).unwrap());
//! let time = TimeAxis::new(daily_sequence(start, 3 * 365, kind), kind).unwrap();
//! let values: Vec<f64> = (0..time.len()).map(|i| (i % 17) as f64).collect();
//!
//! let window = SeasonWindow::from_days(100, 200).unwrap();
//! let config = ExtremesConfig::new(Variable::Precipitation);
//! let series = aggregate_cell(&time, &values, window, &config).unwrap();
//!
//! assert_eq!(series.total_days(), 101);
//! assert_eq!(series.len(), 3);
//! ```

pub mod aggregate;
pub mod batch;
pub mod config;
pub mod cube;
pub mod error;
pub mod grid;
pub mod indicator;
pub mod threshold;
pub mod time;

pub use aggregate::{CellSeries, SeasonStats, aggregate_cell};
pub use batch::{BatchOptions, BatchOutput, CellFailure, run_batch};
pub use config::ExtremesConfig;
pub use cube::ClimateCube;
pub use error::ExtremesError;
pub use grid::{GridAxes, IndicatorGrid};
pub use indicator::{Indicator, Variable};
pub use threshold::Thresholds;
pub use time::TimeAxis;
