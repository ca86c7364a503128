//! Growing-season window resolution.
//!
//! Combines a grid cell's crop composition (irrigated and rainfed area per
//! crop) with per-crop, per-land-use planting/maturity calendars into one
//! day-of-year [`SeasonWindow`](cropex_calendar::SeasonWindow) per cell.
//!
//! # Pipeline
//!
//! ```text
//!  ┌───────────────┐     ┌────────────────┐     ┌──────────────────┐
//!  │ composition   │────▶│  resolve_crop  │────▶│  resolve_window  │
//!  │ (areas/crop)  │     │ (land-use pick)│     │ (union or single)│
//!  └───────────────┘     └────────────────┘     └──────────────────┘
//!                               ▲
//!                        ┌──────┴───────┐
//!                        │ CropCalendars│
//!                        └──────────────┘
//! ```
//!
//! # Quick start
//!
//! ```rust
//! use cropex_season::{
//!     CalendarGrid, CellComposition, Crop, CropCalendars, LandUse, ResolveMode, resolve_window,
//! };
//!
//! let mut calendars = CropCalendars::new();
//! calendars.insert(
//!     Crop::Maize,
//!     LandUse::Rainfed,
//!     CalendarGrid::new(vec![10.25], vec![20.25], vec![120.0], vec![210.0]).unwrap(),
//! );
//!
//! let cell = CellComposition::new(10.25, 20.25).with_crop(Crop::Maize, 0.0, 5.0);
//! let resolution = resolve_window(&cell, &ResolveMode::Single(Crop::Maize), &calendars).unwrap();
//! assert_eq!(resolution.window().start().get(), 120);
//! assert_eq!(resolution.window().end().get(), 210);
//! ```

pub mod calendar;
pub mod composition;
pub mod coords;
pub mod crop;
pub mod error;
pub mod resolve;

pub use calendar::{CalendarGrid, CalendarLookup, CropCalendars};
pub use composition::{CellComposition, CropAreas};
pub use coords::{COORD_TOLERANCE, coord_index};
pub use crop::{Crop, LandUse};
pub use error::ResolveError;
pub use resolve::{Resolution, ResolveMode, resolve_crop, resolve_window};
