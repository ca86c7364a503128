//! Planting/maturity calendar grids.

use std::collections::BTreeMap;

use cropex_calendar::{Doy, SeasonWindow};

use crate::coords::coord_index;
use crate::crop::{Crop, LandUse};
use crate::error::ResolveError;

/// Source of per-cell growing-season calendars.
///
/// Returns `None` when the calendar for `(crop, land_use)` is undefined at the
/// cell, either because no grid was loaded or because the entry is a fill
/// value.
pub trait CalendarLookup {
    /// The `(planting_day, maturity_day)` window at a cell.
    fn window(&self, crop: Crop, land_use: LandUse, lat: f64, lon: f64) -> Option<SeasonWindow>;
}

/// One crop calendar on a regular `(lat, lon)` grid.
///
/// `planting` and `maturity` are stored row-major with latitude varying
/// slowest, as read from the calendar files. Entries that are not a valid
/// day-of-year (fill values, `NaN`, fractions) are treated as missing.
#[derive(Debug, Clone)]
pub struct CalendarGrid {
    lats: Vec<f64>,
    lons: Vec<f64>,
    planting: Vec<f64>,
    maturity: Vec<f64>,
}

impl CalendarGrid {
    /// Creates a calendar grid after checking array shapes.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::CalendarShape`] if either value array does not
    /// hold `lats.len() * lons.len()` entries.
    pub fn new(
        lats: Vec<f64>,
        lons: Vec<f64>,
        planting: Vec<f64>,
        maturity: Vec<f64>,
    ) -> Result<Self, ResolveError> {
        let expected = lats.len() * lons.len();
        for got in [planting.len(), maturity.len()] {
            if got != expected {
                return Err(ResolveError::CalendarShape { expected, got });
            }
        }
        Ok(Self {
            lats,
            lons,
            planting,
            maturity,
        })
    }

    /// Latitude axis.
    pub fn lats(&self) -> &[f64] {
        &self.lats
    }

    /// Longitude axis.
    pub fn lons(&self) -> &[f64] {
        &self.lons
    }

    /// Window at a cell, or `None` if the cell is off-grid or either day is
    /// missing.
    pub fn window_at(&self, lat: f64, lon: f64) -> Option<SeasonWindow> {
        let i = coord_index(&self.lats, lat)?;
        let j = coord_index(&self.lons, lon)?;
        let idx = i * self.lons.len() + j;
        let start = Doy::from_f64(self.planting[idx])?;
        let end = Doy::from_f64(self.maturity[idx])?;
        Some(SeasonWindow::new(start, end))
    }
}

/// Calendar grids keyed by crop and land-use mode.
#[derive(Debug, Clone, Default)]
pub struct CropCalendars {
    grids: BTreeMap<(Crop, LandUse), CalendarGrid>,
}

impl CropCalendars {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) the grid for `(crop, land_use)`.
    pub fn insert(&mut self, crop: Crop, land_use: LandUse, grid: CalendarGrid) {
        self.grids.insert((crop, land_use), grid);
    }

    /// Returns the grid for `(crop, land_use)`, if loaded.
    pub fn get(&self, crop: Crop, land_use: LandUse) -> Option<&CalendarGrid> {
        self.grids.get(&(crop, land_use))
    }

    /// Number of loaded grids.
    pub fn len(&self) -> usize {
        self.grids.len()
    }

    /// Returns `true` if no grid is loaded.
    pub fn is_empty(&self) -> bool {
        self.grids.is_empty()
    }
}

impl CalendarLookup for CropCalendars {
    fn window(&self, crop: Crop, land_use: LandUse, lat: f64, lon: f64) -> Option<SeasonWindow> {
        self.get(crop, land_use)?.window_at(lat, lon)
    }
}
