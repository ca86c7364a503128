//! Output indicator grids indexed by (season-year, lat, lon).

use std::sync::Arc;

use cropex_season::coord_index;

use crate::aggregate::CellSeries;
use crate::error::ExtremesError;
use crate::indicator::Indicator;

/// Axes shared by every indicator grid of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct GridAxes {
    years: Vec<i32>,
    lats: Vec<f64>,
    lons: Vec<f64>,
}

impl GridAxes {
    /// Creates axes for season-years `first_year..=last_year`.
    ///
    /// # Errors
    ///
    /// Returns [`ExtremesError::InvalidAxis`] if the year range is empty or a
    /// coordinate axis is not strictly increasing and finite.
    pub fn new(
        first_year: i32,
        last_year: i32,
        lats: Vec<f64>,
        lons: Vec<f64>,
    ) -> Result<Self, ExtremesError> {
        if last_year < first_year {
            return Err(ExtremesError::InvalidAxis {
                axis: "year",
                reason: format!("last year {last_year} precedes first year {first_year}"),
            });
        }
        check_coordinate_axis("lat", &lats)?;
        check_coordinate_axis("lon", &lons)?;
        Ok(Self {
            years: (first_year..=last_year).collect(),
            lats,
            lons,
        })
    }

    /// Season-years, ascending and contiguous.
    pub fn years(&self) -> &[i32] {
        &self.years
    }

    /// Latitudes, ascending.
    pub fn lats(&self) -> &[f64] {
        &self.lats
    }

    /// Longitudes, ascending.
    pub fn lons(&self) -> &[f64] {
        &self.lons
    }

    /// `(years, lats, lons)` lengths.
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.years.len(), self.lats.len(), self.lons.len())
    }

    /// Index of a season-year.
    pub fn year_index(&self, year: i32) -> Option<usize> {
        let offset = usize::try_from(year - self.years[0]).ok()?;
        (offset < self.years.len()).then_some(offset)
    }

    /// Index of a latitude, matched within [`cropex_season::COORD_TOLERANCE`].
    pub fn lat_index(&self, lat: f64) -> Option<usize> {
        coord_index(&self.lats, lat)
    }

    /// Index of a longitude, matched within [`cropex_season::COORD_TOLERANCE`].
    pub fn lon_index(&self, lon: f64) -> Option<usize> {
        coord_index(&self.lons, lon)
    }
}

fn check_coordinate_axis(axis: &'static str, values: &[f64]) -> Result<(), ExtremesError> {
    if values.iter().any(|v| !v.is_finite()) {
        return Err(ExtremesError::InvalidAxis {
            axis,
            reason: "contains non-finite coordinates".to_string(),
        });
    }
    if let Some(i) = values.windows(2).position(|w| w[1] <= w[0]) {
        return Err(ExtremesError::InvalidAxis {
            axis,
            reason: format!("not strictly increasing at index {}", i + 1),
        });
    }
    Ok(())
}

/// Dense values of one indicator plus a validity mask.
///
/// Freshly allocated grids hold zeros with every entry invalid, so "no data"
/// and a computed zero stay distinct.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorGrid {
    indicator: Indicator,
    axes: Arc<GridAxes>,
    values: Vec<f64>,
    valid: Vec<bool>,
}

impl IndicatorGrid {
    /// Allocates a grid over `axes` with every entry marked no-data.
    pub fn allocate(indicator: Indicator, axes: Arc<GridAxes>) -> Self {
        let (ny, nlat, nlon) = axes.shape();
        let n = ny * nlat * nlon;
        Self {
            indicator,
            axes,
            values: vec![0.0; n],
            valid: vec![false; n],
        }
    }

    /// The indicator stored in this grid.
    pub fn indicator(&self) -> Indicator {
        self.indicator
    }

    /// The shared axes.
    pub fn axes(&self) -> &Arc<GridAxes> {
        &self.axes
    }

    fn offset(&self, year_idx: usize, lat_idx: usize, lon_idx: usize) -> Option<usize> {
        let (ny, nlat, nlon) = self.axes.shape();
        (year_idx < ny && lat_idx < nlat && lon_idx < nlon)
            .then(|| (year_idx * nlat + lat_idx) * nlon + lon_idx)
    }

    /// Writes an entry and marks it valid.
    pub fn set(
        &mut self,
        year_idx: usize,
        lat_idx: usize,
        lon_idx: usize,
        value: f64,
    ) -> Result<(), ExtremesError> {
        let i = self
            .offset(year_idx, lat_idx, lon_idx)
            .ok_or(ExtremesError::IndexOutOfBounds {
                year_idx,
                lat_idx,
                lon_idx,
                shape: self.axes.shape(),
            })?;
        self.values[i] = value;
        self.valid[i] = true;
        Ok(())
    }

    /// Reads an entry; `None` for no-data or out-of-bounds indices.
    pub fn get(&self, year_idx: usize, lat_idx: usize, lon_idx: usize) -> Option<f64> {
        let i = self.offset(year_idx, lat_idx, lon_idx)?;
        self.valid[i].then_some(self.values[i])
    }

    /// Writes every season-year of one cell's series into the `(lat, lon)`
    /// column. No-data entries and years outside the axes are left untouched.
    ///
    /// Returns the number of entries written.
    pub fn set_column(
        &mut self,
        lat_idx: usize,
        lon_idx: usize,
        series: &CellSeries,
    ) -> Result<usize, ExtremesError> {
        let mut written = 0;
        for (year, entry) in series.iter() {
            let (Some(year_idx), Some(stats)) = (self.axes.year_index(year), entry) else {
                continue;
            };
            self.set(year_idx, lat_idx, lon_idx, self.indicator.extract(stats))?;
            written += 1;
        }
        Ok(written)
    }

    /// Number of valid entries.
    pub fn valid_count(&self) -> usize {
        self.valid.iter().filter(|&&v| v).count()
    }

    /// Row-major (year, lat, lon) values with no-data replaced by `fill`.
    pub fn filled(&self, fill: f64) -> Vec<f64> {
        self.values
            .iter()
            .zip(&self.valid)
            .map(|(&v, &ok)| if ok { v } else { fill })
            .collect()
    }

    /// Row-major validity mask.
    pub fn mask(&self) -> &[bool] {
        &self.valid
    }
}
