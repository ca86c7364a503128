//! In-memory daily climate cube.

use cropex_season::{COORD_TOLERANCE, coord_index};

use crate::error::ExtremesError;
use crate::time::TimeAxis;

/// Daily values of one variable on a (time, lat, lon) grid.
///
/// Values are stored row-major with time varying slowest, in single
/// precision; cell series are widened to `f64` on extraction. Missing values
/// are `NaN`.
#[derive(Debug, Clone)]
pub struct ClimateCube {
    time: TimeAxis,
    lats: Vec<f64>,
    lons: Vec<f64>,
    values: Vec<f32>,
    units: String,
}

impl ClimateCube {
    /// Creates a cube after checking that `values` matches the axes.
    pub fn new(
        time: TimeAxis,
        lats: Vec<f64>,
        lons: Vec<f64>,
        values: Vec<f32>,
    ) -> Result<Self, ExtremesError> {
        let expected = time.len() * lats.len() * lons.len();
        if values.len() != expected {
            return Err(ExtremesError::ShapeMismatch {
                expected,
                got: values.len(),
            });
        }
        Ok(Self {
            time,
            lats,
            lons,
            values,
            units: String::new(),
        })
    }

    /// Sets the units of the values.
    pub fn with_units(mut self, units: impl Into<String>) -> Self {
        self.units = units.into();
        self
    }

    /// Time axis.
    pub fn time(&self) -> &TimeAxis {
        &self.time
    }

    /// Latitude axis.
    pub fn lats(&self) -> &[f64] {
        &self.lats
    }

    /// Longitude axis.
    pub fn lons(&self) -> &[f64] {
        &self.lons
    }

    /// Units of the values, empty if unknown.
    pub fn units(&self) -> &str {
        &self.units
    }

    /// Reserves room for `steps` more time steps ahead of [`concat`](Self::concat).
    pub fn reserve_steps(&mut self, steps: usize) {
        self.values.reserve(steps * self.lats.len() * self.lons.len());
    }

    /// Index of the cell at `(lat, lon)`.
    pub fn cell_index(&self, lat: f64, lon: f64) -> Option<(usize, usize)> {
        Some((coord_index(&self.lats, lat)?, coord_index(&self.lons, lon)?))
    }

    /// The daily series of one cell.
    ///
    /// # Panics
    ///
    /// Panics if an index is out of bounds.
    pub fn series(&self, lat_idx: usize, lon_idx: usize) -> Vec<f64> {
        assert!(lat_idx < self.lats.len() && lon_idx < self.lons.len());
        let plane = self.lats.len() * self.lons.len();
        let offset = lat_idx * self.lons.len() + lon_idx;
        self.values
            .iter()
            .skip(offset)
            .step_by(plane)
            .map(|&v| f64::from(v))
            .collect()
    }

    /// Appends a later cube on the same spatial grid along time.
    ///
    /// # Errors
    ///
    /// Returns [`ExtremesError::InvalidAxis`] if the coordinates differ and
    /// a time error if `other` does not start after this cube ends.
    pub fn concat(mut self, other: ClimateCube) -> Result<Self, ExtremesError> {
        same_axis("lat", &self.lats, &other.lats)?;
        same_axis("lon", &self.lons, &other.lons)?;
        self.time = self.time.concat(other.time)?;
        self.values.extend(other.values);
        Ok(self)
    }
}

fn same_axis(axis: &'static str, a: &[f64], b: &[f64]) -> Result<(), ExtremesError> {
    let matches =
        a.len() == b.len() && a.iter().zip(b).all(|(x, y)| (x - y).abs() <= COORD_TOLERANCE);
    if matches {
        Ok(())
    } else {
        Err(ExtremesError::InvalidAxis {
            axis,
            reason: "coordinates differ between files".to_string(),
        })
    }
}
