//! NetCDF writer for indicator grids.

use std::path::Path;

use cropex_extremes::{Indicator, IndicatorGrid};
use cropex_season::Crop;
use tracing::debug;

use crate::error::IoError;

/// Attributes written alongside an indicator grid.
#[derive(Debug, Clone, Default)]
pub struct GridWriteOptions {
    /// Units of the input climate variable, used for season totals.
    input_units: String,
    /// Crop the indicators were computed for, `None` for the crop aggregate.
    crop: Option<Crop>,
}

impl GridWriteOptions {
    /// Options for aggregate-scope grids with unknown input units.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the input variable units.
    pub fn with_input_units(mut self, units: impl Into<String>) -> Self {
        self.input_units = units.into();
        self
    }

    /// Marks the grids as single-crop output.
    pub fn with_crop(mut self, crop: Option<Crop>) -> Self {
        self.crop = crop;
        self
    }

    fn scope_label(&self) -> &'static str {
        self.crop.map_or("aggr", Crop::code)
    }
}

/// Output file name for an indicator: `{CODE}_aggr.nc` for the crop
/// aggregate, `{CODE}_{crop}.nc` for one crop.
pub fn grid_file_name(indicator: Indicator, crop: Option<Crop>) -> String {
    format!("{}_{}.nc", indicator.code(), crop.map_or("aggr", Crop::code))
}

/// Write one indicator grid to a NetCDF file.
///
/// The file gets dimensions `year`, `lat` and `lon`, matching coordinate
/// variables, and a `(year, lat, lon)` data variable named by the indicator
/// code. No-data entries are written as `NaN`, which is also declared as the
/// `_FillValue`.
///
/// # Errors
///
/// Returns [`IoError::Netcdf`] if the file cannot be created or written.
pub fn write_grid(
    path: &Path,
    grid: &IndicatorGrid,
    options: &GridWriteOptions,
) -> Result<(), IoError> {
    let axes = grid.axes();
    let (ny, nlat, nlon) = axes.shape();
    let indicator = grid.indicator();

    let mut file = netcdf::create(path)?;
    file.add_dimension("year", ny)?;
    file.add_dimension("lat", nlat)?;
    file.add_dimension("lon", nlon)?;

    {
        let mut var = file.add_variable::<i32>("year", &["year"])?;
        var.put_attribute("long_name", "growing-season year")?;
        var.put_values(axes.years(), ..)?;
    }
    {
        let mut var = file.add_variable::<f64>("lat", &["lat"])?;
        var.put_attribute("standard_name", "latitude")?;
        var.put_attribute("units", "degrees_north")?;
        var.put_values(axes.lats(), ..)?;
    }
    {
        let mut var = file.add_variable::<f64>("lon", &["lon"])?;
        var.put_attribute("standard_name", "longitude")?;
        var.put_attribute("units", "degrees_east")?;
        var.put_values(axes.lons(), ..)?;
    }
    {
        let mut var = file.add_variable::<f64>(indicator.code(), &["year", "lat", "lon"])?;
        var.put_attribute("_FillValue", f64::NAN)?;
        var.put_attribute("long_name", indicator.long_name())?;
        var.put_attribute("units", indicator.units(&options.input_units))?;
        var.put_values(&grid.filled(f64::NAN), ..)?;
    }
    file.add_attribute("scope", options.scope_label())?;

    debug!(
        path = %path.display(),
        indicator = indicator.code(),
        valid = grid.valid_count(),
        "wrote indicator grid"
    );
    Ok(())
}
