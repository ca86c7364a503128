//! Daily climate cube reader.

use std::path::Path;

use cropex_calendar::DayStamp;
use cropex_extremes::{ClimateCube, TimeAxis};
use tracing::{debug, info};

use crate::error::IoError;
use crate::netcdf_read;
use crate::validate::ValidationCollector;

/// Configuration for reading a daily climate variable from NetCDF files.
///
/// Use the builder methods (`with_*`) to customise the variable and
/// coordinate names. Defaults follow CF conventions.
#[derive(Debug, Clone)]
pub struct ClimateReaderConfig {
    /// NetCDF variable holding the (time, lat, lon) data.
    var_name: String,
    /// Aliases to try when looking up latitude coordinates.
    lat_aliases: Vec<String>,
    /// Aliases to try when looking up longitude coordinates.
    lon_aliases: Vec<String>,
    /// NetCDF variable name for the time axis.
    time_var: String,
}

impl ClimateReaderConfig {
    /// Creates a configuration reading `var_name`.
    pub fn new(var_name: impl Into<String>) -> Self {
        Self {
            var_name: var_name.into(),
            lat_aliases: vec!["lat".into(), "latitude".into()],
            lon_aliases: vec!["lon".into(), "longitude".into()],
            time_var: "time".into(),
        }
    }

    /// Set the time variable name.
    pub fn with_time_var(mut self, name: impl Into<String>) -> Self {
        self.time_var = name.into();
        self
    }

    /// Set the latitude aliases, tried in order.
    pub fn with_lat_aliases(mut self, aliases: Vec<String>) -> Self {
        self.lat_aliases = aliases;
        self
    }

    /// Set the longitude aliases, tried in order.
    pub fn with_lon_aliases(mut self, aliases: Vec<String>) -> Self {
        self.lon_aliases = aliases;
        self
    }

    /// The data variable name.
    pub fn var_name(&self) -> &str {
        &self.var_name
    }

    /// Validate that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Validation`] if a name is empty or an alias list is
    /// empty.
    pub fn validate(&self) -> Result<(), IoError> {
        let mut c = ValidationCollector::new();
        c.check(self.var_name.is_empty(), || "var_name must not be empty".into());
        c.check(self.time_var.is_empty(), || "time_var must not be empty".into());
        c.check(self.lat_aliases.is_empty(), || {
            "lat_aliases must not be empty".into()
        });
        c.check(self.lon_aliases.is_empty(), || {
            "lon_aliases must not be empty".into()
        });
        c.finish()
    }
}

/// Read a daily climate cube from one or more NetCDF files.
///
/// Each file must hold a 3-D `(time, lat, lon)` variable, 1-D coordinate
/// variables and a CF time axis. `_FillValue`/`missing_value` entries become
/// `NaN`; values are held in single precision. Files are ordered by their
/// first time step and appended one at a time to a buffer sized for the
/// whole record. Coordinates must agree and time must be strictly increasing
/// across files.
///
/// # Errors
///
/// Returns [`IoError`] on missing files or variables, dimension mismatches,
/// undecodable time axes, or inconsistent files.
pub fn read_climate<P: AsRef<Path>>(
    paths: &[P],
    config: &ClimateReaderConfig,
) -> Result<ClimateCube, IoError> {
    config.validate()?;
    if paths.is_empty() {
        return Err(IoError::Validation {
            count: 1,
            details: "no climate files given".to_string(),
        });
    }

    let mut ordered = paths
        .iter()
        .map(|p| {
            let path = p.as_ref();
            time_extent(path, config).map(|(first, steps)| (first, steps, path))
        })
        .collect::<Result<Vec<_>, _>>()?;
    ordered.sort_by_key(|&(first, _, _)| first);
    let total_steps: usize = ordered.iter().map(|&(_, steps, _)| steps).sum();

    let mut iter = ordered.into_iter();
    let (_, _, first_path) = iter.next().ok_or_else(|| IoError::Validation {
        count: 1,
        details: "no climate files given".to_string(),
    })?;
    let mut cube = read_one(first_path, config)?;
    cube.reserve_steps(total_steps.saturating_sub(cube.time().len()));
    for (_, _, path) in iter {
        cube = cube.concat(read_one(path, config)?)?;
    }

    info!(
        files = paths.len(),
        days = cube.time().len(),
        lats = cube.lats().len(),
        lons = cube.lons().len(),
        first_year = cube.time().first_year(),
        last_year = cube.time().last_year(),
        "climate record loaded"
    );
    Ok(cube)
}

/// First time step and number of steps of one file, without its data.
fn time_extent(path: &Path, config: &ClimateReaderConfig) -> Result<(DayStamp, usize), IoError> {
    let file = netcdf_read::open_file(path)?;
    let (stamps, _) = netcdf_read::read_time(&file, &config.time_var, path)?;
    let first = stamps.first().copied().ok_or_else(|| IoError::InvalidTime {
        reason: format!("empty time axis in {}", path.display()),
    })?;
    Ok((first, stamps.len()))
}

fn read_one(path: &Path, config: &ClimateReaderConfig) -> Result<ClimateCube, IoError> {
    let file = netcdf_read::open_file(path)?;

    let lat_refs: Vec<&str> = config.lat_aliases.iter().map(String::as_str).collect();
    let lon_refs: Vec<&str> = config.lon_aliases.iter().map(String::as_str).collect();
    let lats = netcdf_read::read_1d_f64(&file, &lat_refs, path)?;
    let lons = netcdf_read::read_1d_f64(&file, &lon_refs, path)?;

    let (stamps, kind) = netcdf_read::read_time(&file, &config.time_var, path)?;

    let (values, shape) = netcdf_read::read_masked_f32(&file, &config.var_name, 3, path)?;
    for (name, expected, got) in [
        ("time", stamps.len(), shape[0]),
        ("lat", lats.len(), shape[1]),
        ("lon", lons.len(), shape[2]),
    ] {
        if expected != got {
            return Err(IoError::DimensionMismatch {
                name: name.to_string(),
                expected,
                got,
            });
        }
    }

    let units = file
        .variable(&config.var_name)
        .and_then(|v| netcdf_read::string_attribute(&v, "units"))
        .unwrap_or_default();

    debug!(
        path = %path.display(),
        steps = stamps.len(),
        calendar = kind.name(),
        "read climate file"
    );

    let time = TimeAxis::new(stamps, kind)?;
    Ok(ClimateCube::new(time, lats, lons, values)?.with_units(units))
}
