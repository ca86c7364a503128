//! Crop calendar readers.

use std::path::{Path, PathBuf};

use cropex_season::{CalendarGrid, Crop, CropCalendars, LandUse};
use tracing::{info, warn};

use crate::error::IoError;
use crate::netcdf_read;

const LAT_ALIASES: [&str; 2] = ["lat", "latitude"];
const LON_ALIASES: [&str; 2] = ["lon", "longitude"];

/// Expands a calendar path template.
///
/// `{crop}` is replaced by the crop code and `{landuse}` by the land-use
/// token (`firr` or `noirr`).
pub fn calendar_path(template: &str, crop: Crop, land_use: LandUse) -> PathBuf {
    PathBuf::from(
        template
            .replace("{crop}", crop.code())
            .replace("{landuse}", land_use.token()),
    )
}

/// Read one crop calendar grid.
///
/// The file must hold 2-D `(lat, lon)` variables `planting_day` and
/// `maturity_day`. Fill values, `NaN` and values that are not a whole
/// day-of-year in 1..=366 are treated as missing.
///
/// # Errors
///
/// Returns [`IoError`] on missing files or variables, or shape mismatches.
pub fn read_calendar(path: &Path) -> Result<CalendarGrid, IoError> {
    let file = netcdf_read::open_file(path)?;
    let lats = netcdf_read::read_1d_f64(&file, &LAT_ALIASES, path)?;
    let lons = netcdf_read::read_1d_f64(&file, &LON_ALIASES, path)?;

    let (planting, shape) = netcdf_read::read_masked(&file, "planting_day", 2, path)?;
    let (maturity, _) = netcdf_read::read_masked(&file, "maturity_day", 2, path)?;
    if shape[0] != lats.len() {
        return Err(IoError::DimensionMismatch {
            name: "lat".to_string(),
            expected: lats.len(),
            got: shape[0],
        });
    }
    if shape[1] != lons.len() {
        return Err(IoError::DimensionMismatch {
            name: "lon".to_string(),
            expected: lons.len(),
            got: shape[1],
        });
    }

    Ok(CalendarGrid::new(lats, lons, planting, maturity)?)
}

/// Load every available calendar for `crops` from a path template.
///
/// Missing files are skipped with a warning: cells that need them fail at
/// resolution time with a missing-calendar error.
///
/// # Errors
///
/// Returns [`IoError`] if an existing file cannot be read.
pub fn load_calendars(template: &str, crops: &[Crop]) -> Result<CropCalendars, IoError> {
    let mut calendars = CropCalendars::new();
    for &crop in crops {
        for land_use in LandUse::ALL {
            let path = calendar_path(template, crop, land_use);
            if !path.exists() {
                warn!(path = %path.display(), %crop, %land_use, "calendar file missing");
                continue;
            }
            calendars.insert(crop, land_use, read_calendar(&path)?);
        }
    }
    info!(loaded = calendars.len(), "crop calendars loaded");
    Ok(calendars)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_expansion() {
        let path = calendar_path(
            "cal/ggcmi-crop-calendar-phase3_2015soc_{crop}_{landuse}.nc",
            Crop::WinterWheat,
            LandUse::Rainfed,
        );
        assert_eq!(
            path,
            PathBuf::from("cal/ggcmi-crop-calendar-phase3_2015soc_wwh_noirr.nc")
        );
    }

    #[test]
    fn missing_calendar_file() {
        let err = read_calendar(Path::new("/nonexistent/cal_mai_firr.nc")).unwrap_err();
        assert!(matches!(err, IoError::FileNotFound { .. }));
    }

    #[test]
    fn load_skips_missing_files() {
        let calendars = load_calendars("/nonexistent/{crop}_{landuse}.nc", &Crop::ALL).unwrap();
        assert!(calendars.is_empty());
    }
}
