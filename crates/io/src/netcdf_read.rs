//! Low-level NetCDF extraction helpers.

use std::path::Path;

use chrono::NaiveDate;
use cropex_calendar::{CalendarKind, DayStamp};
use netcdf::AttributeValue;

use crate::error::IoError;

/// Open a NetCDF file at `path`, returning [`IoError::FileNotFound`] if the
/// path does not exist on disk.
pub(crate) fn open_file(path: &Path) -> Result<netcdf::File, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    Ok(netcdf::open(path)?)
}

/// Read a 1-D `f64` variable, trying each alias in order.
///
/// Returns the data from the first alias that matches. If none match,
/// returns [`IoError::MissingVariable`] with the first alias as the name.
pub(crate) fn read_1d_f64(
    file: &netcdf::File,
    aliases: &[&str],
    path: &Path,
) -> Result<Vec<f64>, IoError> {
    for &alias in aliases {
        if let Some(var) = file.variable(alias) {
            return Ok(var.get_values::<f64, _>(..)?);
        }
    }

    let name = aliases.first().copied().unwrap_or("unknown");
    Err(IoError::MissingVariable {
        name: name.to_string(),
        path: path.to_path_buf(),
    })
}

/// Read an N-D `f64` variable with fill values replaced by `NaN`.
///
/// Returns the flattened data and the dimension lengths. Fails with
/// [`IoError::DimensionMismatch`] if the variable does not have `ndims`
/// dimensions.
pub(crate) fn read_masked(
    file: &netcdf::File,
    var_name: &str,
    ndims: usize,
    path: &Path,
) -> Result<(Vec<f64>, Vec<usize>), IoError> {
    let (var, shape) = shaped_variable(file, var_name, ndims, path)?;
    let mut data = var.get_values::<f64, _>(..)?;
    let fills = fill_values(&var);
    if !fills.is_empty() {
        for v in &mut data {
            if fills.iter().any(|f| same_fill(*v, *f)) {
                *v = f64::NAN;
            }
        }
    }
    Ok((data, shape))
}

/// Single-precision variant of [`read_masked`] for large data variables.
pub(crate) fn read_masked_f32(
    file: &netcdf::File,
    var_name: &str,
    ndims: usize,
    path: &Path,
) -> Result<(Vec<f32>, Vec<usize>), IoError> {
    let (var, shape) = shaped_variable(file, var_name, ndims, path)?;
    let mut data = var.get_values::<f32, _>(..)?;
    let fills = fill_values(&var);
    if !fills.is_empty() {
        for v in &mut data {
            if fills.iter().any(|f| same_fill(f64::from(*v), *f)) {
                *v = f32::NAN;
            }
        }
    }
    Ok((data, shape))
}

/// Look up `var_name` and check it has `ndims` dimensions.
fn shaped_variable<'f>(
    file: &'f netcdf::File,
    var_name: &str,
    ndims: usize,
    path: &Path,
) -> Result<(netcdf::Variable<'f>, Vec<usize>), IoError> {
    let var = file
        .variable(var_name)
        .ok_or_else(|| IoError::MissingVariable {
            name: var_name.to_string(),
            path: path.to_path_buf(),
        })?;

    let dims = var.dimensions();
    if dims.len() != ndims {
        return Err(IoError::DimensionMismatch {
            name: format!("{var_name} dimensions"),
            expected: ndims,
            got: dims.len(),
        });
    }
    let shape: Vec<usize> = dims.iter().map(|d| d.len()).collect();
    Ok((var, shape))
}

/// `_FillValue` and `missing_value` of a variable, where present.
fn fill_values(var: &netcdf::Variable<'_>) -> Vec<f64> {
    ["_FillValue", "missing_value"]
        .iter()
        .filter_map(|name| numeric_attribute(var, name))
        .collect()
}

/// Fill values are compared with a relative tolerance so that `f32` fills
/// widened to `f64` still match.
fn same_fill(value: f64, fill: f64) -> bool {
    value == fill || (value - fill).abs() <= fill.abs() * 1e-6
}

/// A numeric attribute as `f64`, if present.
fn numeric_attribute(var: &netcdf::Variable<'_>, name: &str) -> Option<f64> {
    match var.attribute_value(name)?.ok()? {
        AttributeValue::Double(v) => Some(v),
        AttributeValue::Float(v) => Some(f64::from(v)),
        AttributeValue::Int(v) => Some(f64::from(v)),
        AttributeValue::Short(v) => Some(f64::from(v)),
        AttributeValue::Doubles(v) => v.first().copied(),
        AttributeValue::Floats(v) => v.first().map(|&x| f64::from(x)),
        _ => None,
    }
}

/// A string attribute, if present.
pub(crate) fn string_attribute(var: &netcdf::Variable<'_>, name: &str) -> Option<String> {
    match var.attribute_value(name)?.ok()? {
        AttributeValue::Str(s) => Some(s),
        _ => None,
    }
}

/// CF time encoding: `"<unit> since <date>"` plus the calendar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct TimeEncoding {
    pub(crate) days_per_unit: f64,
    pub(crate) base: NaiveDate,
    pub(crate) kind: CalendarKind,
}

impl TimeEncoding {
    /// Parses a CF `units` string and optional `calendar` attribute.
    ///
    /// Units may be `days` or `hours`; the calendar defaults to `standard`.
    pub(crate) fn parse(units: &str, calendar: Option<&str>) -> Result<Self, IoError> {
        let parts: Vec<&str> = units.splitn(3, ' ').collect();
        if parts.len() < 3 || parts[1] != "since" {
            return Err(IoError::InvalidTime {
                reason: format!("unexpected time units format: '{units}'"),
            });
        }
        let days_per_unit = match parts[0] {
            "days" | "day" | "d" => 1.0,
            "hours" | "hour" | "h" => 1.0 / 24.0,
            other => {
                return Err(IoError::InvalidTime {
                    reason: format!("unsupported time unit '{other}'"),
                });
            }
        };

        // Date portion only; a trailing time of day is ignored.
        let date_str = parts[2].get(..10).unwrap_or(parts[2]);
        let base =
            NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|e| IoError::InvalidTime {
                reason: format!("failed to parse base date '{date_str}': {e}"),
            })?;

        let kind = CalendarKind::from_cf(calendar.unwrap_or("standard"))?;
        Ok(Self {
            days_per_unit,
            base,
            kind,
        })
    }

    /// Decodes raw offsets into daily stamps. Sub-daily offsets are floored
    /// to the day they fall in.
    pub(crate) fn decode(&self, offsets: &[f64]) -> Result<Vec<DayStamp>, IoError> {
        offsets
            .iter()
            .map(|&offset| {
                if !offset.is_finite() {
                    return Err(IoError::InvalidTime {
                        reason: format!("non-finite time offset {offset}"),
                    });
                }
                let days = (offset * self.days_per_unit).floor() as i64;
                Ok(self.kind.stamp_from_offset(self.base, days)?)
            })
            .collect()
    }
}

/// Read the time axis variable and decode it into daily stamps.
pub(crate) fn read_time(
    file: &netcdf::File,
    time_var: &str,
    path: &Path,
) -> Result<(Vec<DayStamp>, CalendarKind), IoError> {
    let var = file
        .variable(time_var)
        .ok_or_else(|| IoError::MissingVariable {
            name: time_var.to_string(),
            path: path.to_path_buf(),
        })?;
    let units = string_attribute(&var, "units").ok_or_else(|| IoError::InvalidTime {
        reason: format!("time variable '{time_var}' has no string 'units' attribute"),
    })?;
    let calendar = string_attribute(&var, "calendar");
    let encoding = TimeEncoding::parse(&units, calendar.as_deref())?;

    let offsets = var.get_values::<f64, _>(..)?;
    Ok((encoding.decode(&offsets)?, encoding.kind))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cropex_calendar::Doy;

    fn stamp(year: i32, doy: u16) -> DayStamp {
        DayStamp::new(year, Doy::new(doy).unwrap())
    }

    #[test]
    fn parse_days_since_with_time_of_day() {
        let enc = TimeEncoding::parse("days since 1850-01-01 00:00:00", Some("noleap")).unwrap();
        assert_eq!(enc.base, NaiveDate::from_ymd_opt(1850, 1, 1).unwrap());
        assert_eq!(enc.kind, CalendarKind::NoLeap);
        assert_eq!(enc.days_per_unit, 1.0);
    }

    #[test]
    fn parse_defaults_to_standard_calendar() {
        let enc = TimeEncoding::parse("days since 1981-01-01", None).unwrap();
        assert_eq!(enc.kind, CalendarKind::Standard);
    }

    #[test]
    fn parse_rejects_bad_units() {
        assert!(TimeEncoding::parse("seconds since 1981-01-01", None).is_err());
        assert!(TimeEncoding::parse("days after 1981-01-01", None).is_err());
        assert!(TimeEncoding::parse("days since yesterday", None).is_err());
    }

    #[test]
    fn parse_rejects_unknown_calendar() {
        assert!(TimeEncoding::parse("days since 1981-01-01", Some("360_day")).is_err());
    }

    #[test]
    fn decode_standard_crosses_leap_day() {
        let enc = TimeEncoding::parse("days since 1984-02-28", Some("gregorian")).unwrap();
        let stamps = enc.decode(&[0.0, 1.0, 2.0, 307.0]).unwrap();
        assert_eq!(stamps[0], stamp(1984, 59));
        assert_eq!(stamps[1], stamp(1984, 60));
        assert_eq!(stamps[2], stamp(1984, 61));
        assert_eq!(stamps[3], stamp(1984, 366));
    }

    #[test]
    fn decode_noleap_skips_leap_day() {
        let enc = TimeEncoding::parse("days since 1984-01-01", Some("365_day")).unwrap();
        let stamps = enc.decode(&[364.0, 365.0]).unwrap();
        assert_eq!(stamps[0], stamp(1984, 365));
        assert_eq!(stamps[1], stamp(1985, 1));
    }

    #[test]
    fn decode_hours_and_noon_offsets() {
        let enc = TimeEncoding::parse("hours since 2001-01-01", Some("noleap")).unwrap();
        assert_eq!(enc.decode(&[36.0]).unwrap(), vec![stamp(2001, 2)]);

        let enc = TimeEncoding::parse("days since 2001-01-01", Some("noleap")).unwrap();
        assert_eq!(enc.decode(&[0.5, 1.5]).unwrap(), vec![stamp(2001, 1), stamp(2001, 2)]);
    }

    #[test]
    fn decode_rejects_nan() {
        let enc = TimeEncoding::parse("days since 2001-01-01", None).unwrap();
        assert!(enc.decode(&[f64::NAN]).is_err());
    }

    #[test]
    fn fill_comparison_tolerates_f32_widening() {
        let fill32 = 1.0e20_f32;
        assert!(same_fill(f64::from(fill32), 1.0e20));
        assert!(!same_fill(3.5, 1.0e20));
    }
}
