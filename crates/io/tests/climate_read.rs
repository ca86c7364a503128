//! Integration tests: reading daily climate cubes from NetCDF.

use std::path::{Path, PathBuf};

use cropex_calendar::CalendarKind;
use cropex_io::{ClimateReaderConfig, IoError, read_climate};
use tempfile::tempdir;

/// Minimal (time, lat, lon) fixture.
struct Fixture {
    lats: Vec<f64>,
    lons: Vec<f64>,
    offsets: Vec<f64>,
    units: String,
    calendar: Option<String>,
    values: Vec<f64>,
    fill_value: Option<f64>,
    lat_name: &'static str,
}

impl Fixture {
    fn new(nt: usize, units: &str) -> Self {
        let lats = vec![10.25, 10.75];
        let lons = vec![-5.25, -4.75, -4.25];
        let values = (0..nt * 6).map(|i| i as f64).collect();
        Self {
            lats,
            lons,
            offsets: (0..nt).map(|t| t as f64).collect(),
            units: units.to_string(),
            calendar: Some("noleap".to_string()),
            values,
            fill_value: None,
            lat_name: "lat",
        }
    }

    fn write(&self, path: &Path) -> PathBuf {
        let mut file = netcdf::create(path).expect("create");
        file.add_dimension("time", self.offsets.len()).expect("time dim");
        file.add_dimension(self.lat_name, self.lats.len()).expect("lat dim");
        file.add_dimension("lon", self.lons.len()).expect("lon dim");
        {
            let mut var = file
                .add_variable::<f64>(self.lat_name, &[self.lat_name])
                .expect("lat var");
            var.put_values(&self.lats, ..).expect("lat values");
        }
        {
            let mut var = file.add_variable::<f64>("lon", &["lon"]).expect("lon var");
            var.put_values(&self.lons, ..).expect("lon values");
        }
        {
            let mut var = file.add_variable::<f64>("time", &["time"]).expect("time var");
            var.put_attribute("units", self.units.as_str()).expect("units");
            if let Some(cal) = &self.calendar {
                var.put_attribute("calendar", cal.as_str()).expect("calendar");
            }
            var.put_values(&self.offsets, ..).expect("time values");
        }
        {
            let mut var = file
                .add_variable::<f64>("pr", &["time", self.lat_name, "lon"])
                .expect("pr var");
            if let Some(fv) = self.fill_value {
                var.put_attribute("_FillValue", fv).expect("fill");
            }
            var.put_attribute("units", "kg m-2 s-1").expect("pr units");
            var.put_values(&self.values, ..).expect("pr values");
        }
        path.to_path_buf()
    }
}

#[test]
fn reads_single_file() {
    let dir = tempdir().unwrap();
    let path = Fixture::new(730, "days since 1981-01-01").write(&dir.path().join("pr.nc"));

    let cube = read_climate(&[&path], &ClimateReaderConfig::new("pr")).unwrap();
    assert_eq!(cube.time().len(), 730);
    assert_eq!(cube.time().kind(), CalendarKind::NoLeap);
    assert_eq!(cube.time().first_year(), 1981);
    assert_eq!(cube.time().last_year(), 1982);
    assert_eq!(cube.lats(), &[10.25, 10.75]);
    assert_eq!(cube.units(), "kg m-2 s-1");

    // Cell (1, 2) is flat index 5 of each 6-cell plane.
    let series = cube.series(1, 2);
    assert_eq!(series[0], 5.0);
    assert_eq!(series[1], 11.0);
}

#[test]
fn fill_values_become_nan() {
    let dir = tempdir().unwrap();
    let mut fixture = Fixture::new(10, "days since 1981-01-01");
    fixture.fill_value = Some(1.0e20);
    fixture.values[0] = 1.0e20;
    let path = fixture.write(&dir.path().join("pr.nc"));

    let cube = read_climate(&[&path], &ClimateReaderConfig::new("pr")).unwrap();
    let series = cube.series(0, 0);
    assert!(series[0].is_nan());
    assert_eq!(series[1], 6.0);
}

#[test]
fn files_are_ordered_and_concatenated() {
    let dir = tempdir().unwrap();
    let early = Fixture::new(365, "days since 1981-01-01").write(&dir.path().join("a.nc"));
    let mut late = Fixture::new(365, "days since 1982-01-01");
    late.values = vec![-1.0; 365 * 6];
    let late = late.write(&dir.path().join("b.nc"));

    // Given out of order on purpose.
    let cube = read_climate(&[&late, &early], &ClimateReaderConfig::new("pr")).unwrap();
    assert_eq!(cube.time().len(), 730);
    let series = cube.series(0, 0);
    assert_eq!(series[364], 364.0 * 6.0);
    assert_eq!(series[365], -1.0);
}

#[test]
fn overlapping_files_are_rejected() {
    let dir = tempdir().unwrap();
    let a = Fixture::new(365, "days since 1981-01-01").write(&dir.path().join("a.nc"));
    let b = Fixture::new(365, "days since 1981-06-01").write(&dir.path().join("b.nc"));
    let err = read_climate(&[&a, &b], &ClimateReaderConfig::new("pr")).unwrap_err();
    assert!(matches!(err, IoError::Data { .. }), "got {err:?}");
}

#[test]
fn latitude_alias_is_accepted() {
    let dir = tempdir().unwrap();
    let mut fixture = Fixture::new(5, "days since 2001-01-01");
    fixture.lat_name = "latitude";
    let path = fixture.write(&dir.path().join("pr.nc"));
    let cube = read_climate(&[&path], &ClimateReaderConfig::new("pr")).unwrap();
    assert_eq!(cube.lats().len(), 2);
}

#[test]
fn missing_calendar_attribute_means_standard() {
    let dir = tempdir().unwrap();
    let mut fixture = Fixture::new(366, "days since 1984-01-01");
    fixture.calendar = None;
    let path = fixture.write(&dir.path().join("pr.nc"));
    let cube = read_climate(&[&path], &ClimateReaderConfig::new("pr")).unwrap();
    assert_eq!(cube.time().kind(), CalendarKind::Standard);
    assert_eq!(cube.time().last_year(), 1984);
}

#[test]
fn missing_variable() {
    let dir = tempdir().unwrap();
    let path = Fixture::new(5, "days since 2001-01-01").write(&dir.path().join("pr.nc"));
    let err = read_climate(&[&path], &ClimateReaderConfig::new("tasmax")).unwrap_err();
    assert!(matches!(err, IoError::MissingVariable { ref name, .. } if name == "tasmax"));
}

#[test]
fn missing_file() {
    let err = read_climate(
        &[Path::new("/nonexistent/pr.nc")],
        &ClimateReaderConfig::new("pr"),
    )
    .unwrap_err();
    assert!(matches!(err, IoError::FileNotFound { .. }));
}
