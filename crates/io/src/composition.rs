//! Crop composition reader.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float64Type};
use arrow::record_batch::RecordBatch;
use cropex_season::{COORD_TOLERANCE, CellComposition, Crop, CropAreas};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use tracing::{debug, info};

use crate::error::IoError;
use crate::validate::{ValidationCollector, check_area};

/// Column names of the long composition table, in no particular order.
const COLUMNS: [&str; 5] = ["lat", "lon", "crop", "irr_area", "rain_area"];

/// Reads all record batches from a Parquet file.
fn read_batches(path: &Path) -> Result<Vec<RecordBatch>, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let file = std::fs::File::open(path).map_err(|e| IoError::Fs {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let reader = ParquetRecordBatchReaderBuilder::try_new(file)?.build()?;
    Ok(reader.collect::<Result<Vec<_>, _>>()?)
}

/// The five composition columns of one batch, cast to canonical types.
struct Columns {
    lat: ArrayRef,
    lon: ArrayRef,
    crop: ArrayRef,
    irr_area: ArrayRef,
    rain_area: ArrayRef,
}

impl Columns {
    fn from_batch(batch: &RecordBatch) -> Result<Self, IoError> {
        let schema = batch.schema();
        let missing: Vec<&str> = COLUMNS
            .iter()
            .copied()
            .filter(|name| schema.index_of(name).is_err())
            .collect();
        if !missing.is_empty() {
            return Err(IoError::Validation {
                count: missing.len(),
                details: missing
                    .iter()
                    .map(|name| format!("missing column '{name}'"))
                    .collect::<Vec<_>>()
                    .join("; "),
            });
        }

        let column = |name: &str, to: &DataType| -> Result<ArrayRef, IoError> {
            let idx = schema.index_of(name)?;
            Ok(cast(batch.column(idx), to)?)
        };
        Ok(Self {
            lat: column("lat", &DataType::Float64)?,
            lon: column("lon", &DataType::Float64)?,
            crop: column("crop", &DataType::Utf8)?,
            irr_area: column("irr_area", &DataType::Float64)?,
            rain_area: column("rain_area", &DataType::Float64)?,
        })
    }
}

/// Coordinates quantised to [`COORD_TOLERANCE`] so that a cell's rows group
/// together.
fn coord_key(lat: f64, lon: f64) -> (i64, i64) {
    (
        (lat / COORD_TOLERANCE).round() as i64,
        (lon / COORD_TOLERANCE).round() as i64,
    )
}

/// Read a crop composition table from Parquet.
///
/// The table is long-form with columns `lat`, `lon`, `crop`, `irr_area` and
/// `rain_area` (numeric columns of any numeric type). Rows are pivoted to one
/// [`CellComposition`] per `(lat, lon)`; crops without a row get zero area.
/// Cells with zero area for every crop are dropped. The result is sorted by
/// latitude, then longitude.
///
/// Every row is checked before failing: null values, unknown crop codes,
/// negative or non-finite areas, and repeated `(lat, lon, crop)` rows are
/// reported together in one [`IoError::Validation`].
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] if the file does not exist,
/// [`IoError::Parquet`] on format errors, or [`IoError::Validation`] on bad
/// rows or missing columns.
pub fn read_composition(path: &Path) -> Result<Vec<CellComposition>, IoError> {
    let batches = read_batches(path)?;

    let mut cells: BTreeMap<(i64, i64), CellComposition> = BTreeMap::new();
    let mut seen: BTreeSet<(i64, i64, Crop)> = BTreeSet::new();
    let mut errors = ValidationCollector::new();
    let mut n_rows = 0usize;

    for batch in &batches {
        let cols = Columns::from_batch(batch)?;
        let lat = cols.lat.as_primitive::<Float64Type>();
        let lon = cols.lon.as_primitive::<Float64Type>();
        let crop = cols.crop.as_string::<i32>();
        let irr = cols.irr_area.as_primitive::<Float64Type>();
        let rain = cols.rain_area.as_primitive::<Float64Type>();

        for r in 0..batch.num_rows() {
            let row = n_rows + r;
            let nulls: Vec<&str> = [
                ("lat", lat.is_null(r)),
                ("lon", lon.is_null(r)),
                ("crop", crop.is_null(r)),
                ("irr_area", irr.is_null(r)),
                ("rain_area", rain.is_null(r)),
            ]
            .into_iter()
            .filter_map(|(name, null)| null.then_some(name))
            .collect();
            if !nulls.is_empty() {
                errors.push(format!("row {row}: null {}", nulls.join(", ")));
                continue;
            }

            let prior = errors.len();
            let (la, lo) = (lat.value(r), lon.value(r));
            let (irr_area, rain_area) = (irr.value(r), rain.value(r));
            errors.check(!la.is_finite() || !lo.is_finite(), || {
                format!("row {row}: non-finite coordinate ({la}, {lo})")
            });
            check_area(&mut errors, row, "irr_area", irr_area);
            check_area(&mut errors, row, "rain_area", rain_area);
            let code = match crop.value(r).parse::<Crop>() {
                Ok(code) => code,
                Err(e) => {
                    errors.push(format!("row {row}: {e}"));
                    continue;
                }
            };
            if errors.len() > prior {
                continue;
            }

            let key = coord_key(la, lo);
            if !seen.insert((key.0, key.1, code)) {
                errors.push(format!("row {row}: duplicate {code} row for ({la}, {lo})"));
                continue;
            }
            cells
                .entry(key)
                .or_insert_with(|| CellComposition::new(la, lo))
                .set_areas(
                    code,
                    CropAreas {
                        irrigated: irr_area,
                        rainfed: rain_area,
                    },
                );
        }
        n_rows += batch.num_rows();
    }
    errors.finish()?;

    let n_cells = cells.len();
    let cropland: Vec<CellComposition> = cells
        .into_values()
        .filter(|c| c.grows_any(&Crop::ALL))
        .collect();
    debug!(dropped = n_cells - cropland.len(), "cells without crop area");
    info!(rows = n_rows, cells = cropland.len(), "crop composition loaded");
    Ok(cropland)
}
