//! # cropex-io
//!
//! Reads daily climate cubes and crop calendars from NetCDF, crop composition
//! tables from Parquet, and writes indicator grids to NetCDF and run reports
//! to JSON. Bridges external file formats into the in-memory types of
//! `cropex-season` and `cropex-extremes`.

mod calendar_read;
mod climate;
mod composition;
mod error;
mod grid_write;
mod netcdf_read;
mod report;
mod validate;

pub use calendar_read::{calendar_path, load_calendars, read_calendar};
pub use climate::{ClimateReaderConfig, read_climate};
pub use composition::read_composition;
pub use error::IoError;
pub use grid_write::{GridWriteOptions, grid_file_name, write_grid};
pub use report::write_json_report;
