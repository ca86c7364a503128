//! Grid-wide aggregation over every cropland cell.

use std::sync::Arc;

use cropex_season::{
    COORD_TOLERANCE, CalendarLookup, CellComposition, Resolution, ResolveMode, resolve_window,
};
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::aggregate::{CellSeries, aggregate_cell};
use crate::config::ExtremesConfig;
use crate::cube::ClimateCube;
use crate::error::ExtremesError;
use crate::grid::{GridAxes, IndicatorGrid};

/// Options for [`run_batch`].
#[derive(Debug, Clone, Default)]
pub struct BatchOptions {
    threads: Option<usize>,
}

impl BatchOptions {
    /// Creates options that use rayon's global pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs the pass on a dedicated pool with `n` workers.
    pub fn with_threads(mut self, n: usize) -> Self {
        self.threads = Some(n);
        self
    }

    /// Dedicated worker count, if any.
    pub fn threads(&self) -> Option<usize> {
        self.threads
    }
}

/// A cell whose indicators could not be computed.
#[derive(Debug, Clone, PartialEq)]
pub struct CellFailure {
    /// Cell latitude.
    pub lat: f64,
    /// Cell longitude.
    pub lon: f64,
    /// Why the cell failed.
    pub reason: String,
}

/// Result of a grid-wide aggregation pass.
#[derive(Debug, Clone)]
pub struct BatchOutput {
    /// Axes shared by every grid.
    pub axes: Arc<GridAxes>,
    /// One grid per indicator of the configured variable.
    pub grids: Vec<IndicatorGrid>,
    /// Cells that failed resolution or aggregation.
    pub failures: Vec<CellFailure>,
    /// Number of cells whose columns were written.
    pub cells_computed: usize,
    /// Number of resolved windows flagged as ambiguous wrap unions.
    pub ambiguous_wraps: usize,
}

/// Computes every indicator grid for the given cells.
///
/// Cells growing none of the mode's crops are excluded. The output lat/lon
/// axes are the sorted unique coordinates of the remaining cells; the
/// season-year axis spans the record's calendar years, extended by one year
/// when any resolved window wraps.
///
/// Cells are aggregated in parallel; each worker owns its cell's column and
/// the columns are written into the grids after the pass. Per-cell failures
/// are collected, not propagated.
///
/// # Errors
///
/// Returns an error only for run-level problems: an invalid configuration,
/// invalid axes, or a worker pool that cannot be built.
pub fn run_batch<C>(
    cube: &ClimateCube,
    cells: &[CellComposition],
    mode: &ResolveMode,
    calendars: &C,
    config: &ExtremesConfig,
    options: &BatchOptions,
) -> Result<BatchOutput, ExtremesError>
where
    C: CalendarLookup + Sync + ?Sized,
{
    config.validate()?;

    let selected: Vec<&CellComposition> = cells
        .iter()
        .filter(|c| c.grows_any(mode.crops()))
        .collect();
    info!(
        cells = cells.len(),
        selected = selected.len(),
        variable = %config.variable(),
        "starting aggregation"
    );

    let mut failures = Vec::new();
    let mut resolved: Vec<(&CellComposition, Resolution)> = Vec::with_capacity(selected.len());
    for &cell in &selected {
        match resolve_window(cell, mode, calendars) {
            Ok(r) => {
                if r.ambiguous_wrap() {
                    debug!(lat = cell.lat(), lon = cell.lon(), "ambiguous wrap union");
                }
                resolved.push((cell, r));
            }
            Err(e) => failures.push(CellFailure {
                lat: cell.lat(),
                lon: cell.lon(),
                reason: e.to_string(),
            }),
        }
    }
    let ambiguous_wraps = resolved.iter().filter(|(_, r)| r.ambiguous_wrap()).count();

    let time = cube.time();
    let any_wrap = resolved.iter().any(|(_, r)| r.window().wraps());
    let last_season_year = time.last_year() + i32::from(any_wrap);
    let axes = Arc::new(GridAxes::new(
        time.first_year(),
        last_season_year,
        unique_sorted(selected.iter().map(|c| c.lat())),
        unique_sorted(selected.iter().map(|c| c.lon())),
    )?);

    let aggregate = |(cell, resolution): &(&CellComposition, Resolution)| {
        let fail = |reason: String| CellFailure {
            lat: cell.lat(),
            lon: cell.lon(),
            reason,
        };
        let (ci, cj) = cube
            .cell_index(cell.lat(), cell.lon())
            .ok_or_else(|| fail("cell not found in climate grid".to_string()))?;
        let values = cube.series(ci, cj);
        let series = aggregate_cell(time, &values, resolution.window(), config)
            .map_err(|e| fail(e.to_string()))?;
        Ok::<_, CellFailure>((cell.lat(), cell.lon(), series))
    };

    let results: Vec<Result<(f64, f64, CellSeries), CellFailure>> = match options.threads {
        Some(n) => rayon::ThreadPoolBuilder::new()
            .num_threads(n)
            .build()
            .map_err(|e| ExtremesError::ThreadPool {
                reason: e.to_string(),
            })?
            .install(|| resolved.par_iter().map(aggregate).collect()),
        None => resolved.par_iter().map(aggregate).collect(),
    };

    let mut grids: Vec<IndicatorGrid> = config
        .variable()
        .indicators()
        .iter()
        .map(|&ind| IndicatorGrid::allocate(ind, Arc::clone(&axes)))
        .collect();

    let mut cells_computed = 0;
    for result in results {
        let (lat, lon, series) = match result {
            Ok(ok) => ok,
            Err(failure) => {
                failures.push(failure);
                continue;
            }
        };
        let (Some(i), Some(j)) = (axes.lat_index(lat), axes.lon_index(lon)) else {
            failures.push(CellFailure {
                lat,
                lon,
                reason: "cell outside output axes".to_string(),
            });
            continue;
        };
        for grid in &mut grids {
            grid.set_column(i, j, &series)?;
        }
        cells_computed += 1;
    }

    for f in &failures {
        warn!(lat = f.lat, lon = f.lon, reason = %f.reason, "cell failed");
    }
    info!(
        computed = cells_computed,
        failed = failures.len(),
        ambiguous_wraps,
        years = axes.years().len(),
        "aggregation finished"
    );

    Ok(BatchOutput {
        axes,
        grids,
        failures,
        cells_computed,
        ambiguous_wraps,
    })
}

/// Sorted coordinates with near-duplicates collapsed.
fn unique_sorted(coords: impl Iterator<Item = f64>) -> Vec<f64> {
    let mut v: Vec<f64> = coords.collect();
    v.sort_by(f64::total_cmp);
    v.dedup_by(|a, b| (*a - *b).abs() <= COORD_TOLERANCE);
    v
}
