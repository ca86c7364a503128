//! Compute command: read inputs, aggregate indicators, write grids.

use anyhow::{Context, Result};
use tracing::{info, info_span, warn};

use cropex_extremes::run_batch;
use cropex_io::{grid_file_name, read_climate, write_grid, write_json_report};

use crate::cli::ComputeArgs;
use crate::config::CropexConfig;
use crate::convert;
use crate::inputs::load_crop_inputs;
use crate::report::{FailureEntry, RunReport, crop_codes};

const RUN_REPORT: &str = "run_report.json";

/// Run the indicator pipeline.
pub fn run(args: ComputeArgs) -> Result<()> {
    let _cmd = info_span!("compute").entered();

    // 1. Load config and build library configs
    let config = CropexConfig::load(&args.config)?;
    let mode = convert::build_resolve_mode(&config.indicators, args.crop.as_deref())?;
    let extremes_cfg = convert::build_extremes_config(&config.climate, &config.indicators)?;
    let reader_cfg = convert::build_reader_config(&config.climate)?;
    let options = convert::build_batch_options(&config.run, args.threads)?;
    let out_dir = args.output.unwrap_or_else(|| config.output.dir.clone());

    // 2. Read climate record
    info!(files = config.climate.files.len(), "reading climate record");
    let cube = read_climate(config.climate.files.as_slice(), &reader_cfg)
        .context("failed to read climate record")?;
    info!(
        days = cube.time().len(),
        first_year = cube.time().first_year(),
        last_year = cube.time().last_year(),
        n_lat = cube.lats().len(),
        n_lon = cube.lons().len(),
        "climate record loaded"
    );

    // 3. Read calendars and composition
    let inputs = load_crop_inputs(&config, &mode)?;

    // 4. Aggregate
    let output = run_batch(
        &cube,
        &inputs.cells,
        &mode,
        &inputs.calendars,
        &extremes_cfg,
        &options,
    )
    .context("indicator aggregation failed")?;
    if output.cells_computed == 0 {
        warn!("no cell produced indicators");
    }

    // 5. Write grids
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("failed to create output directory: {}", out_dir.display()))?;
    let write_opts = convert::build_write_options(&mode, cube.units());
    let crop = convert::output_crop(&mode);
    let mut files = Vec::with_capacity(output.grids.len());
    for grid in &output.grids {
        let name = grid_file_name(grid.indicator(), crop);
        let path = out_dir.join(&name);
        write_grid(&path, grid, &write_opts)
            .with_context(|| format!("failed to write grid: {}", path.display()))?;
        info!(
            path = %path.display(),
            valid = grid.valid_count(),
            "indicator grid written"
        );
        files.push(name);
    }

    // 6. Write run report
    let years = output.axes.years();
    let report = RunReport {
        variable: extremes_cfg.variable().name().to_string(),
        scope: convert::scope_label(&mode),
        crops: crop_codes(mode.crops()),
        high_percentile: extremes_cfg.high_percentile(),
        low_percentile: extremes_cfg
            .uses_low()
            .then(|| extremes_cfg.low_percentile()),
        first_year: years.first().copied().unwrap_or_default(),
        last_year: years.last().copied().unwrap_or_default(),
        n_lat: output.axes.lats().len(),
        n_lon: output.axes.lons().len(),
        cells_selected: inputs.cells.len(),
        cells_computed: output.cells_computed,
        ambiguous_wraps: output.ambiguous_wraps,
        files,
        failures: output.failures.iter().map(FailureEntry::from).collect(),
    };
    let report_path = out_dir.join(RUN_REPORT);
    write_json_report(&report_path, &report)
        .with_context(|| format!("failed to write run report: {}", report_path.display()))?;

    info!(
        computed = report.cells_computed,
        failed = report.failures.len(),
        dir = %out_dir.display(),
        "compute finished"
    );
    Ok(())
}
