//! Windows command: resolve growing-season windows without climate data.

use anyhow::{Context, Result};
use tracing::{info, info_span, warn};

use cropex_io::write_json_report;
use cropex_season::{CellComposition, CropCalendars, ResolveMode, resolve_window};

use crate::cli::WindowsArgs;
use crate::config::CropexConfig;
use crate::convert;
use crate::inputs::load_crop_inputs;
use crate::report::{FailureEntry, WindowEntry, WindowReport, crop_codes};

const WINDOWS_REPORT: &str = "windows.json";

/// Resolve windows for every cropland cell and write them to JSON.
pub fn run(args: WindowsArgs) -> Result<()> {
    let _cmd = info_span!("windows").entered();

    let config = CropexConfig::load(&args.config)?;
    let mode = convert::build_resolve_mode(&config.indicators, None)?;
    let inputs = load_crop_inputs(&config, &mode)?;

    let report = resolve_all(&inputs.cells, &mode, &inputs.calendars);
    if !report.failures.is_empty() {
        warn!(count = report.failures.len(), "cells without a resolved window");
    }

    let path = match args.output {
        Some(p) => p,
        None => {
            std::fs::create_dir_all(&config.output.dir).with_context(|| {
                format!(
                    "failed to create output directory: {}",
                    config.output.dir.display()
                )
            })?;
            config.output.dir.join(WINDOWS_REPORT)
        }
    };
    write_json_report(&path, &report)
        .with_context(|| format!("failed to write windows report: {}", path.display()))?;
    info!(
        path = %path.display(),
        windows = report.windows.len(),
        "windows written"
    );
    Ok(())
}

fn resolve_all(
    cells: &[CellComposition],
    mode: &ResolveMode,
    calendars: &CropCalendars,
) -> WindowReport {
    let mut windows = Vec::with_capacity(cells.len());
    let mut failures = Vec::new();
    for cell in cells {
        match resolve_window(cell, mode, calendars) {
            Ok(res) => {
                let window = res.window();
                windows.push(WindowEntry {
                    lat: cell.lat(),
                    lon: cell.lon(),
                    start_day: window.start().get(),
                    end_day: window.end().get(),
                    wraps: window.wraps(),
                    crops: crop_codes(res.crops()),
                    ambiguous_wrap: res.ambiguous_wrap(),
                });
            }
            Err(e) => failures.push(FailureEntry {
                lat: cell.lat(),
                lon: cell.lon(),
                reason: e.to_string(),
            }),
        }
    }
    WindowReport {
        scope: convert::scope_label(mode),
        windows,
        failures,
    }
}
