//! Shared loading of the crop-side inputs used by every command.

use anyhow::{Context, Result};
use tracing::info;

use cropex_io::{load_calendars, read_composition};
use cropex_season::{CellComposition, CropCalendars, ResolveMode};

use crate::config::CropexConfig;

/// Calendars for the mode's crops and the cropland cells growing any of them.
pub struct CropInputs {
    pub calendars: CropCalendars,
    pub cells: Vec<CellComposition>,
}

/// Loads calendars and the composition table for `mode`.
pub fn load_crop_inputs(config: &CropexConfig, mode: &ResolveMode) -> Result<CropInputs> {
    let template = &config.calendar.path_template;
    let calendars = load_calendars(template, mode.crops())
        .with_context(|| format!("failed to load crop calendars from template {template}"))?;

    let path = &config.composition.path;
    info!(path = %path.display(), "reading crop composition");
    let cells = read_composition(path)
        .with_context(|| format!("failed to read crop composition: {}", path.display()))?;
    let total = cells.len();
    let cells: Vec<CellComposition> = cells
        .into_iter()
        .filter(|c| c.grows_any(mode.crops()))
        .collect();
    info!(total, selected = cells.len(), "cropland cells selected");

    Ok(CropInputs { calendars, cells })
}
