//! Growing-season window resolution.

use cropex_calendar::SeasonWindow;
use tracing::debug;

use crate::calendar::CalendarLookup;
use crate::composition::CellComposition;
use crate::crop::{Crop, LandUse};
use crate::error::ResolveError;

/// Which crops define a cell's growing season.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveMode {
    /// Union of the windows of every listed crop grown at the cell.
    Aggregate(Vec<Crop>),
    /// The window of one crop.
    Single(Crop),
}

impl ResolveMode {
    /// Crops this mode looks at.
    pub fn crops(&self) -> &[Crop] {
        match self {
            ResolveMode::Aggregate(crops) => crops,
            ResolveMode::Single(crop) => std::slice::from_ref(crop),
        }
    }
}

/// A resolved growing-season window and how it was obtained.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    window: SeasonWindow,
    crops: Vec<Crop>,
    ambiguous_wrap: bool,
}

impl Resolution {
    /// The resolved window.
    pub fn window(&self) -> SeasonWindow {
        self.window
    }

    /// Crops whose windows contributed, in resolution order.
    pub fn crops(&self) -> &[Crop] {
        &self.crops
    }

    /// `true` when a union was taken over at least one wrapping window.
    ///
    /// The min/max union does not canonicalise wrapping seasons, so the
    /// resulting window may not cover every component season.
    pub fn ambiguous_wrap(&self) -> bool {
        self.ambiguous_wrap
    }
}

/// Resolves one crop's window at a cell from its land-use areas.
///
/// - irrigated area only: the irrigated (`firr`) calendar;
/// - rainfed area only: the rainfed (`noirr`) calendar;
/// - both: the union `(min start, max end)` of the two calendars.
///
/// # Errors
///
/// Returns [`ResolveError::CropAbsent`] if the crop has no area at the cell,
/// or [`ResolveError::MissingCalendar`] if a calendar the cell needs is
/// undefined there.
pub fn resolve_crop<C: CalendarLookup + ?Sized>(
    cell: &CellComposition,
    crop: Crop,
    calendars: &C,
) -> Result<Resolution, ResolveError> {
    let areas = cell.areas(crop);
    let lookup = |land_use: LandUse| {
        calendars
            .window(crop, land_use, cell.lat(), cell.lon())
            .ok_or(ResolveError::MissingCalendar {
                crop,
                land_use,
                lat: cell.lat(),
                lon: cell.lon(),
            })
    };

    let (window, ambiguous_wrap) = match (areas.irrigated > 0.0, areas.rainfed > 0.0) {
        (true, false) => (lookup(LandUse::Irrigated)?, false),
        (false, true) => (lookup(LandUse::Rainfed)?, false),
        (true, true) => {
            let irrigated = lookup(LandUse::Irrigated)?;
            let rainfed = lookup(LandUse::Rainfed)?;
            (
                irrigated.widen(rainfed),
                irrigated.wraps() || rainfed.wraps(),
            )
        }
        (false, false) => {
            return Err(ResolveError::CropAbsent {
                crop,
                lat: cell.lat(),
                lon: cell.lon(),
            });
        }
    };

    Ok(Resolution {
        window,
        crops: vec![crop],
        ambiguous_wrap,
    })
}

/// Resolves a cell's growing-season window.
///
/// In [`ResolveMode::Aggregate`] every listed crop with area at the cell is
/// resolved with [`resolve_crop`] and the windows are widened into one
/// running `(min start, max end)` window. Crops with no area are skipped, and
/// so are crops whose calendar is missing as long as another crop resolves.
///
/// # Errors
///
/// - [`ResolveError::NoCropPresent`] if no listed crop is grown at the cell
///   (aggregate mode).
/// - The first per-crop error if no crop resolves (aggregate mode).
/// - Any [`resolve_crop`] error (single mode).
pub fn resolve_window<C: CalendarLookup + ?Sized>(
    cell: &CellComposition,
    mode: &ResolveMode,
    calendars: &C,
) -> Result<Resolution, ResolveError> {
    let crops = match mode {
        ResolveMode::Single(crop) => return resolve_crop(cell, *crop, calendars),
        ResolveMode::Aggregate(crops) => crops,
    };

    let mut merged: Option<Resolution> = None;
    let mut first_error: Option<ResolveError> = None;

    for &crop in crops {
        if !cell.areas(crop).is_present() {
            continue;
        }
        let resolved = match resolve_crop(cell, crop, calendars) {
            Ok(r) => r,
            Err(e) => {
                debug!(lat = cell.lat(), lon = cell.lon(), %crop, error = %e, "skipping crop");
                first_error.get_or_insert(e);
                continue;
            }
        };

        merged = Some(match merged {
            None => resolved,
            Some(mut acc) => {
                acc.ambiguous_wrap |= resolved.ambiguous_wrap
                    || acc.window.wraps()
                    || resolved.window.wraps();
                acc.window = acc.window.widen(resolved.window);
                acc.crops.push(crop);
                acc
            }
        });
    }

    match (merged, first_error) {
        (Some(resolution), _) => Ok(resolution),
        (None, Some(err)) => Err(err),
        (None, None) => Err(ResolveError::NoCropPresent {
            lat: cell.lat(),
            lon: cell.lon(),
        }),
    }
}
