//! End-to-end resolution through gridded calendars.

use cropex_calendar::SeasonWindow;
use cropex_season::{
    CalendarGrid, CellComposition, Crop, CropCalendars, LandUse, ResolveError, ResolveMode,
    resolve_window,
};

const LATS: [f64; 2] = [-30.25, 45.25];
const LONS: [f64; 2] = [-60.25, 10.25];

/// Calendars for maize (both land uses) and winter wheat (rainfed only).
///
/// Cell (45.25, 10.25) carries the maize windows used in the reference
/// scenarios; cell (-30.25, -60.25) has a southern-hemisphere wrapping maize
/// season and no irrigated calendar.
fn calendars() -> CropCalendars {
    let nan = f64::NAN;
    let mut c = CropCalendars::new();
    c.insert(
        Crop::Maize,
        LandUse::Irrigated,
        CalendarGrid::new(
            LATS.to_vec(),
            LONS.to_vec(),
            vec![nan, 0.0, 0.0, 100.0],
            vec![nan, 0.0, 0.0, 200.0],
        )
        .unwrap(),
    );
    c.insert(
        Crop::Maize,
        LandUse::Rainfed,
        CalendarGrid::new(
            LATS.to_vec(),
            LONS.to_vec(),
            vec![330.0, 0.0, 0.0, 120.0],
            vec![90.0, 0.0, 0.0, 210.0],
        )
        .unwrap(),
    );
    c.insert(
        Crop::WinterWheat,
        LandUse::Rainfed,
        CalendarGrid::new(
            LATS.to_vec(),
            LONS.to_vec(),
            vec![0.0, 0.0, 0.0, 280.0],
            vec![0.0, 0.0, 0.0, 190.0],
        )
        .unwrap(),
    );
    c
}

fn w(start: u16, end: u16) -> SeasonWindow {
    SeasonWindow::from_days(start, end).unwrap()
}

#[test]
fn rainfed_only_maize_ignores_irrigated_calendar() {
    let cell = CellComposition::new(45.25, 10.25).with_crop(Crop::Maize, 0.0, 5.0);
    let r = resolve_window(&cell, &ResolveMode::Single(Crop::Maize), &calendars()).unwrap();
    assert_eq!(r.window(), w(120, 210));
}

#[test]
fn mixed_land_use_maize_takes_union() {
    let cell = CellComposition::new(45.25, 10.25).with_crop(Crop::Maize, 3.0, 5.0);
    let r = resolve_window(&cell, &ResolveMode::Single(Crop::Maize), &calendars()).unwrap();
    assert_eq!(r.window(), w(100, 210));
}

#[test]
fn southern_hemisphere_wrapping_window_survives_resolution() {
    let cell = CellComposition::new(-30.25, -60.25).with_crop(Crop::Maize, 0.0, 1.0);
    let r = resolve_window(&cell, &ResolveMode::Aggregate(Crop::ALL.to_vec()), &calendars())
        .unwrap();
    assert_eq!(r.window(), w(330, 90));
    assert!(r.window().wraps());
    assert!(!r.ambiguous_wrap());
}

#[test]
fn irrigated_maize_without_calendar_fails_the_cell() {
    let cell = CellComposition::new(-30.25, -60.25).with_crop(Crop::Maize, 1.0, 0.0);
    let err = resolve_window(&cell, &ResolveMode::Single(Crop::Maize), &calendars()).unwrap_err();
    assert_eq!(
        err,
        ResolveError::MissingCalendar {
            crop: Crop::Maize,
            land_use: LandUse::Irrigated,
            lat: -30.25,
            lon: -60.25,
        }
    );
}

#[test]
fn aggregate_union_with_winter_wheat() {
    let cell = CellComposition::new(45.25, 10.25)
        .with_crop(Crop::Maize, 3.0, 5.0)
        .with_crop(Crop::WinterWheat, 0.0, 2.0);
    let r = resolve_window(&cell, &ResolveMode::Aggregate(Crop::ALL.to_vec()), &calendars())
        .unwrap();
    // min(100, 280), max(210, 190): the wrapping wheat season is not
    // canonicalised and the union is flagged.
    assert_eq!(r.window(), w(100, 210));
    assert!(r.ambiguous_wrap());
    assert_eq!(r.crops(), &[Crop::Maize, Crop::WinterWheat]);
}
