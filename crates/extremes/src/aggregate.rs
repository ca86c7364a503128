//! Per-cell reduction of a daily series into season-year statistics.

use cropex_calendar::{CalendarKind, DayStamp, Doy, SeasonWindow, season_year};
use cropex_stats::{count_true, longest_run, nan_sum};

use crate::config::ExtremesConfig;
use crate::error::ExtremesError;
use crate::threshold::Thresholds;
use crate::time::TimeAxis;

/// Indicator inputs of one growing season.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeasonStats {
    /// Extreme days at or above the high threshold over the nominal season
    /// length.
    ///
    /// Usually in [0, 1]. A wrapping season whose tail includes day 366 of a
    /// leap year has one more day than its nominal length, so the value can
    /// exceed 1 when nearly every day is extreme.
    pub frequency_high: f64,
    /// Days at or below the low threshold over the nominal season length.
    /// Same range caveat as `frequency_high`; zero without a low threshold.
    pub frequency_low: f64,
    /// Sum of the season's non-missing values.
    pub total: f64,
    /// Longest run of consecutive days at or above the high threshold.
    pub longest_high_run: usize,
    /// Longest run of consecutive days at or below the low threshold; zero
    /// without a low threshold.
    pub longest_low_run: usize,
}

impl SeasonStats {
    /// Reduces one season's chronologically ordered values.
    ///
    /// Frequencies are divided by `total_days` (the nominal season length),
    /// not by the number of values present.
    pub fn reduce(values: &[f64], thresholds: &Thresholds, total_days: u16) -> Self {
        let high: Vec<bool> = values.iter().map(|&v| thresholds.is_high(v)).collect();
        let low: Vec<bool> = if thresholds.low().is_some() {
            values.iter().map(|&v| thresholds.is_low(v)).collect()
        } else {
            Vec::new()
        };
        let denom = f64::from(total_days);
        Self {
            frequency_high: count_true(&high) as f64 / denom,
            frequency_low: count_true(&low) as f64 / denom,
            total: nan_sum(values),
            longest_high_run: longest_run(&high),
            longest_low_run: longest_run(&low),
        }
    }
}

/// Season-year statistics of one grid cell.
///
/// Entry `i` belongs to season-year `first_season_year + i`. `None` marks a
/// season-year with no data: a season the record does not fully cover, or
/// one whose in-window values are all missing.
#[derive(Debug, Clone, PartialEq)]
pub struct CellSeries {
    window: SeasonWindow,
    thresholds: Thresholds,
    first_season_year: i32,
    entries: Vec<Option<SeasonStats>>,
}

impl CellSeries {
    /// The window the series was aggregated over.
    pub fn window(&self) -> SeasonWindow {
        self.window
    }

    /// Thresholds used for every season-year.
    pub fn thresholds(&self) -> Thresholds {
        self.thresholds
    }

    /// Nominal season length used as frequency denominator.
    pub fn total_days(&self) -> u16 {
        self.window.nominal_length()
    }

    /// First season-year covered.
    pub fn first_season_year(&self) -> i32 {
        self.first_season_year
    }

    /// Number of season-years covered, including no-data ones.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` if no season-year is covered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Statistics of a season-year, or `None` for no-data or out-of-range
    /// years.
    pub fn get(&self, year: i32) -> Option<&SeasonStats> {
        let offset = usize::try_from(year - self.first_season_year).ok()?;
        self.entries.get(offset)?.as_ref()
    }

    /// Iterates `(season_year, entry)` pairs in year order.
    pub fn iter(&self) -> impl Iterator<Item = (i32, Option<&SeasonStats>)> + '_ {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, e)| (self.first_season_year + i as i32, e.as_ref()))
    }
}

/// Aggregates one cell's daily series into season-year statistics.
///
/// Thresholds are pooled over every in-window day of the record first; then
/// each season-year's in-window days are reduced in chronological order.
///
/// Single-year windows (`start <= end`) yield season-years
/// `first_year..=last_year` of the record. Wrapping windows attribute the
/// tail of year `Y - 1` and the head of year `Y` to season-year `Y`, cover
/// `first_year..=last_year + 1`, and mark the two boundary season-years as
/// no-data.
///
/// A season-year is also no-data when the record starts after its first
/// in-window day or ends before its last one, or when none of its in-window
/// values is present.
///
/// # Errors
///
/// Returns an error if `config` is invalid, `values` does not match `time`,
/// or no in-window value is present ([`ExtremesError::NoThreshold`]).
pub fn aggregate_cell(
    time: &TimeAxis,
    values: &[f64],
    window: SeasonWindow,
    config: &ExtremesConfig,
) -> Result<CellSeries, ExtremesError> {
    config.validate()?;
    let thresholds = Thresholds::from_record(time, values, window, config)?;

    let first_year = time.first_year();
    let last_year = time.last_year();
    let wraps = window.wraps();
    let last_season_year = if wraps { last_year + 1 } else { last_year };
    let n_years = (last_season_year - first_year + 1) as usize;

    let mut buckets: Vec<Vec<f64>> = vec![Vec::new(); n_years];
    for (stamp, &value) in time.stamps().iter().zip(values) {
        if !window.contains(stamp.doy()) {
            continue;
        }
        let offset = (season_year(*stamp, window) - first_year) as usize;
        buckets[offset].push(value);
    }

    let total_days = window.nominal_length();
    let entries = buckets
        .iter()
        .enumerate()
        .map(|(i, season)| {
            let year = first_year + i as i32;
            let boundary = wraps && (year == first_year || year == last_season_year);
            let covered = season_span(window, year, time.kind())
                .is_some_and(|(first, last)| time.covers(first, last));
            let observed = season.iter().any(|v| !v.is_nan());
            (!boundary && covered && observed)
                .then(|| SeasonStats::reduce(season, &thresholds, total_days))
        })
        .collect();

    Ok(CellSeries {
        window,
        thresholds,
        first_season_year: first_year,
        entries,
    })
}

/// First and last in-window day of season-year `year`, or `None` if the
/// calendar has no in-window day for it.
fn season_span(
    window: SeasonWindow,
    year: i32,
    kind: CalendarKind,
) -> Option<(DayStamp, DayStamp)> {
    let start = window.start();
    let last_doy = window.end().get().min(kind.days_in_year(year));
    let last = DayStamp::new(year, Doy::new(last_doy).ok()?);
    let first = if !window.wraps() {
        if start.get() > kind.days_in_year(year) {
            return None;
        }
        DayStamp::new(year, start)
    } else if start.get() <= kind.days_in_year(year - 1) {
        DayStamp::new(year - 1, start)
    } else {
        // Tail is empty: day 366 after a common year.
        DayStamp::new(year, Doy::new(1).ok()?)
    };
    Some((first, last))
}
