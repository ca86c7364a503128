//! JSON report records written by the commands.

use serde::Serialize;

use cropex_extremes::CellFailure;
use cropex_season::Crop;

/// One cell that could not be processed.
#[derive(Debug, Clone, Serialize)]
pub struct FailureEntry {
    pub lat: f64,
    pub lon: f64,
    pub reason: String,
}

impl From<&CellFailure> for FailureEntry {
    fn from(f: &CellFailure) -> Self {
        Self {
            lat: f.lat,
            lon: f.lon,
            reason: f.reason.clone(),
        }
    }
}

/// Summary of a `compute` run.
#[derive(Debug, Serialize)]
pub struct RunReport {
    pub variable: String,
    pub scope: String,
    pub crops: Vec<String>,
    pub high_percentile: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub low_percentile: Option<f64>,
    pub first_year: i32,
    pub last_year: i32,
    pub n_lat: usize,
    pub n_lon: usize,
    pub cells_selected: usize,
    pub cells_computed: usize,
    pub ambiguous_wraps: usize,
    pub files: Vec<String>,
    pub failures: Vec<FailureEntry>,
}

/// A resolved window at one cell.
#[derive(Debug, Serialize)]
pub struct WindowEntry {
    pub lat: f64,
    pub lon: f64,
    pub start_day: u16,
    pub end_day: u16,
    pub wraps: bool,
    pub crops: Vec<String>,
    pub ambiguous_wrap: bool,
}

/// Output of the `windows` command.
#[derive(Debug, Serialize)]
pub struct WindowReport {
    pub scope: String,
    pub windows: Vec<WindowEntry>,
    pub failures: Vec<FailureEntry>,
}

/// Crop codes as report strings.
pub fn crop_codes(crops: &[Crop]) -> Vec<String> {
    crops.iter().map(|c| c.code().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_entry_copies_cell_failure() {
        let failure = CellFailure {
            lat: 12.25,
            lon: -3.75,
            reason: "cell not found in climate grid".into(),
        };
        let entry = FailureEntry::from(&failure);
        assert_eq!(entry.lat, 12.25);
        assert_eq!(entry.lon, -3.75);
        assert_eq!(entry.reason, failure.reason);
    }

    #[test]
    fn crop_codes_in_order() {
        assert_eq!(
            crop_codes(&[Crop::WinterWheat, Crop::Maize]),
            vec!["wwh", "mai"]
        );
    }
}
