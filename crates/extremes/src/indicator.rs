//! Climate variables and the indicators derived from them.

use std::fmt;
use std::str::FromStr;

use crate::aggregate::SeasonStats;

/// The daily climate variable an indicator set is computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variable {
    /// Daily precipitation.
    Precipitation,
    /// Daily maximum near-surface air temperature.
    Temperature,
}

impl Variable {
    /// Default NetCDF variable name.
    pub fn default_var_name(self) -> &'static str {
        match self {
            Variable::Precipitation => "pr",
            Variable::Temperature => "tasmax",
        }
    }

    /// Indicators produced for this variable, in output order.
    pub fn indicators(self) -> &'static [Indicator] {
        match self {
            Variable::Precipitation => &[
                Indicator::FrequencyDry,
                Indicator::FrequencyWet,
                Indicator::TotalPrecipitation,
                Indicator::LongestDrySpell,
                Indicator::LongestWetSpell,
            ],
            Variable::Temperature => &[Indicator::FrequencyHot, Indicator::LongestHotSpell],
        }
    }

    /// `true` if any of this variable's indicators needs the low threshold.
    pub fn uses_low(self) -> bool {
        self.indicators().iter().any(|i| i.uses_low())
    }

    /// Lower-case name used in configuration files.
    pub fn name(self) -> &'static str {
        match self {
            Variable::Precipitation => "precipitation",
            Variable::Temperature => "temperature",
        }
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Variable {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "precipitation" | "pr" => Ok(Variable::Precipitation),
            "temperature" | "tasmax" => Ok(Variable::Temperature),
            other => Err(format!(
                "unknown variable '{other}' (expected precipitation or temperature)"
            )),
        }
    }
}

/// One annual growing-season indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Indicator {
    /// Frequency of days at or below the low threshold (FDD).
    FrequencyDry,
    /// Frequency of days at or above the high threshold (FWD).
    FrequencyWet,
    /// Season total precipitation (TPR).
    TotalPrecipitation,
    /// Longest run of days at or below the low threshold (LDS).
    LongestDrySpell,
    /// Longest run of days at or above the high threshold (LWS).
    LongestWetSpell,
    /// Frequency of days at or above the high temperature threshold (FHD).
    FrequencyHot,
    /// Longest run of days at or above the high temperature threshold (LHS).
    LongestHotSpell,
}

impl Indicator {
    /// Short code used for output variable and file names.
    pub fn code(self) -> &'static str {
        match self {
            Indicator::FrequencyDry => "FDD",
            Indicator::FrequencyWet => "FWD",
            Indicator::TotalPrecipitation => "TPR",
            Indicator::LongestDrySpell => "LDS",
            Indicator::LongestWetSpell => "LWS",
            Indicator::FrequencyHot => "FHD",
            Indicator::LongestHotSpell => "LHS",
        }
    }

    /// `true` for indicators counted against the low threshold.
    pub fn uses_low(self) -> bool {
        matches!(self, Indicator::FrequencyDry | Indicator::LongestDrySpell)
    }

    /// Human-readable description, written as the `long_name` attribute.
    pub fn long_name(self) -> &'static str {
        match self {
            Indicator::FrequencyDry => "frequency of dry days in the growing season",
            Indicator::FrequencyWet => "frequency of wet days in the growing season",
            Indicator::TotalPrecipitation => "total precipitation in the growing season",
            Indicator::LongestDrySpell => "longest dry spell in the growing season",
            Indicator::LongestWetSpell => "longest wet spell in the growing season",
            Indicator::FrequencyHot => "frequency of hot days in the growing season",
            Indicator::LongestHotSpell => "longest hot spell in the growing season",
        }
    }

    /// Units of the indicator. Totals carry the units of the input variable.
    pub fn units(self, input_units: &str) -> String {
        match self {
            Indicator::FrequencyDry | Indicator::FrequencyWet | Indicator::FrequencyHot => {
                "1".to_string()
            }
            Indicator::LongestDrySpell
            | Indicator::LongestWetSpell
            | Indicator::LongestHotSpell => "days".to_string(),
            Indicator::TotalPrecipitation => input_units.to_string(),
        }
    }

    /// Picks this indicator's value out of one season's statistics.
    pub fn extract(self, stats: &SeasonStats) -> f64 {
        match self {
            Indicator::FrequencyDry => stats.frequency_low,
            Indicator::FrequencyWet | Indicator::FrequencyHot => stats.frequency_high,
            Indicator::TotalPrecipitation => stats.total,
            Indicator::LongestDrySpell => stats.longest_low_run as f64,
            Indicator::LongestWetSpell | Indicator::LongestHotSpell => {
                stats.longest_high_run as f64
            }
        }
    }
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
