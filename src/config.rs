use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Top-level cropex configuration.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CropexConfig {
    /// Daily climate input.
    pub climate: ClimateToml,

    /// Crop calendar files.
    pub calendar: CalendarToml,

    /// Crop composition table.
    pub composition: CompositionToml,

    /// Indicator scope and thresholds.
    #[serde(default)]
    pub indicators: IndicatorsToml,

    /// Output location.
    #[serde(default)]
    pub output: OutputToml,

    /// Execution settings.
    #[serde(default)]
    pub run: RunToml,
}

impl CropexConfig {
    /// Reads and parses a TOML configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let toml_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        toml::from_str(&toml_str)
            .with_context(|| format!("failed to parse TOML config: {}", path.display()))
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClimateToml {
    pub files: Vec<PathBuf>,
    #[serde(default = "default_variable")]
    pub variable: String,
    #[serde(default)]
    pub var_name: Option<String>,
    #[serde(default = "default_time_var")]
    pub time_var: String,
}

fn default_variable() -> String {
    "precipitation".to_string()
}

fn default_time_var() -> String {
    "time".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CalendarToml {
    pub path_template: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompositionToml {
    pub path: PathBuf,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IndicatorsToml {
    #[serde(default = "default_scope")]
    pub scope: String,
    #[serde(default = "default_crops")]
    pub crops: Vec<String>,
    #[serde(default = "default_high_percentile")]
    pub high_percentile: f64,
    #[serde(default = "default_low_percentile")]
    pub low_percentile: f64,
}

impl Default for IndicatorsToml {
    fn default() -> Self {
        Self {
            scope: default_scope(),
            crops: default_crops(),
            high_percentile: default_high_percentile(),
            low_percentile: default_low_percentile(),
        }
    }
}

fn default_scope() -> String {
    "aggregate".to_string()
}

fn default_crops() -> Vec<String> {
    ["mai", "ri1", "ri2", "soy", "swh", "wwh"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_high_percentile() -> f64 {
    0.95
}

fn default_low_percentile() -> f64 {
    0.05
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputToml {
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
}

impl Default for OutputToml {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("indicators")
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct RunToml {
    #[serde(default)]
    pub threads: Option<usize>,
}
