//! Pure conversion functions: TOML config structs -> crate API config types.

use anyhow::{Result, anyhow, bail};

use cropex_extremes::{BatchOptions, ExtremesConfig, Variable};
use cropex_io::{ClimateReaderConfig, GridWriteOptions};
use cropex_season::{Crop, ResolveMode};

use crate::config::{ClimateToml, IndicatorsToml, RunToml};

/// Scope value selecting the union over all configured crops.
const AGGREGATE_SCOPE: &str = "aggregate";

/// Parses a climate variable name.
pub fn parse_variable(s: &str) -> Result<Variable> {
    s.parse::<Variable>().map_err(|e| anyhow!(e))
}

/// Parses a list of crop codes, rejecting empty lists and duplicates.
pub fn parse_crops(codes: &[String]) -> Result<Vec<Crop>> {
    if codes.is_empty() {
        bail!("[indicators].crops must list at least one crop");
    }
    let mut crops = Vec::with_capacity(codes.len());
    for code in codes {
        let crop: Crop = code.parse()?;
        if crops.contains(&crop) {
            bail!("crop {crop} listed more than once in [indicators].crops");
        }
        crops.push(crop);
    }
    Ok(crops)
}

/// Builds the resolution mode from the indicator scope.
///
/// A `crop_override` (from `--crop`) takes precedence over `scope`.
pub fn build_resolve_mode(
    indicators: &IndicatorsToml,
    crop_override: Option<&str>,
) -> Result<ResolveMode> {
    let scope = crop_override.unwrap_or(&indicators.scope);
    if scope.eq_ignore_ascii_case(AGGREGATE_SCOPE) {
        return Ok(ResolveMode::Aggregate(parse_crops(&indicators.crops)?));
    }
    let crop: Crop = scope.parse()?;
    Ok(ResolveMode::Single(crop))
}

/// Builds an [`ExtremesConfig`] from the climate and indicator sections.
pub fn build_extremes_config(
    climate: &ClimateToml,
    indicators: &IndicatorsToml,
) -> Result<ExtremesConfig> {
    let config = ExtremesConfig::new(parse_variable(&climate.variable)?)
        .with_high_percentile(indicators.high_percentile)
        .with_low_percentile(indicators.low_percentile);
    config.validate()?;
    Ok(config)
}

/// Builds a [`ClimateReaderConfig`]; the variable name defaults per variable.
pub fn build_reader_config(climate: &ClimateToml) -> Result<ClimateReaderConfig> {
    let variable = parse_variable(&climate.variable)?;
    let var_name = climate
        .var_name
        .clone()
        .unwrap_or_else(|| variable.default_var_name().to_string());
    let config = ClimateReaderConfig::new(var_name).with_time_var(&climate.time_var);
    config.validate()?;
    Ok(config)
}

/// Builds [`BatchOptions`]; `threads_override` (from `--threads`) wins.
pub fn build_batch_options(run: &RunToml, threads_override: Option<usize>) -> Result<BatchOptions> {
    match threads_override.or(run.threads) {
        Some(0) => bail!("thread count must be at least 1"),
        Some(n) => Ok(BatchOptions::new().with_threads(n)),
        None => Ok(BatchOptions::new()),
    }
}

/// Crop recorded in output file names and attributes, `None` for the aggregate.
pub fn output_crop(mode: &ResolveMode) -> Option<Crop> {
    match mode {
        ResolveMode::Single(crop) => Some(*crop),
        ResolveMode::Aggregate(_) => None,
    }
}

/// Scope name recorded in reports: `aggregate` or the crop code.
pub fn scope_label(mode: &ResolveMode) -> String {
    output_crop(mode).map_or_else(|| AGGREGATE_SCOPE.to_string(), |c| c.code().to_string())
}

/// Builds [`GridWriteOptions`] for a run.
pub fn build_write_options(mode: &ResolveMode, input_units: &str) -> GridWriteOptions {
    GridWriteOptions::new()
        .with_input_units(input_units)
        .with_crop(output_crop(mode))
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn climate(variable: &str, var_name: Option<&str>) -> ClimateToml {
        ClimateToml {
            files: vec![PathBuf::from("pr.nc")],
            variable: variable.to_string(),
            var_name: var_name.map(str::to_string),
            time_var: "time".to_string(),
        }
    }

    #[test]
    fn aggregate_scope_uses_listed_crops() {
        let indicators = IndicatorsToml {
            crops: vec!["mai".into(), "wwh".into()],
            ..IndicatorsToml::default()
        };
        let mode = build_resolve_mode(&indicators, None).unwrap();
        assert_eq!(
            mode,
            ResolveMode::Aggregate(vec![Crop::Maize, Crop::WinterWheat])
        );
        assert_eq!(output_crop(&mode), None);
        assert_eq!(scope_label(&mode), "aggregate");
    }

    #[test]
    fn crop_scope_and_override() {
        let indicators = IndicatorsToml {
            scope: "soy".into(),
            ..IndicatorsToml::default()
        };
        assert_eq!(
            build_resolve_mode(&indicators, None).unwrap(),
            ResolveMode::Single(Crop::Soybean)
        );
        let mode = build_resolve_mode(&indicators, Some("ri2")).unwrap();
        assert_eq!(mode, ResolveMode::Single(Crop::Rice2));
        assert_eq!(output_crop(&mode), Some(Crop::Rice2));
        assert_eq!(scope_label(&mode), "ri2");
    }

    #[test]
    fn unknown_scope_rejected() {
        let indicators = IndicatorsToml {
            scope: "barley".into(),
            ..IndicatorsToml::default()
        };
        assert!(build_resolve_mode(&indicators, None).is_err());
    }

    #[test]
    fn crop_list_rejects_empty_and_duplicates() {
        assert!(parse_crops(&[]).is_err());
        assert!(parse_crops(&["mai".into(), "mai".into()]).is_err());
        assert_eq!(parse_crops(&["swh".into()]).unwrap(), vec![Crop::SpringWheat]);
    }

    #[test]
    fn extremes_config_validates_percentiles() {
        let good = IndicatorsToml::default();
        let cfg = build_extremes_config(&climate("temperature", None), &good).unwrap();
        assert_eq!(cfg.variable(), Variable::Temperature);
        assert_eq!(cfg.high_percentile(), 0.95);

        let swapped = IndicatorsToml {
            high_percentile: 0.05,
            low_percentile: 0.95,
            ..IndicatorsToml::default()
        };
        assert!(build_extremes_config(&climate("precipitation", None), &swapped).is_err());
        assert!(build_extremes_config(&climate("wind", None), &good).is_err());
    }

    #[test]
    fn reader_config_defaults_var_name() {
        let cfg = build_reader_config(&climate("temperature", None)).unwrap();
        assert_eq!(cfg.var_name(), "tasmax");
        let cfg = build_reader_config(&climate("precipitation", Some("precip"))).unwrap();
        assert_eq!(cfg.var_name(), "precip");
    }

    #[test]
    fn batch_options_threads() {
        let run = RunToml { threads: Some(8) };
        assert_eq!(build_batch_options(&run, None).unwrap().threads(), Some(8));
        assert_eq!(build_batch_options(&run, Some(2)).unwrap().threads(), Some(2));
        assert_eq!(
            build_batch_options(&RunToml::default(), None).unwrap().threads(),
            None
        );
        assert!(build_batch_options(&run, Some(0)).is_err());
    }
}
