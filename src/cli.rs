use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Growing-season climate-extreme indicators for cropland grid cells.
#[derive(Parser)]
#[command(
    name = "cropex",
    version,
    about = "Growing-season climate-extreme indicators"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Compute indicator grids and write them to NetCDF.
    Compute(ComputeArgs),
    /// Resolve growing-season windows only and write them to JSON.
    Windows(WindowsArgs),
}

/// Arguments for the `compute` subcommand.
#[derive(clap::Args)]
pub struct ComputeArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "cropex.toml")]
    pub config: PathBuf,

    /// Override output directory from config.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Compute for a single crop code instead of the configured scope.
    #[arg(long)]
    pub crop: Option<String>,

    /// Override worker thread count from config.
    #[arg(long)]
    pub threads: Option<usize>,
}

/// Arguments for the `windows` subcommand.
#[derive(clap::Args)]
pub struct WindowsArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "cropex.toml")]
    pub config: PathBuf,

    /// Output JSON path (defaults to `windows.json` in the output directory).
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_compute_overrides() {
        let cli = Cli::try_parse_from([
            "cropex", "-vv", "compute", "-c", "run.toml", "--crop", "wwh", "--threads", "4",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Command::Compute(args) => {
                assert_eq!(args.config, PathBuf::from("run.toml"));
                assert_eq!(args.crop.as_deref(), Some("wwh"));
                assert_eq!(args.threads, Some(4));
                assert!(args.output.is_none());
            }
            Command::Windows(_) => panic!("expected compute"),
        }
    }

    #[test]
    fn windows_defaults_config_path() {
        let cli = Cli::try_parse_from(["cropex", "windows"]).unwrap();
        match cli.command {
            Command::Windows(args) => {
                assert_eq!(args.config, PathBuf::from("cropex.toml"));
                assert!(args.output.is_none());
            }
            Command::Compute(_) => panic!("expected windows"),
        }
    }
}
