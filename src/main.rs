mod cli;
mod compute;
mod config;
mod convert;
mod inputs;
mod logging;
mod report;
mod windows_cmd;

use std::process;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Compute(args) => compute::run(args),
        Command::Windows(args) => windows_cmd::run(args),
    }
}
