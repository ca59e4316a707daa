//! Flaskify - convert a mirrored static website into a Flask project skeleton.

mod classify;
mod cli;
mod logger;
mod mirror;
mod organize;
mod rewrite;
mod scaffold;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    logger::set_verbose(cli.verbose);

    match &cli.command {
        Commands::Convert { args } => cli::convert::run_convert(args),
        Commands::Scaffold { project } => cli::convert::run_scaffold(project),
    }
}
