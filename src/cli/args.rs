//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Flaskify website-to-Flask converter CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Enable verbose output for debugging
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Mirror a website and convert it into a Flask project
    #[command(visible_alias = "c")]
    Convert {
        #[command(flatten)]
        args: ConvertArgs,
    },

    /// Regenerate app.py and requirements.txt for an existing project
    #[command(visible_alias = "s")]
    Scaffold {
        /// Project directory containing a templates/ tree
        #[arg(value_hint = clap::ValueHint::DirPath)]
        project: PathBuf,
    },
}

/// Convert command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct ConvertArgs {
    /// Source website URL. Prompted for interactively when omitted.
    #[arg(value_hint = clap::ValueHint::Url)]
    pub url: Option<String>,

    /// Destination project directory name
    #[arg(short, long)]
    pub name: Option<String>,

    /// Convert an existing mirrored tree instead of downloading
    #[arg(long, value_hint = clap::ValueHint::DirPath)]
    pub mirror_dir: Option<PathBuf>,

    /// Mirror subprocess timeout in seconds (0 disables the timeout)
    #[arg(long, default_value_t = 600)]
    pub mirror_timeout: u64,
}
