// Command-line argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use draftgrade_core::report::OutputFormat;

/// Grade fantasy draft picks against the best player still available.
#[derive(Debug, Parser)]
#[clap(name = "draftgrade", version)]
pub struct Cli {
    /// Log at debug level (overridden by `RUST_LOG`).
    #[clap(long, short, global = true)]
    pub verbose: bool,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Replay the draft and print per-pick comparisons and manager totals.
    Report(ReportArgs),

    /// Strip NUL bytes from files in place.
    Clean {
        /// Files to rewrite.
        #[clap(required = true)]
        files: Vec<PathBuf>,
    },
}

#[derive(Debug, Args)]
pub struct ReportArgs {
    /// Directory holding `config/` and `defaults/`; relative data paths resolve against it.
    #[clap(long, default_value = ".")]
    pub base_dir: PathBuf,

    /// Player stats TSV (overrides `data_paths.players`).
    #[clap(long)]
    pub players: Option<PathBuf>,

    /// Draft results CSV (overrides `data_paths.draft`).
    #[clap(long)]
    pub draft: Option<PathBuf>,

    /// Output format (overrides `output.format`).
    #[clap(long, value_enum)]
    pub format: Option<FormatArg>,

    /// Leave out the manager summary.
    #[clap(long)]
    pub no_summary: bool,

    /// Write the report to a file instead of stdout.
    #[clap(long, short)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Text,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}
