// draftgrade entry point.
//
// Report flow:
// 1. Initialize tracing (stderr, so stdout stays a clean report)
// 2. Load config, apply command-line overrides
// 3. Load player stats and draft picks
// 4. Build the position index and replay the draft
// 5. Write the report

mod cli;

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use tracing::info;

use cli::{Cli, Command, ReportArgs};
use draftgrade_core::config::{self, Config};
use draftgrade_core::index::PositionIndex;
use draftgrade_core::input::{clean, picks, players};
use draftgrade_core::{replay, report};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    match cli.command {
        Command::Report(args) => run_report(args),
        Command::Clean { files } => run_clean(&files),
    }
}

fn run_report(args: ReportArgs) -> anyhow::Result<()> {
    let config = load_settings(&args.base_dir).context("failed to load configuration")?;
    let order = &config.positions.canonical;

    let players_path = args
        .players
        .clone()
        .unwrap_or_else(|| args.base_dir.join(&config.data_paths.players));
    let draft_path = args
        .draft
        .clone()
        .unwrap_or_else(|| args.base_dir.join(&config.data_paths.draft));

    let players = players::load_players(&players_path, order)
        .with_context(|| format!("failed to load player stats from {}", players_path.display()))?;
    let picks = picks::load_picks(&draft_path, order)
        .with_context(|| format!("failed to load draft results from {}", draft_path.display()))?;

    let index = PositionIndex::build(players, order);
    info!(
        "Built position index: {} players across {} positions",
        index.len(),
        index.positions().len()
    );

    let result = replay::replay(index, &picks);

    let mut options = config.report_options();
    if let Some(format) = args.format {
        options.format = format.into();
    }
    if args.no_summary {
        options.summary = false;
    }

    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            let mut out = BufWriter::new(file);
            report::write_report(&mut out, &result, &options)?;
            info!("Report written to {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            report::write_report(&mut out, &result, &options)?;
            out.flush()?;
        }
    }

    Ok(())
}

fn run_clean(files: &[PathBuf]) -> anyhow::Result<()> {
    for path in files {
        let removed = clean::clean_file_in_place(path)
            .with_context(|| format!("failed to clean {}", path.display()))?;
        println!("{}: removed {} NUL bytes", path.display(), removed);
    }
    Ok(())
}

/// Read `config/draftgrade.toml` under `base_dir`, seeding it from
/// `defaults/` when present. Built-in defaults apply when neither exists.
fn load_settings(base_dir: &Path) -> anyhow::Result<Config> {
    if !base_dir.join("defaults").exists() && !base_dir.join("config").exists() {
        info!("No config directory in {}, using built-in defaults", base_dir.display());
        return Ok(Config::default());
    }

    for copied in config::ensure_config_files(base_dir)? {
        info!("Initialized {} from defaults", copied.display());
    }
    let config = config::load_config_from(base_dir)?;
    info!(
        "Config loaded: players={}, draft={}, positions={:?}",
        config.data_paths.players,
        config.data_paths.draft,
        config.positions.canonical.tags()
    );
    Ok(config)
}

/// Initialize tracing to stderr.
fn init_tracing(verbose: bool) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let default_filter = if verbose {
        "draftgrade_core=debug,draftgrade_cli=debug,warn"
    } else {
        "draftgrade_core=info,draftgrade_cli=info,warn"
    };

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(io::stderr)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
