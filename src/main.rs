use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use noisegate_core::{check_stable_system, check_upgrade, Config, EventInterval};

#[derive(Parser)]
#[command(
    name = "noisegate",
    about = "noisegate — decides whether repeated cluster events should fail a CI run"
)]
struct Cli {
    /// Event log to evaluate: a JSON array of {message, from, to} records.
    events: PathBuf,

    /// Platform the run executed on (e.g. AWS, GCP). Scopes known problems.
    #[arg(long, default_value = "")]
    platform: String,

    /// Topology mode of the run (e.g. SingleReplica, HighlyAvailable).
    #[arg(long, default_value = "")]
    topology: String,

    /// Evaluate as an upgrade run: the upgrade allow-list applies and
    /// failures are reported as flakes.
    #[arg(long)]
    upgrade: bool,

    /// Read configuration from this file instead of ~/.config/noisegate/config.toml.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Emit verdicts as JSON instead of text.
    #[arg(long)]
    json: bool,

    /// Write debug logs to stderr (RUST_LOG overrides the filter).
    #[arg(long)]
    debug: bool,
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    if cli.debug {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
    }

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let raw = std::fs::read_to_string(&cli.events)?;
    let events: Vec<EventInterval> = serde_json::from_str(&raw)?;
    tracing::debug!(count = events.len(), "loaded event log");

    let verdicts = if cli.upgrade {
        check_upgrade(&config.evaluator, &cli.platform, &cli.topology, &events)?
    } else {
        check_stable_system(&config.evaluator, &cli.platform, &cli.topology, &events)?
    };

    if cli.json {
        println!("{}", noisegate::report::render_json(&verdicts)?);
    } else {
        print!("{}", noisegate::report::render_text(&verdicts));
    }

    if noisegate::report::all_passed(&verdicts) {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
