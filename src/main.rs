use anyhow::{Context, Result};
use clap::Parser;
use contents_delegate::config::{load_config, ContentsConfig};
use contents_delegate::replay::{read_trace, Replay};
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use tracing::info;

/// Replay a recorded engine trace through the contents delegate
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON-lines trace of engine events
    trace: PathBuf,

    /// Optional TOML configuration file
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "contents_delegate=info,contents_replay=info".into()),
        )
        .init();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ContentsConfig::default(),
    }
    .with_env_overrides();

    let file = File::open(&cli.trace)
        .with_context(|| format!("Failed to open trace {}", cli.trace.display()))?;
    let steps = read_trace(BufReader::new(file))
        .with_context(|| format!("Failed to read trace {}", cli.trace.display()))?;

    info!(path = %cli.trace.display(), steps = steps.len(), "Replaying engine trace");

    let replay = Replay::new(&config);
    let summary = replay.run(&steps);

    let json = serde_json::to_string_pretty(&summary).context("Failed to serialize summary")?;
    info!("Replay summary:\n{}", json);

    Ok(())
}
