//! Thin command surface over the blocker engine.

mod cli;

use anyhow::{Context, Result};
use blocker::{Blocker, EngineConfig};
use clap::Parser;
use cli::{Cli, Commands};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Parse arguments, load configuration, and dispatch the selected command.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config_path = cli.config.unwrap_or_else(default_config_path);
    let mut config = EngineConfig::load(&config_path)
        .with_context(|| format!("loading config from {}", config_path.display()))?;
    if config.snapshot_path.is_relative() {
        config.snapshot_path = default_data_dir().join(&config.snapshot_path);
    }

    let engine = Blocker::new(&config);
    match cli.command {
        Commands::Lookup(args) => {
            let values: Vec<&str> = args.values.iter().map(String::as_str).collect();
            let report = engine
                .lookup(&values, args.text_list, args.dns_list)
                .await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::Sync(args) => {
            let state = engine.sync_text_lists(args.force).await?;
            println!(
                "synced {} sources (updated {})",
                state.data.len(),
                state.updated.to_rfc3339()
            );
        }
    }
    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("", "", "blocker")
}

fn default_config_path() -> PathBuf {
    project_dirs().map_or_else(
        || PathBuf::from("blocker.yml"),
        |dirs| dirs.config_dir().join("blocker.yml"),
    )
}

fn default_data_dir() -> PathBuf {
    project_dirs().map_or_else(|| PathBuf::from("."), |dirs| dirs.data_dir().to_path_buf())
}
