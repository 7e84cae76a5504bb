//! gazekit - Dwell-based gaze interaction
//!
//! Headless demo: sweeps a camera across a row of panels and logs what the
//! gaze interactor reports each tick.

mod config;
mod scene;

use anyhow::Result;
use config::GazeConfig;
use std::{env, path::PathBuf};
use tracing::info;

const DEFAULT_TICKS: u64 = 240;

fn main() -> Result<()> {
    // Initialize tracing with INFO level by default (can be overridden via RUST_LOG env var)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Starting gazekit v{}", env!("CARGO_PKG_VERSION"));

    let cli = CliOptions::parse(env::args().skip(1));
    let config = match cli.config_path.as_deref() {
        Some(path) => GazeConfig::load_from_path(path),
        None => GazeConfig::load(),
    };

    if let Some(path) = cli.save_config_path.as_deref() {
        config.save_to_path(path)?;
        info!(path = %path.display(), "Saved effective gaze config");
    }

    let ticks = cli.ticks.unwrap_or(DEFAULT_TICKS);
    let seed = cli.seed.unwrap_or(0);
    let summary = scene::run_demo(&config, ticks, seed)?;

    let mut outcomes: Vec<_> = summary.outcomes.iter().collect();
    outcomes.sort_by_key(|(outcome, _)| format!("{outcome:?}"));
    for (outcome, count) in outcomes {
        info!(?outcome, count, "tick outcomes");
    }

    if let Some(path) = cli.events_path.as_deref() {
        summary.write_events(path)?;
        info!(
            path = %path.display(),
            events = summary.events.len(),
            "Wrote event log"
        );
    }

    info!(ticks = summary.ticks, "Demo finished");
    Ok(())
}

#[derive(Debug, Default)]
struct CliOptions {
    config_path: Option<PathBuf>,
    ticks: Option<u64>,
    seed: Option<u64>,
    events_path: Option<PathBuf>,
    save_config_path: Option<PathBuf>,
}

impl CliOptions {
    fn parse<I: Iterator<Item = String>>(mut args: I) -> Self {
        let mut opts = CliOptions::default();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" => {
                    if let Some(path) = args.next() {
                        opts.config_path = Some(PathBuf::from(path));
                    } else {
                        tracing::error!("--config requires a file path");
                    }
                }
                "--ticks" => {
                    if let Some(raw) = args.next() {
                        match raw.parse::<u64>() {
                            Ok(value) => opts.ticks = Some(value),
                            Err(err) => {
                                tracing::error!(%err, value = %raw, "--ticks must be an integer");
                            }
                        }
                    } else {
                        tracing::error!("--ticks requires an integer");
                    }
                }
                "--seed" => {
                    if let Some(raw) = args.next() {
                        match raw.parse::<u64>() {
                            Ok(value) => opts.seed = Some(value),
                            Err(err) => {
                                tracing::error!(%err, value = %raw, "--seed must be an integer");
                            }
                        }
                    } else {
                        tracing::error!("--seed requires an integer");
                    }
                }
                "--events" => {
                    if let Some(path) = args.next() {
                        opts.events_path = Some(PathBuf::from(path));
                    } else {
                        tracing::error!("--events requires a file path");
                    }
                }
                "--save-config" => {
                    if let Some(path) = args.next() {
                        opts.save_config_path = Some(PathBuf::from(path));
                    } else {
                        tracing::error!("--save-config requires a file path");
                    }
                }
                other => {
                    tracing::warn!(arg = %other, "Ignoring unknown argument");
                }
            }
        }

        opts
    }
}
