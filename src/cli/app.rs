use anyhow::Result;
use clap::Parser;
use tracing::{error, info, warn};

use super::commands::dispatch;
use super::env::CliArgs;
use super::runtime::init_logging;

pub async fn run() -> Result<()> {
    let cli = CliArgs::parse();

    let loaded = crate::config::load(cli.config.as_deref())?;
    let level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| loaded.config.log.level.clone());
    init_logging(&level, cli.json_logs || loaded.config.log.json)?;

    info!("Starting rosterguard v{}", env!("CARGO_PKG_VERSION"));
    match &loaded.path {
        Some(path) => info!(path = %path.display(), "Loaded configuration"),
        None => warn!("No configuration file found, using defaults"),
    }

    match dispatch(&cli.command, loaded.config).await {
        Ok(()) => Ok(()),
        Err(err) => {
            error!("Command failed: {:#}", err);
            Err(err)
        }
    }
}
