pub mod cli;
pub mod core;
pub mod feed;
pub mod providers;
pub mod server;

use crate::cli::convert::Direction;
use crate::core::config::AppConfig;
use crate::providers::CnbProvider;
use anyhow::Result;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    Serve,
    Fetch { json: bool },
    Convert { amount: f64, code: String, reverse: bool },
}

/// Loads the config file (explicit path or default location) and applies
/// environment overrides.
pub fn load_config(config_path: Option<&str>) -> Result<AppConfig> {
    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    }
    .with_env_overrides()?;
    config.validate()?;
    debug!("Loaded config: {config:#?}");
    Ok(config)
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    let config = load_config(config_path)?;
    run_with_config(command, &config).await
}

pub async fn run_with_config(command: AppCommand, config: &AppConfig) -> Result<()> {
    let provider = CnbProvider::new(&config.provider)?;

    match command {
        AppCommand::Serve => server::serve(&config.server, Arc::new(provider)).await,
        AppCommand::Fetch { json } => cli::rates::run(&provider, json).await,
        AppCommand::Convert {
            amount,
            code,
            reverse,
        } => {
            let direction = if reverse {
                Direction::ToCzk
            } else {
                Direction::FromCzk
            };
            cli::convert::run(&provider, amount, &code, direction).await
        }
    }
}
