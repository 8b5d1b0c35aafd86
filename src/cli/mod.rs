//! CLI module
//!
//! Subcommands:
//! - `serve`: run the HTTP API (default)
//! - `migrate`: apply the user schema migrations and exit

pub mod migrate;
pub mod serve;

use anyhow::Context;
use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::infrastructure::logging::init_logging;

/// Motivatr identity backend - account registration and credential verification
#[derive(Parser)]
#[command(name = "motivatr-auth")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API
    Serve,

    /// Apply or revert database migrations
    Migrate(migrate::MigrateArgs),
}

/// Load `.env`, read and check configuration, install logging
pub(crate) fn bootstrap() -> anyhow::Result<AppConfig> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("loading configuration")?;
    init_logging(&config.logging).context("initializing logging")?;
    config.validate()?;

    Ok(config)
}
