//! Migrate command - applies or reverts the user schema and exits

use anyhow::Context;
use clap::Args;
use tracing::info;

use crate::infrastructure::storage::{
    connect, revert_last_user_migration, run_user_migrations, PostgresConfig,
};

#[derive(Debug, Args)]
pub struct MigrateArgs {
    /// Revert the most recently applied migration instead of applying pending ones
    #[arg(long)]
    pub revert: bool,
}

pub async fn run(args: MigrateArgs) -> anyhow::Result<()> {
    let config = super::bootstrap()?;

    let url = config
        .database
        .url
        .clone()
        .context("database.url (or DATABASE_URL) is required to run migrations")?;

    let pool = connect(&PostgresConfig::new(url).with_max_connections(1)).await?;

    if args.revert {
        match revert_last_user_migration(&pool).await? {
            Some(version) => info!(version, "Reverted migration"),
            None => info!("No migrations to revert"),
        }
    } else {
        let applied = run_user_migrations(&pool).await?;
        info!(applied, "Migrations complete");
    }

    pool.close().await;

    Ok(())
}
