//! Motivatr Auth
//!
//! Identity backend for the Motivatr platform:
//! - Account registration with field validation and unique emails
//! - Credential verification against salted, bcrypt-hashed passwords
//! - Signed session tokens for the rest of the platform
//! - In-memory or PostgreSQL user storage

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use tracing::info;

use api::state::AppState;
use config::StorageBackend;
use domain::user::UserRepository;
use infrastructure::{
    auth::{JwtConfig, JwtTokenIssuer},
    storage::{connect, run_user_migrations, PostgresConfig},
    user::{InMemoryUserRepository, PostgresUserRepository, Sha256BcryptHasher},
};

/// Build the user repository selected by `storage.backend`
pub async fn create_user_repository(config: &AppConfig) -> anyhow::Result<Arc<dyn UserRepository>> {
    match config.storage.backend {
        StorageBackend::Memory => {
            info!("Using in-memory user storage");
            Ok(Arc::new(InMemoryUserRepository::new()))
        }
        StorageBackend::Postgres => {
            let url = config.database.url.clone().ok_or_else(|| {
                anyhow::anyhow!("database.url (or DATABASE_URL) is required for postgres storage")
            })?;

            let pool = connect(
                &PostgresConfig::new(url).with_max_connections(config.database.max_connections),
            )
            .await?;

            if config.database.run_migrations {
                let applied = run_user_migrations(&pool).await?;
                info!(applied, "Database migrations applied");
            }

            info!("Using PostgreSQL user storage");
            Ok(Arc::new(PostgresUserRepository::new(pool)))
        }
    }
}

/// Create application state from configuration
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let repository = create_user_repository(config).await?;
    let salt = config.auth.password_salt.clone();
    let cost = config.auth.bcrypt_cost;
    let hasher =
        tokio::task::spawn_blocking(move || Sha256BcryptHasher::with_cost(salt, cost)).await??;
    let issuer = JwtTokenIssuer::new(JwtConfig::new(config.auth.jwt_secret.clone()))?;

    info!(cost = hasher.cost(), "Credential pipeline ready");

    Ok(AppState::new(repository, Arc::new(hasher), Arc::new(issuer)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.auth.jwt_secret = "lib-test-secret".to_string();
        config.auth.password_salt = "pepper".to_string();
        config.auth.bcrypt_cost = 4;
        config
    }

    #[tokio::test]
    async fn test_memory_state() {
        let state = create_app_state_with_config(&memory_config()).await.unwrap();
        assert!(state.user_repository.ping().await.is_ok());
    }

    #[tokio::test]
    async fn test_missing_jwt_secret_fails() {
        let mut config = memory_config();
        config.auth.jwt_secret = String::new();

        assert!(create_app_state_with_config(&config).await.is_err());
    }

    #[tokio::test]
    async fn test_postgres_requires_url() {
        let mut config = memory_config();
        config.storage.backend = StorageBackend::Postgres;
        config.database.url = None;

        assert!(create_user_repository(&config).await.is_err());
    }
}
