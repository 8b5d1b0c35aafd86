//! Embedded schema migrations

use sqlx::postgres::PgPool;
use tracing::info;

use crate::domain::DomainError;

/// A versioned schema change with its inverse
#[derive(Debug, Clone)]
pub struct Migration {
    pub version: i64,
    pub description: String,
    /// SQL applied when migrating forward
    pub up: String,
    /// SQL applied when reverting
    pub down: String,
}

impl Migration {
    pub fn new(
        version: i64,
        description: impl Into<String>,
        up: impl Into<String>,
        down: impl Into<String>,
    ) -> Self {
        Self {
            version,
            description: description.into(),
            up: up.into(),
            down: down.into(),
        }
    }
}

/// Schema for the identity store
pub fn user_migrations() -> Vec<Migration> {
    vec![Migration::new(
        1,
        "Create users table",
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id BIGSERIAL PRIMARY KEY,
            name VARCHAR(50) NOT NULL,
            email VARCHAR(100) NOT NULL UNIQUE,
            password VARCHAR(255) NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        );
        "#,
        r#"
        DROP TABLE IF EXISTS users;
        "#,
    )]
}

/// Applies migrations and records them in `_migrations`
#[derive(Debug, Clone)]
pub struct PostgresMigrator {
    pool: PgPool,
}

impl PostgresMigrator {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn ensure_migrations_table(&self) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS _migrations (
                version BIGINT PRIMARY KEY,
                description TEXT NOT NULL,
                installed_on TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::persistence(format!("Failed to create migrations table: {}", e))
        })?;

        Ok(())
    }

    async fn is_applied(&self, version: i64) -> Result<bool, DomainError> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM _migrations WHERE version = $1)")
            .bind(version)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                DomainError::persistence(format!("Failed to check migration status: {}", e))
            })
    }

    /// Apply a migration unless it is already recorded
    ///
    /// Returns whether the migration ran.
    pub async fn apply(&self, migration: &Migration) -> Result<bool, DomainError> {
        self.ensure_migrations_table().await?;

        if self.is_applied(migration.version).await? {
            return Ok(false);
        }

        let mut tx = self.pool.begin().await.map_err(|e| {
            DomainError::persistence(format!("Failed to start migration transaction: {}", e))
        })?;

        sqlx::raw_sql(&migration.up)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                DomainError::persistence(format!(
                    "Failed to run migration {}: {}",
                    migration.version, e
                ))
            })?;

        sqlx::query("INSERT INTO _migrations (version, description) VALUES ($1, $2)")
            .bind(migration.version)
            .bind(&migration.description)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                DomainError::persistence(format!(
                    "Failed to record migration {}: {}",
                    migration.version, e
                ))
            })?;

        tx.commit().await.map_err(|e| {
            DomainError::persistence(format!(
                "Failed to commit migration {}: {}",
                migration.version, e
            ))
        })?;

        info!(
            version = migration.version,
            description = %migration.description,
            "Applied migration"
        );

        Ok(true)
    }

    /// Revert a migration if it is recorded
    pub async fn revert(&self, migration: &Migration) -> Result<bool, DomainError> {
        self.ensure_migrations_table().await?;

        if !self.is_applied(migration.version).await? {
            return Ok(false);
        }

        let mut tx = self.pool.begin().await.map_err(|e| {
            DomainError::persistence(format!("Failed to start migration transaction: {}", e))
        })?;

        sqlx::raw_sql(&migration.down)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                DomainError::persistence(format!(
                    "Failed to revert migration {}: {}",
                    migration.version, e
                ))
            })?;

        sqlx::query("DELETE FROM _migrations WHERE version = $1")
            .bind(migration.version)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                DomainError::persistence(format!(
                    "Failed to remove migration record {}: {}",
                    migration.version, e
                ))
            })?;

        tx.commit().await.map_err(|e| {
            DomainError::persistence(format!(
                "Failed to commit revert of migration {}: {}",
                migration.version, e
            ))
        })?;

        info!(version = migration.version, "Reverted migration");

        Ok(true)
    }

    /// Latest recorded migration version
    pub async fn current_version(&self) -> Result<Option<i64>, DomainError> {
        self.ensure_migrations_table().await?;

        sqlx::query_scalar("SELECT MAX(version) FROM _migrations")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                DomainError::persistence(format!("Failed to get migration version: {}", e))
            })
    }
}

/// Apply every pending user migration in order
///
/// Returns the number of migrations that ran.
pub async fn run_user_migrations(pool: &PgPool) -> Result<usize, DomainError> {
    let migrator = PostgresMigrator::new(pool.clone());
    let mut applied = 0;

    for migration in user_migrations() {
        if migrator.apply(&migration).await? {
            applied += 1;
        }
    }

    Ok(applied)
}

/// Revert the most recently applied user migration
pub async fn revert_last_user_migration(pool: &PgPool) -> Result<Option<i64>, DomainError> {
    let migrator = PostgresMigrator::new(pool.clone());

    let Some(version) = migrator.current_version().await? else {
        return Ok(None);
    };

    match user_migrations().iter().find(|m| m.version == version) {
        Some(migration) => {
            migrator.revert(migration).await?;
            Ok(Some(version))
        }
        None => Err(DomainError::persistence(format!(
            "Unknown migration version {} recorded in the database",
            version
        ))),
    }
}
