//! PostgreSQL user repository implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};

use crate::domain::user::{NewUser, User, UserId, UserRepository};
use crate::domain::DomainError;

/// PostgreSQL implementation of UserRepository
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn is_unique_violation(error: &sqlx::Error) -> bool {
    error
        .as_database_error()
        .is_some_and(|db_error| db_error.is_unique_violation())
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, DomainError> {
        let created_at = Utc::now();

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO users (name, email, password, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                DomainError::conflict(format!("Email '{}' already exists", user.email))
            } else {
                DomainError::persistence(format!("Failed to create user: {}", e))
            }
        })?;

        Ok(User::from_new(user, UserId::new(id), created_at))
    }

    async fn find(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, email, password, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::persistence(format!("Failed to get user: {}", e)))?;

        row.as_ref().map(row_to_user).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, email, password, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::persistence(format!("Failed to get user by email: {}", e)))?;

        row.as_ref().map(row_to_user).transpose()
    }

    async fn ping(&self) -> Result<(), DomainError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::persistence(format!("Database unreachable: {}", e)))?;

        Ok(())
    }
}

fn row_to_user(row: &sqlx::postgres::PgRow) -> Result<User, DomainError> {
    let column = |e: sqlx::Error| DomainError::persistence(format!("Invalid user row: {}", e));

    let id: i64 = row.try_get("id").map_err(column)?;
    let name: String = row.try_get("name").map_err(column)?;
    let email: String = row.try_get("email").map_err(column)?;
    let password_hash: String = row.try_get("password").map_err(column)?;
    let created_at: DateTime<Utc> = row.try_get("created_at").map_err(column)?;

    Ok(User::new(
        UserId::new(id),
        name,
        email,
        password_hash,
        created_at,
    ))
}
