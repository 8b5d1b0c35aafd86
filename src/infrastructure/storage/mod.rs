//! Storage infrastructure - connection pooling and schema migrations

pub mod migrations;
mod postgres;

pub use migrations::{
    revert_last_user_migration, run_user_migrations, user_migrations, Migration, PostgresMigrator,
};
pub use postgres::{connect, PostgresConfig};
