//! User infrastructure module
//!
//! This module provides the credential pipeline: SHA-256 + bcrypt hashing,
//! in-memory and PostgreSQL repositories, and the registration and login use
//! cases built on top of them.

mod authenticate_user;
mod create_user;
mod password;
mod postgres_repository;
mod repository;

pub use authenticate_user::{AuthenticateUserQuery, AuthenticateUserUseCase, AuthenticationOutcome};
pub use create_user::{CreateUserCommand, CreateUserOutcome, CreateUserUseCase};
pub use password::{
    hash_with_salt, verify_with_salt, CredentialHasher, Sha256BcryptHasher, DEFAULT_COST,
};
pub use postgres_repository::PostgresUserRepository;
pub use repository::InMemoryUserRepository;
