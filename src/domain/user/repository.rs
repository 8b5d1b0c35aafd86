//! User repository trait

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use super::entity::{NewUser, User, UserId};
use crate::domain::DomainError;

/// Repository trait for user storage
///
/// Each call is atomic with respect to the others. Absence is reported as
/// `Ok(None)`, never as an error.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new user, assigning its id and creation time
    ///
    /// Returns `DomainError::Conflict` when the email is already registered.
    async fn create(&self, user: NewUser) -> Result<User, DomainError>;

    /// Get a user by id
    async fn find(&self, id: &UserId) -> Result<Option<User>, DomainError>;

    /// Get a user by exact email
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Check that the backing store is reachable
    async fn ping(&self) -> Result<(), DomainError> {
        Ok(())
    }
}
