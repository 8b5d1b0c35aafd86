//! User entity and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User identifier - assigned by the store on creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the inner integer value
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A user that has not been persisted yet and therefore has no id
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

impl NewUser {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password_hash: password_hash.into(),
        }
    }
}

/// Persisted identity record
#[derive(Debug, Clone, Serialize)]
pub struct User {
    /// Store-assigned identifier
    id: UserId,
    /// Display name
    name: String,
    /// Unique across all users, compared exactly as stored
    email: String,
    /// Credential hash - never exposed in serialization
    #[serde(skip_serializing)]
    password_hash: String,
    /// Creation timestamp, set by the store
    created_at: DateTime<Utc>,
}

impl User {
    /// Rebuild a user from stored state
    pub fn new(
        id: UserId,
        name: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            password_hash: password_hash.into(),
            created_at,
        }
    }

    /// Promote a new user to a stored one
    pub fn from_new(new_user: NewUser, id: UserId, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: new_user.name,
            email: new_user.email,
            password_hash: new_user.password_hash,
            created_at,
        }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_user() -> User {
        User::new(
            UserId::new(7),
            "Alice",
            "alice@example.com",
            "$2b$04$hashed_password",
            Utc::now(),
        )
    }

    #[test]
    fn test_user_id_display() {
        assert_eq!(UserId::new(42).to_string(), "42");
        assert_eq!(UserId::from(42).value(), 42);
    }

    #[test]
    fn test_user_id_serializes_as_number() {
        let json = serde_json::to_string(&UserId::new(3)).unwrap();
        assert_eq!(json, "3");
    }

    #[test]
    fn test_user_creation() {
        let user = create_test_user();

        assert_eq!(user.id(), UserId::new(7));
        assert_eq!(user.name(), "Alice");
        assert_eq!(user.email(), "alice@example.com");
        assert_eq!(user.password_hash(), "$2b$04$hashed_password");
    }

    #[test]
    fn test_from_new_keeps_fields() {
        let created_at = Utc::now();
        let new_user = NewUser::new("Bob", "bob@example.com", "hash");
        let user = User::from_new(new_user, UserId::new(1), created_at);

        assert_eq!(user.id().value(), 1);
        assert_eq!(user.name(), "Bob");
        assert_eq!(user.email(), "bob@example.com");
        assert_eq!(user.password_hash(), "hash");
        assert_eq!(user.created_at(), created_at);
    }

    #[test]
    fn test_user_serialization_excludes_password() {
        let user = create_test_user();

        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("hashed_password"));
        assert!(!json.contains("password_hash"));
        assert!(json.contains("alice@example.com"));
    }
}
