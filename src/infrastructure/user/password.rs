//! Credential hashing: SHA-256 pre-digest followed by bcrypt
//!
//! The password is concatenated with a service-wide salt, digested with
//! SHA-256 and the raw 32-byte digest is fed to bcrypt. The pre-digest keeps
//! passwords longer than bcrypt's 72-byte input limit distinguishable.

use sha2::{Digest, Sha256};
use std::fmt;
use std::sync::Arc;

#[cfg(test)]
use mockall::automock;

use crate::domain::DomainError;

/// bcrypt work factor used for stored credentials
pub const DEFAULT_COST: u32 = 14;

const DECOY_PASSWORD: &str = "decoy-password-for-unknown-accounts";

/// Trait for credential hashing operations
#[cfg_attr(test, automock)]
pub trait CredentialHasher: Send + Sync {
    /// Hash a password for storage
    fn hash(&self, password: &str) -> Result<String, DomainError>;

    /// Verify a password against a stored hash
    ///
    /// A mismatch is `Ok(false)`; a stored hash that cannot be parsed is an error.
    fn verify(&self, password: &str, stored: &str) -> Result<bool, DomainError>;

    /// Spend the same work as a real verification without any account behind it
    fn verify_decoy(&self, password: &str);
}

fn pre_digest(password: &str, salt: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    hasher.update(salt.as_bytes());
    hasher.finalize().into()
}

/// Hash `password ‖ salt` with SHA-256, then bcrypt the digest
pub fn hash_with_salt(password: &str, salt: &str, cost: u32) -> Result<String, DomainError> {
    bcrypt::hash(pre_digest(password, salt), cost)
        .map_err(|e| DomainError::crypto(format!("Failed to hash password: {}", e)))
}

/// Verify a password against a hash produced by [`hash_with_salt`]
pub fn verify_with_salt(password: &str, salt: &str, stored: &str) -> Result<bool, DomainError> {
    bcrypt::verify(pre_digest(password, salt), stored)
        .map_err(|e| DomainError::crypto(format!("Failed to compare passwords: {}", e)))
}

/// Production hasher with an injected salt
#[derive(Clone)]
pub struct Sha256BcryptHasher {
    salt: String,
    cost: u32,
    decoy: String,
}

impl Sha256BcryptHasher {
    /// Create a hasher with an explicit bcrypt cost
    ///
    /// The decoy hash used for unknown accounts is computed here so that no
    /// login request pays for it.
    pub fn with_cost(salt: impl Into<String>, cost: u32) -> Result<Self, DomainError> {
        let salt = salt.into();
        let decoy = hash_with_salt(DECOY_PASSWORD, &salt, cost)?;

        Ok(Self { salt, cost, decoy })
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }
}

impl fmt::Debug for Sha256BcryptHasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sha256BcryptHasher")
            .field("salt", &"<redacted>")
            .field("cost", &self.cost)
            .finish()
    }
}

impl CredentialHasher for Sha256BcryptHasher {
    fn hash(&self, password: &str) -> Result<String, DomainError> {
        hash_with_salt(password, &self.salt, self.cost)
    }

    fn verify(&self, password: &str, stored: &str) -> Result<bool, DomainError> {
        verify_with_salt(password, &self.salt, stored)
    }

    fn verify_decoy(&self, password: &str) {
        let _ = verify_with_salt(password, &self.salt, &self.decoy);
    }
}

fn join_error(e: tokio::task::JoinError) -> DomainError {
    DomainError::internal(format!("Hashing task failed: {}", e))
}

/// Run [`CredentialHasher::hash`] on the blocking pool
pub(crate) async fn hash_blocking(
    hasher: Arc<dyn CredentialHasher>,
    password: String,
) -> Result<String, DomainError> {
    tokio::task::spawn_blocking(move || hasher.hash(&password))
        .await
        .map_err(join_error)?
}

/// Run [`CredentialHasher::verify`] on the blocking pool
pub(crate) async fn verify_blocking(
    hasher: Arc<dyn CredentialHasher>,
    password: String,
    stored: String,
) -> Result<bool, DomainError> {
    tokio::task::spawn_blocking(move || hasher.verify(&password, &stored))
        .await
        .map_err(join_error)?
}

/// Run [`CredentialHasher::verify_decoy`] on the blocking pool
pub(crate) async fn verify_decoy_blocking(
    hasher: Arc<dyn CredentialHasher>,
    password: String,
) -> Result<(), DomainError> {
    tokio::task::spawn_blocking(move || hasher.verify_decoy(&password))
        .await
        .map_err(join_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_COST: u32 = 4;

    fn hasher() -> Sha256BcryptHasher {
        Sha256BcryptHasher::with_cost("pepper", TEST_COST).unwrap()
    }

    #[test]
    fn test_hash_and_verify() {
        let hasher = hasher();
        let hash = hasher.hash("S3cure!pass").unwrap();

        assert!(hasher.verify("S3cure!pass", &hash).unwrap());
        assert!(!hasher.verify("wrong", &hash).unwrap());
    }

    #[test]
    fn test_hash_is_unique() {
        let hasher = hasher();

        let hash1 = hasher.hash("S3cure!pass").unwrap();
        let hash2 = hasher.hash("S3cure!pass").unwrap();

        // bcrypt draws a fresh salt per hash
        assert_ne!(hash1, hash2);
        assert!(hasher.verify("S3cure!pass", &hash1).unwrap());
        assert!(hasher.verify("S3cure!pass", &hash2).unwrap());
    }

    #[test]
    fn test_hash_format_carries_cost() {
        let hash = hash_with_salt("S3cure!pass", "pepper", TEST_COST).unwrap();
        assert!(hash.starts_with("$2b$04$"));
        assert_eq!(hash.len(), 60);
    }

    #[test]
    fn test_salt_is_part_of_the_digest() {
        let hash = hash_with_salt("S3cure!pass", "pepper", TEST_COST).unwrap();

        assert!(verify_with_salt("S3cure!pass", "pepper", &hash).unwrap());
        assert!(!verify_with_salt("S3cure!pass", "other", &hash).unwrap());
    }

    #[test]
    fn test_long_passwords_stay_distinct() {
        let hasher = hasher();
        let prefix = "A".repeat(80);
        let first = format!("{}1", prefix);
        let second = format!("{}2", prefix);

        let hash = hasher.hash(&first).unwrap();

        assert!(hasher.verify(&first, &hash).unwrap());
        assert!(!hasher.verify(&second, &hash).unwrap());
    }

    #[test]
    fn test_verify_corrupt_hash_is_error() {
        let hasher = hasher();

        let result = hasher.verify("S3cure!pass", "not-a-bcrypt-hash");
        assert!(matches!(result, Err(DomainError::Crypto { .. })));
    }

    #[test]
    fn test_invalid_cost_is_error() {
        let result = hash_with_salt("S3cure!pass", "pepper", 99);
        assert!(matches!(result, Err(DomainError::Crypto { .. })));
    }

    #[test]
    fn test_decoy_ready_after_construction() {
        let hasher = hasher();

        assert!(hasher.decoy.starts_with("$2b$04$"));
        assert!(hasher.verify(DECOY_PASSWORD, &hasher.decoy).unwrap());

        let before = hasher.decoy.clone();
        hasher.verify_decoy("anything");
        assert_eq!(hasher.decoy, before);
    }

    #[test]
    fn test_invalid_cost_fails_construction() {
        let result = Sha256BcryptHasher::with_cost("pepper", 99);
        assert!(matches!(result, Err(DomainError::Crypto { .. })));
    }

    #[test]
    fn test_debug_hides_salt() {
        let hasher = Sha256BcryptHasher::with_cost("super-secret-salt", TEST_COST).unwrap();
        let debug = format!("{:?}", hasher);

        assert!(!debug.contains("super-secret-salt"));
        assert!(!debug.contains(&hasher.decoy));
        assert!(debug.contains("cost: 4"));
    }
}
