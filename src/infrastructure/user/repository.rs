//! In-memory user repository implementation

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::user::{NewUser, User, UserId, UserRepository};
use crate::domain::DomainError;

#[derive(Debug)]
struct Store {
    users: HashMap<UserId, User>,
    /// Index for email -> user ID lookup
    email_index: HashMap<String, UserId>,
    next_id: i64,
}

impl Default for Store {
    fn default() -> Self {
        Self {
            users: HashMap::new(),
            email_index: HashMap::new(),
            next_id: 1,
        }
    }
}

/// In-memory implementation of UserRepository
///
/// A single lock guards the users, the email index and the id sequence so the
/// uniqueness check and the insert happen atomically.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    store: RwLock<Store>,
}

impl InMemoryUserRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users
    pub async fn len(&self) -> usize {
        self.store.read().await.users.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, DomainError> {
        let mut store = self.store.write().await;

        if store.email_index.contains_key(&user.email) {
            return Err(DomainError::conflict(format!(
                "Email '{}' already exists",
                user.email
            )));
        }

        let id = UserId::new(store.next_id);
        store.next_id += 1;

        let user = User::from_new(user, id, Utc::now());
        store.email_index.insert(user.email().to_string(), id);
        store.users.insert(id, user.clone());

        Ok(user)
    }

    async fn find(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let store = self.store.read().await;
        Ok(store.users.get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let store = self.store.read().await;

        Ok(store
            .email_index
            .get(email)
            .and_then(|id| store.users.get(id))
            .cloned())
    }
}
