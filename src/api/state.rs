//! Application state for shared services

use std::sync::Arc;

use crate::domain::user::UserRepository;
use crate::infrastructure::auth::TokenIssuer;
use crate::infrastructure::user::{AuthenticateUserUseCase, CreateUserUseCase, CredentialHasher};

/// Application state shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub create_user: Arc<CreateUserUseCase>,
    pub authenticate_user: Arc<AuthenticateUserUseCase>,
    /// Used by the readiness probe
    pub user_repository: Arc<dyn UserRepository>,
}

impl AppState {
    /// Wire both use cases over the same repository, hasher and issuer
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        hasher: Arc<dyn CredentialHasher>,
        issuer: Arc<dyn TokenIssuer>,
    ) -> Self {
        Self {
            create_user: Arc::new(CreateUserUseCase::new(
                Arc::clone(&user_repository),
                Arc::clone(&hasher),
                Arc::clone(&issuer),
            )),
            authenticate_user: Arc::new(AuthenticateUserUseCase::new(
                Arc::clone(&user_repository),
                hasher,
                issuer,
            )),
            user_repository,
        }
    }
}
