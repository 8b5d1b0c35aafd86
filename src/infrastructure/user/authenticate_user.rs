//! Credential verification

use std::sync::Arc;

use tracing::{info, instrument};

use crate::domain::user::UserRepository;
use crate::domain::DomainError;
use crate::infrastructure::auth::{IssuedToken, TokenIssuer};

use super::password::{verify_blocking, verify_decoy_blocking, CredentialHasher};

/// Login input, already shape-validated
#[derive(Clone)]
pub struct AuthenticateUserQuery {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for AuthenticateUserQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthenticateUserQuery")
            .field("email", &self.email)
            .field("password", &"[hidden]")
            .finish()
    }
}

/// Result of a login attempt that did not fault
///
/// An unknown email and a wrong password both produce `Rejected`.
#[derive(Debug, Clone)]
pub enum AuthenticationOutcome {
    Authenticated(IssuedToken),
    Rejected,
}

/// Verifies credentials and issues tokens
pub struct AuthenticateUserUseCase {
    repository: Arc<dyn UserRepository>,
    hasher: Arc<dyn CredentialHasher>,
    issuer: Arc<dyn TokenIssuer>,
}

impl AuthenticateUserUseCase {
    pub fn new(
        repository: Arc<dyn UserRepository>,
        hasher: Arc<dyn CredentialHasher>,
        issuer: Arc<dyn TokenIssuer>,
    ) -> Self {
        Self {
            repository,
            hasher,
            issuer,
        }
    }

    #[instrument(skip(self, query), fields(email = %query.email))]
    pub async fn execute(
        &self,
        query: AuthenticateUserQuery,
    ) -> Result<AuthenticationOutcome, DomainError> {
        let user = self
            .repository
            .find_by_email(&query.email)
            .await
            .map_err(|e| e.context("fetching a user by email"))?;

        let Some(user) = user else {
            verify_decoy_blocking(Arc::clone(&self.hasher), query.password).await?;
            info!("Authentication rejected");
            return Ok(AuthenticationOutcome::Rejected);
        };

        let matches = verify_blocking(
            Arc::clone(&self.hasher),
            query.password,
            user.password_hash().to_string(),
        )
        .await
        .map_err(|e| e.context("comparing passwords"))?;

        if !matches {
            info!("Authentication rejected");
            return Ok(AuthenticationOutcome::Rejected);
        }

        let token = self
            .issuer
            .issue(&user.id().to_string())
            .map_err(|e| e.context("signing a token"))?;

        info!(user_id = %user.id(), "User authenticated");

        Ok(AuthenticationOutcome::Authenticated(token))
    }
}
