//! Account registration

use std::sync::Arc;

use tracing::{info, instrument};

use crate::domain::user::{NewUser, UserRepository, ValidationErrorSet, EMAIL_TAKEN_MESSAGE};
use crate::domain::DomainError;
use crate::infrastructure::auth::{IssuedToken, TokenIssuer};

use super::password::{hash_blocking, CredentialHasher};

/// Registration input, already shape-validated
#[derive(Clone)]
pub struct CreateUserCommand {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for CreateUserCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreateUserCommand")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"[hidden]")
            .finish()
    }
}

/// Result of a registration attempt that did not fault
#[derive(Debug, Clone)]
pub enum CreateUserOutcome {
    /// Account stored and a token issued for it
    Created(IssuedToken),
    /// Domain rule rejected the request; nothing was stored
    Rejected(ValidationErrorSet),
}

fn email_taken() -> CreateUserOutcome {
    CreateUserOutcome::Rejected(ValidationErrorSet::single("email", EMAIL_TAKEN_MESSAGE))
}

/// Registers accounts and issues their first token
pub struct CreateUserUseCase {
    repository: Arc<dyn UserRepository>,
    hasher: Arc<dyn CredentialHasher>,
    issuer: Arc<dyn TokenIssuer>,
}

impl CreateUserUseCase {
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

    #[instrument(skip(self, command), fields(email = %command.email))]
    pub async fn execute(&self, command: CreateUserCommand) -> Result<CreateUserOutcome, DomainError> {
        let existing = self
            .repository
            .find_by_email(&command.email)
            .await
            .map_err(|e| e.context("retrieving a user by email"))?;

        if existing.is_some() {
            info!("Registration rejected: email already taken");
            return Ok(email_taken());
        }

        let password_hash = hash_blocking(Arc::clone(&self.hasher), command.password)
            .await
            .map_err(|e| e.context("hashing a password"))?;

        let user = match self
            .repository
            .create(NewUser::new(command.name, command.email, password_hash))
            .await
        {
            Ok(user) => user,
            Err(e) if e.is_conflict() => {
                info!("Registration rejected: email taken concurrently");
                return Ok(email_taken());
            }
            Err(e) => return Err(e.context("writing a user")),
        };

        let token = self
            .issuer
            .issue(&user.id().to_string())
            .map_err(|e| e.context("signing a token"))?;

        info!(user_id = %user.id(), "User registered");

        Ok(CreateUserOutcome::Created(token))
    }
}
