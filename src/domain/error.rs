use thiserror::Error;

/// Core domain errors
///
/// Business outcomes such as a taken email or a rejected login are not errors;
/// they are returned as values by the use cases. Everything here is a fault.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Persistence error: {message}")]
    Persistence { message: String },

    #[error("Crypto error: {message}")]
    Crypto { message: String },

    #[error("Signing error: {message}")]
    Signing { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn persistence(message: impl Into<String>) -> Self {
        Self::Persistence {
            message: message.into(),
        }
    }

    pub fn crypto(message: impl Into<String>) -> Self {
        Self::Crypto {
            message: message.into(),
        }
    }

    pub fn signing(message: impl Into<String>) -> Self {
        Self::Signing {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Prefix the message with the operation that failed, keeping the variant
    pub fn context(self, operation: &str) -> Self {
        match self {
            Self::Conflict { message } => Self::conflict(format!("{}: {}", operation, message)),
            Self::Persistence { message } => {
                Self::persistence(format!("{}: {}", operation, message))
            }
            Self::Crypto { message } => Self::crypto(format!("{}: {}", operation, message)),
            Self::Signing { message } => Self::signing(format!("{}: {}", operation, message)),
            Self::Configuration { message } => {
                Self::configuration(format!("{}: {}", operation, message))
            }
            Self::Internal { message } => Self::internal(format!("{}: {}", operation, message)),
        }
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_persistence_error() {
        let error = DomainError::persistence("connection refused");
        assert_eq!(error.to_string(), "Persistence error: connection refused");
    }

    #[test]
    fn test_conflict_error() {
        let error = DomainError::conflict("Email 'a@b.io' already exists");
        assert_eq!(error.to_string(), "Conflict: Email 'a@b.io' already exists");
        assert!(error.is_conflict());
    }

    #[test]
    fn test_context_keeps_variant() {
        let error = DomainError::crypto("invalid hash").context("comparing passwords");

        assert!(matches!(error, DomainError::Crypto { .. }));
        assert_eq!(error.to_string(), "Crypto error: comparing passwords: invalid hash");
    }

    #[test]
    fn test_context_on_persistence() {
        let error = DomainError::persistence("timeout").context("writing a user");
        assert_eq!(error.to_string(), "Persistence error: writing a user: timeout");
        assert!(!error.is_conflict());
    }
}
