//! Bearer token issuance with HS256-signed JWTs

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use std::fmt;

#[cfg(test)]
use mockall::automock;

use crate::domain::DomainError;

/// Lifetime of an issued token: seven days
pub const TOKEN_TTL_SECONDS: i64 = 7 * 24 * 60 * 60;

/// JWT claims structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtClaims {
    /// Subject (decimal user id)
    pub sub: String,
    /// Issued at timestamp (Unix epoch seconds)
    pub iat: i64,
    /// Expiration timestamp (Unix epoch seconds)
    pub exp: i64,
}

impl JwtClaims {
    /// Claims for `subject` issued at `now`, truncated to whole seconds
    pub fn new(subject: impl Into<String>, now: DateTime<Utc>) -> Self {
        let iat = now.timestamp();

        Self {
            sub: subject.into(),
            iat,
            exp: iat + TOKEN_TTL_SECONDS,
        }
    }
}

/// Configuration for the token issuer
#[derive(Clone)]
pub struct JwtConfig {
    /// HMAC key material
    pub secret: String,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"[hidden]")
            .finish()
    }
}

/// A signed token together with the claims it carries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    /// Compact serialized JWT
    pub token: String,
    pub subject: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Trait for token issuance
#[cfg_attr(test, automock)]
pub trait TokenIssuer: Send + Sync {
    /// Issue a token whose subject is `subject`
    fn issue(&self, subject: &str) -> Result<IssuedToken, DomainError>;
}

/// HS256 token issuer with an injected key
#[derive(Clone)]
pub struct JwtTokenIssuer {
    encoding_key: EncodingKey,
}

impl fmt::Debug for JwtTokenIssuer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtTokenIssuer")
            .field("algorithm", &Algorithm::HS256)
            .field("encoding_key", &"[hidden]")
            .finish()
    }
}

impl JwtTokenIssuer {
    /// Create an issuer; empty key material is rejected
    pub fn new(config: JwtConfig) -> Result<Self, DomainError> {
        if config.secret.is_empty() {
            return Err(DomainError::signing("JWT secret must not be empty"));
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
        })
    }

    /// Issue a token as of `now`
    ///
    /// Deterministic for a given subject, instant and key.
    pub fn issue_at(&self, subject: &str, now: DateTime<Utc>) -> Result<IssuedToken, DomainError> {
        let claims = JwtClaims::new(subject, now);

        let issued_at = DateTime::from_timestamp(claims.iat, 0)
            .ok_or_else(|| DomainError::signing("Issue time out of range"))?;
        let expires_at = issued_at + Duration::seconds(TOKEN_TTL_SECONDS);

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| DomainError::signing(format!("Failed to sign token: {}", e)))?;

        Ok(IssuedToken {
            token,
            subject: claims.sub,
            issued_at,
            expires_at,
        })
    }
}

impl TokenIssuer for JwtTokenIssuer {
    fn issue(&self, subject: &str) -> Result<IssuedToken, DomainError> {
        self.issue_at(subject, Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use jsonwebtoken::{decode, decode_header, DecodingKey, Validation};

    const SECRET: &str = "test-secret";

    fn issuer() -> JwtTokenIssuer {
        JwtTokenIssuer::new(JwtConfig::new(SECRET)).unwrap()
    }

    fn decode_claims(token: &str, secret: &str) -> jsonwebtoken::errors::Result<JwtClaims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        decode::<JwtClaims>(token, &DecodingKey::from_secret(secret.as_bytes()), &validation)
            .map(|data| data.claims)
    }

    #[test]
    fn test_issue_claims() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let issued = issuer().issue_at("7", now).unwrap();

        let claims = decode_claims(&issued.token, SECRET).unwrap();
        assert_eq!(claims.sub, "7");
        assert_eq!(claims.iat, now.timestamp());
        assert_eq!(claims.exp, now.timestamp() + 604_800);

        assert_eq!(issued.subject, "7");
        assert_eq!(issued.issued_at, now);
        assert_eq!(issued.expires_at - issued.issued_at, Duration::days(7));
    }

    #[test]
    fn test_header_is_hs256() {
        let issued = issuer().issue("1").unwrap();
        let header = decode_header(&issued.token).unwrap();

        assert_eq!(header.alg, Algorithm::HS256);
    }

    #[test]
    fn test_issue_at_is_deterministic() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 8, 30, 15).unwrap();
        let issuer = issuer();

        let first = issuer.issue_at("42", now).unwrap();
        let second = issuer.issue_at("42", now).unwrap();

        assert_eq!(first.token, second.token);
    }

    #[test]
    fn test_iat_truncated_to_seconds() {
        let now = Utc.timestamp_opt(1_700_000_000, 999_000_000).unwrap();
        let issued = issuer().issue_at("3", now).unwrap();

        let claims = decode_claims(&issued.token, SECRET).unwrap();
        assert_eq!(claims.iat, 1_700_000_000);
        assert_eq!(claims.exp, 1_700_604_800);
    }

    #[test]
    fn test_wrong_key_fails_verification() {
        let issued = issuer().issue("1").unwrap();

        assert!(decode_claims(&issued.token, "other-secret").is_err());
    }

    #[test]
    fn test_fresh_token_passes_default_validation() {
        let issued = issuer().issue("9").unwrap();

        let data = decode::<JwtClaims>(
            &issued.token,
            &DecodingKey::from_secret(SECRET.as_bytes()),
            &Validation::new(Algorithm::HS256),
        )
        .unwrap();
        assert_eq!(data.claims.sub, "9");
    }

    #[test]
    fn test_empty_secret_rejected() {
        let result = JwtTokenIssuer::new(JwtConfig::new(""));
        assert!(matches!(result, Err(DomainError::Signing { .. })));
    }

    #[test]
    fn test_debug_hides_secret() {
        let debug = format!("{:?}", JwtConfig::new("very-secret"));
        assert!(!debug.contains("very-secret"));
    }
}
