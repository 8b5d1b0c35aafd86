//! Authentication infrastructure module
//!
//! This module provides bearer token issuance for authenticated users.

mod jwt;

pub use jwt::{IssuedToken, JwtClaims, JwtConfig, JwtTokenIssuer, TokenIssuer, TOKEN_TTL_SECONDS};

#[cfg(test)]
pub use jwt::MockTokenIssuer;
