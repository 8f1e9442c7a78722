//! Security ports
//!
//! Password hashing and access-token issuance used by sign-up and sign-in.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::{Role, User, UserId};
use crate::error::DomainError;

/// Claims carried by an issued access token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: UserId,
    pub username: String,
    pub role: Role,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub exp: DateTime<Utc>,
}

#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, password: &str) -> Result<String, DomainError>;

    fn verify(&self, password: &str, hash: &str) -> bool;
}

#[cfg_attr(test, mockall::automock)]
pub trait TokenService: Send + Sync {
    /// Issue an opaque token for the user
    fn issue(&self, user: &User) -> Result<String, DomainError>;

    /// Check signature and expiry, returning the embedded claims
    fn verify(&self, token: &str) -> Result<TokenClaims, DomainError>;
}
