//! User domain entity
//!
//! The authentication identity. Distinct from a customer `Profile`.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Maximum username length accepted at sign-up
pub const MAX_USERNAME_LEN: usize = 64;

/// Unique identifier for a user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(pub i32);

impl From<i32> for UserId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Role granted to a user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Producer,
    Distributor,
    Customer,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::Producer => write!(f, "producer"),
            Role::Distributor => write!(f, "distributor"),
            Role::Customer => write!(f, "customer"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "producer" => Ok(Role::Producer),
            "distributor" => Ok(Role::Distributor),
            "customer" => Ok(Role::Customer),
            _ => Err(format!("Unknown role: {}", s)),
        }
    }
}

/// A registered user
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub password_hash: String,
    pub role: Role,
}

impl User {
    pub fn new(id: UserId, username: &str, password_hash: String, role: Role) -> Self {
        Self {
            id,
            username: username.to_string(),
            password_hash,
            role,
        }
    }
}

/// Sign-up command
#[derive(Debug, Clone)]
pub struct SignUp {
    pub username: String,
    pub password: String,
    pub role: Role,
}

impl SignUp {
    pub fn validate(&self) -> Result<(), DomainError> {
        let username = self.username.trim();
        if username.is_empty() || username.len() > MAX_USERNAME_LEN {
            return Err(DomainError::Validation(format!(
                "Username must be between 1 and {} characters",
                MAX_USERNAME_LEN
            )));
        }
        if username != self.username {
            return Err(DomainError::Validation(
                "Username must not start or end with whitespace".to_string(),
            ));
        }
        if self.password.is_empty() {
            return Err(DomainError::Validation(
                "Password must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Sign-in command
#[derive(Debug, Clone)]
pub struct SignIn {
    pub username: String,
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sign_up(username: &str, password: &str) -> SignUp {
        SignUp {
            username: username.to_string(),
            password: password.to_string(),
            role: Role::Producer,
        }
    }

    #[test]
    fn role_round_trips_through_strings() {
        for role in [Role::Admin, Role::Producer, Role::Distributor, Role::Customer] {
            assert_eq!(role.to_string().parse::<Role>().unwrap(), role);
        }
        assert_eq!("ADMIN".parse::<Role>().unwrap(), Role::Admin);
        assert!("sommelier".parse::<Role>().is_err());
    }

    #[test]
    fn sign_up_requires_username_and_password() {
        assert!(sign_up("winemaker", "secret").validate().is_ok());
        assert!(sign_up("", "secret").validate().is_err());
        assert!(sign_up("winemaker", "").validate().is_err());
        assert!(sign_up(" winemaker", "secret").validate().is_err());
        assert!(sign_up(&"a".repeat(MAX_USERNAME_LEN + 1), "secret")
            .validate()
            .is_err());
    }
}
