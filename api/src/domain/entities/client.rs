//! Client domain entity
//!
//! Customer records kept by the customer management area.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Unique identifier for a client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClientId(pub i32);

impl From<i32> for ClientId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ClientId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Client {
    pub id: ClientId,
    pub person_name: String,
    pub dni: i64,
    pub email: String,
    pub business_name: String,
    pub phone: i64,
    pub address: String,
    pub country: String,
    pub city: String,
    pub ruc: i64,
}

/// Data needed to register a client
#[derive(Debug, Clone)]
pub struct NewClient {
    pub person_name: String,
    pub dni: i64,
    pub email: String,
    pub business_name: String,
    pub phone: i64,
    pub address: String,
    pub country: String,
    pub city: String,
    pub ruc: i64,
}

impl Client {
    pub fn new(id: ClientId, command: NewClient) -> Result<Self, DomainError> {
        if command.person_name.trim().is_empty() {
            return Err(DomainError::Validation(
                "Person name is required".to_string(),
            ));
        }
        if command.dni <= 0 || command.ruc < 0 || command.phone < 0 {
            return Err(DomainError::Validation(
                "DNI must be positive; phone and RUC cannot be negative".to_string(),
            ));
        }

        Ok(Self {
            id,
            person_name: command.person_name,
            dni: command.dni,
            email: command.email,
            business_name: command.business_name,
            phone: command.phone,
            address: command.address,
            country: command.country,
            city: command.city,
            ruc: command.ruc,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::new_client;

    #[test]
    fn builds_from_command() {
        let client = Client::new(ClientId(3), new_client()).unwrap();
        assert_eq!(client.id, ClientId(3));
        assert_eq!(client.business_name, "Distribuidora Sur");
    }

    #[test]
    fn rejects_missing_dni() {
        let command = NewClient {
            dni: 0,
            ..new_client()
        };
        assert!(matches!(
            Client::new(ClientId(1), command),
            Err(DomainError::Validation(_))
        ));
    }
}
