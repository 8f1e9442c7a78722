//! Profile domain entity
//!
//! A customer or business identity. Name, email and address are value
//! objects validated at construction, each exposing a derived display string.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Unique identifier for a profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProfileId(pub Uuid);

impl ProfileId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ProfileId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for ProfileId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ProfileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonName {
    first_name: String,
    last_name: String,
}

impl PersonName {
    pub fn new(first_name: &str, last_name: &str) -> Result<Self, DomainError> {
        let first_name = first_name.trim();
        let last_name = last_name.trim();
        if first_name.is_empty() || last_name.is_empty() {
            return Err(DomainError::Validation(
                "First and last name are required".to_string(),
            ));
        }
        Ok(Self {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
        })
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is a valid regex")
    })
}

impl EmailAddress {
    pub fn new(address: &str) -> Result<Self, DomainError> {
        let address = address.trim();
        if !email_pattern().is_match(address) {
            return Err(DomainError::Validation(format!(
                "Invalid email address: {}",
                address
            )));
        }
        Ok(Self(address.to_string()))
    }

    pub fn address(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreetAddress {
    street: String,
    number: String,
    city: String,
    country: String,
}

impl StreetAddress {
    pub fn new(street: &str, number: &str, city: &str, country: &str) -> Result<Self, DomainError> {
        if street.trim().is_empty() || city.trim().is_empty() || country.trim().is_empty() {
            return Err(DomainError::Validation(
                "Street, city and country are required".to_string(),
            ));
        }
        Ok(Self {
            street: street.trim().to_string(),
            number: number.trim().to_string(),
            city: city.trim().to_string(),
            country: country.trim().to_string(),
        })
    }

    pub fn street(&self) -> &str {
        &self.street
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    /// "street number, city, country" with the number omitted when blank
    pub fn full_address(&self) -> String {
        if self.number.is_empty() {
            format!("{}, {}, {}", self.street, self.city, self.country)
        } else {
            format!(
                "{} {}, {}, {}",
                self.street, self.number, self.city, self.country
            )
        }
    }
}

/// A customer or business profile
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub id: ProfileId,
    pub name: PersonName,
    pub email: EmailAddress,
    pub address: StreetAddress,
    pub company_name: String,
    pub phone_number: String,
    /// Tax id (RUC)
    pub ruc: String,
}

/// Data needed to create or overwrite a profile
#[derive(Debug, Clone)]
pub struct NewProfile {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub company_name: String,
    pub phone_number: String,
    pub ruc: String,
    pub street: String,
    pub number: String,
    pub city: String,
    pub country: String,
}

impl Profile {
    pub fn create(command: &NewProfile) -> Result<Self, DomainError> {
        Self::build(ProfileId::new(), command)
    }

    /// Replace every field from the command, keeping the id
    pub fn update(&mut self, command: &NewProfile) -> Result<(), DomainError> {
        *self = Self::build(self.id, command)?;
        Ok(())
    }

    fn build(id: ProfileId, command: &NewProfile) -> Result<Self, DomainError> {
        Ok(Self {
            id,
            name: PersonName::new(&command.first_name, &command.last_name)?,
            email: EmailAddress::new(&command.email)?,
            address: StreetAddress::new(
                &command.street,
                &command.number,
                &command.city,
                &command.country,
            )?,
            company_name: command.company_name.trim().to_string(),
            phone_number: command.phone_number.trim().to_string(),
            ruc: command.ruc.trim().to_string(),
        })
    }

    pub fn full_name(&self) -> String {
        self.name.full_name()
    }

    pub fn email_address(&self) -> &str {
        self.email.address()
    }

    pub fn street_address(&self) -> String {
        self.address.full_address()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::new_profile;

    #[test]
    fn email_validation() {
        assert!(EmailAddress::new("ana@vinasur.pe").is_ok());
        assert!(EmailAddress::new("  ana@vinasur.pe ").is_ok());
        assert!(EmailAddress::new("ana.vinasur.pe").is_err());
        assert!(EmailAddress::new("ana@").is_err());
        assert!(EmailAddress::new("").is_err());
    }

    #[test]
    fn full_address_formatting() {
        let address = StreetAddress::new("Av. Grau", "120", "Ica", "Peru").unwrap();
        assert_eq!(address.full_address(), "Av. Grau 120, Ica, Peru");

        let address = StreetAddress::new("Fundo El Olivar", "", "Ica", "Peru").unwrap();
        assert_eq!(address.full_address(), "Fundo El Olivar, Ica, Peru");
    }

    #[test]
    fn create_profile_derives_display_fields() {
        let profile = Profile::create(&new_profile()).unwrap();

        assert_eq!(profile.full_name(), "Ana Torres");
        assert_eq!(profile.email_address(), "ana@vinasur.pe");
        assert_eq!(profile.street_address(), "Av. Grau 120, Ica, Peru");
    }

    #[test]
    fn create_profile_rejects_missing_name() {
        let mut command = new_profile();
        command.last_name = "  ".to_string();

        let result = Profile::create(&command);

        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn update_keeps_id_and_replaces_fields() {
        let mut profile = Profile::create(&new_profile()).unwrap();
        let id = profile.id;

        let mut command = new_profile();
        command.company_name = "Bodega Nueva".to_string();
        command.email = "contacto@bodeganueva.pe".to_string();
        profile.update(&command).unwrap();

        assert_eq!(profile.id, id);
        assert_eq!(profile.company_name, "Bodega Nueva");
        assert_eq!(profile.email_address(), "contacto@bodeganueva.pe");
    }

    #[test]
    fn failed_update_leaves_profile_untouched() {
        let mut profile = Profile::create(&new_profile()).unwrap();
        let before = profile.clone();

        let mut command = new_profile();
        command.email = "not-an-email".to_string();

        assert!(profile.update(&command).is_err());
        assert_eq!(profile, before);
    }
}
