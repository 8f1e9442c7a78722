//! Inventory domain entity

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Unique identifier for an inventory item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InventoryId(pub i32);

impl From<i32> for InventoryId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for InventoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A stocked product line
#[derive(Debug, Clone, PartialEq)]
pub struct Inventory {
    pub id: InventoryId,
    pub product_name: String,
    pub wine_type: String,
    pub quantity: i32,
    pub unit_price: f64,
    pub location: String,
}

/// Fields accepted on create and update
#[derive(Debug, Clone, PartialEq)]
pub struct InventoryDetails {
    pub product_name: String,
    pub wine_type: String,
    pub quantity: i32,
    pub unit_price: f64,
    pub location: String,
}

impl InventoryDetails {
    fn validate(&self) -> Result<(), DomainError> {
        if self.product_name.trim().is_empty() {
            return Err(DomainError::Validation(
                "Product name is required".to_string(),
            ));
        }
        if self.quantity < 0 {
            return Err(DomainError::Validation(
                "Quantity cannot be negative".to_string(),
            ));
        }
        if self.unit_price < 0.0 {
            return Err(DomainError::Validation(
                "Unit price cannot be negative".to_string(),
            ));
        }
        Ok(())
    }
}

impl Inventory {
    pub fn new(id: InventoryId, details: InventoryDetails) -> Result<Self, DomainError> {
        details.validate()?;
        Ok(Self {
            id,
            product_name: details.product_name,
            wine_type: details.wine_type,
            quantity: details.quantity,
            unit_price: details.unit_price,
            location: details.location,
        })
    }

    pub fn update(&mut self, details: InventoryDetails) -> Result<(), DomainError> {
        *self = Self::new(self.id, details)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::inventory_details;

    #[test]
    fn rejects_negative_quantity() {
        let details = InventoryDetails {
            quantity: -5,
            ..inventory_details()
        };
        assert!(Inventory::new(InventoryId(1), details).is_err());
    }

    #[test]
    fn update_overwrites_fields() {
        let mut item = Inventory::new(InventoryId(7), inventory_details()).unwrap();
        let details = InventoryDetails {
            quantity: 10,
            location: "Cellar B".to_string(),
            ..inventory_details()
        };

        item.update(details).unwrap();

        assert_eq!(item.id, InventoryId(7));
        assert_eq!(item.quantity, 10);
        assert_eq!(item.location, "Cellar B");
    }
}
