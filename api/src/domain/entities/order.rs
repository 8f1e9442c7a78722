//! Order domain entity
//!
//! An order placed on behalf of a profile.

use serde::{Deserialize, Serialize};

use super::profile::ProfileId;
use crate::error::DomainError;

/// Unique identifier for an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OrderId(pub i32);

impl From<i32> for OrderId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Order status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Shipped,
    Delivered,
    Cancelled,
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatus::Pending => write!(f, "pending"),
            OrderStatus::Confirmed => write!(f, "confirmed"),
            OrderStatus::Shipped => write!(f, "shipped"),
            OrderStatus::Delivered => write!(f, "delivered"),
            OrderStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(OrderStatus::Pending),
            "confirmed" => Ok(OrderStatus::Confirmed),
            "shipped" => Ok(OrderStatus::Shipped),
            "delivered" => Ok(OrderStatus::Delivered),
            "cancelled" | "canceled" => Ok(OrderStatus::Cancelled),
            _ => Err(format!("Unknown order status: {}", s)),
        }
    }
}

/// An order bound to a profile
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: OrderId,
    pub profile_id: ProfileId,
    pub status: OrderStatus,
    pub quantity: i32,
    pub total_price: f64,
    pub order_date: String,
}

/// Data needed to create a new order
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub quantity: i32,
    pub total_price: f64,
    pub order_date: String,
    /// Defaults to pending
    pub status: Option<OrderStatus>,
}

impl Order {
    pub fn new(id: OrderId, profile_id: ProfileId, command: &NewOrder) -> Result<Self, DomainError> {
        if command.quantity <= 0 {
            return Err(DomainError::Validation(
                "Quantity must be greater than zero".to_string(),
            ));
        }
        if command.total_price < 0.0 {
            return Err(DomainError::Validation(
                "Total price cannot be negative".to_string(),
            ));
        }

        Ok(Self {
            id,
            profile_id,
            status: command.status.unwrap_or(OrderStatus::Pending),
            quantity: command.quantity,
            total_price: command.total_price,
            order_date: command.order_date.clone(),
        })
    }

    pub fn update_status(&mut self, status: OrderStatus) {
        self.status = status;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command() -> NewOrder {
        NewOrder {
            quantity: 12,
            total_price: 540.0,
            order_date: "2024-03-01".to_string(),
            status: None,
        }
    }

    #[test]
    fn new_order_defaults_to_pending() {
        let order = Order::new(OrderId(1), ProfileId::new(), &command()).unwrap();
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.quantity, 12);
    }

    #[test]
    fn new_order_rejects_non_positive_quantity() {
        let mut cmd = command();
        cmd.quantity = 0;
        assert!(matches!(
            Order::new(OrderId(1), ProfileId::new(), &cmd),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn update_status_mutates_in_place() {
        let mut order = Order::new(OrderId(1), ProfileId::new(), &command()).unwrap();
        order.update_status(OrderStatus::Shipped);
        assert_eq!(order.status, OrderStatus::Shipped);
    }

    #[test]
    fn status_parsing() {
        assert_eq!("Delivered".parse::<OrderStatus>().unwrap(), OrderStatus::Delivered);
        assert_eq!("canceled".parse::<OrderStatus>().unwrap(), OrderStatus::Cancelled);
        assert!("lost".parse::<OrderStatus>().is_err());
        assert_eq!(OrderStatus::Confirmed.to_string(), "confirmed");
    }
}
