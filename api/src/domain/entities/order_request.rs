//! Order request domain entity
//!
//! A purchase request between a consumer and a producer, carrying the
//! commercial terms as free-form text.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Unique identifier for an order request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OrderRequestId(pub i32);

impl From<i32> for OrderRequestId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for OrderRequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Every writable field of an order request. Used for both create and full update.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OrderRequestDetails {
    pub quantity: i32,
    pub price: i32,
    pub status: String,
    pub order_number: String,
    pub order_date: String,
    pub transport_condition: String,
    pub payment_method: String,
    pub consumer_phone: String,
    pub producer_phone: String,
    pub payment_terms: String,
    pub date: String,
    pub delivery_date: String,
    pub request_type: String,
}

impl OrderRequestDetails {
    fn validate(&self) -> Result<(), DomainError> {
        if self.quantity < 0 || self.price < 0 {
            return Err(DomainError::Validation(
                "Quantity and price cannot be negative".to_string(),
            ));
        }
        if self.order_number.trim().is_empty() {
            return Err(DomainError::Validation(
                "Order number is required".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderRequest {
    pub id: OrderRequestId,
    pub details: OrderRequestDetails,
}

impl OrderRequest {
    pub fn new(id: OrderRequestId, details: OrderRequestDetails) -> Result<Self, DomainError> {
        details.validate()?;
        Ok(Self { id, details })
    }

    pub fn update_status(&mut self, status: &str) {
        self.details.status = status.to_string();
    }

    pub fn update(&mut self, details: OrderRequestDetails) -> Result<(), DomainError> {
        details.validate()?;
        self.details = details;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::order_request_details;

    #[test]
    fn requires_order_number() {
        let mut details = order_request_details();
        details.order_number = " ".to_string();
        assert!(OrderRequest::new(OrderRequestId(1), details).is_err());
    }

    #[test]
    fn update_replaces_every_field() {
        let mut request = OrderRequest::new(OrderRequestId(1), order_request_details()).unwrap();
        let details = OrderRequestDetails {
            quantity: 3,
            price: 90,
            status: "approved".to_string(),
            order_number: "OR-2".to_string(),
            ..OrderRequestDetails::default()
        };

        request.update(details.clone()).unwrap();

        assert_eq!(request.details, details);
    }

    #[test]
    fn rejected_update_keeps_previous_details() {
        let mut request = OrderRequest::new(OrderRequestId(1), order_request_details()).unwrap();
        let bad = OrderRequestDetails {
            quantity: -1,
            ..order_request_details()
        };

        assert!(request.update(bad).is_err());
        assert_eq!(request.details, order_request_details());
    }
}
