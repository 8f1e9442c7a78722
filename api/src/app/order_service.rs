//! Order service
//!
//! Orders are always placed against an existing profile.

use std::sync::Arc;

use crate::domain::entities::{NewOrder, Order, OrderId, OrderStatus, ProfileId};
use crate::domain::ports::{ChangeSet, OrderRepository, ProfileRepository, UnitOfWork};
use crate::error::{AppError, DomainError};

pub struct OrderService<OR, PR, UW>
where
    OR: OrderRepository + ?Sized,
    PR: ProfileRepository + ?Sized,
    UW: UnitOfWork + ?Sized,
{
    orders: Arc<OR>,
    profiles: Arc<PR>,
    unit_of_work: Arc<UW>,
}

impl<OR, PR, UW> OrderService<OR, PR, UW>
where
    OR: OrderRepository + ?Sized,
    PR: ProfileRepository + ?Sized,
    UW: UnitOfWork + ?Sized,
{
    pub fn new(orders: Arc<OR>, profiles: Arc<PR>, unit_of_work: Arc<UW>) -> Self {
        Self {
            orders,
            profiles,
            unit_of_work,
        }
    }

    /// Place an order for a profile
    ///
    /// The profile check runs before the order fields are looked at, so a
    /// missing profile is reported regardless of the command's contents.
    pub async fn create_order(
        &self,
        profile_id: &ProfileId,
        command: NewOrder,
    ) -> Result<Order, AppError> {
        if self.profiles.find_by_id(profile_id).await?.is_none() {
            return Err(AppError::Domain(DomainError::NotFound(format!(
                "Profile {} not found",
                profile_id
            ))));
        }

        let id = self.orders.next_id().await?;
        let order = Order::new(id, *profile_id, &command)?;

        let mut changes = ChangeSet::new();
        changes.save(order.clone());
        self.unit_of_work.complete(changes).await?;

        tracing::info!(order_id = %order.id, profile_id = %profile_id, "Order created");
        Ok(order)
    }

    /// Change an order's status; `None` when the order does not exist
    pub async fn update_order_status(
        &self,
        id: &OrderId,
        status: OrderStatus,
    ) -> Result<Option<Order>, AppError> {
        let Some(mut order) = self.orders.find_by_id(id).await? else {
            return Ok(None);
        };

        order.update_status(status);

        let mut changes = ChangeSet::new();
        changes.save(order.clone());
        self.unit_of_work.complete(changes).await?;

        tracing::info!(order_id = %id, status = %status, "Order status updated");
        Ok(Some(order))
    }

    pub async fn delete_order(&self, id: &OrderId) -> Result<Order, AppError> {
        let order = self
            .orders
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Order {} not found", id)))?;

        let mut changes = ChangeSet::new();
        changes.remove(order.id);
        self.unit_of_work.complete(changes).await?;

        Ok(order)
    }

    pub async fn get_order(&self, id: &OrderId) -> Result<Option<Order>, AppError> {
        Ok(self.orders.find_by_id(id).await?)
    }

    pub async fn list_orders(&self) -> Result<Vec<Order>, AppError> {
        Ok(self.orders.list().await?)
    }

    pub async fn list_orders_by_profile(
        &self,
        profile_id: &ProfileId,
    ) -> Result<Vec<Order>, AppError> {
        Ok(self.orders.find_by_profile(profile_id).await?)
    }
}
