//! Inventory service

use std::sync::Arc;

use crate::domain::entities::{Inventory, InventoryDetails, InventoryId};
use crate::domain::ports::{ChangeSet, InventoryRepository, UnitOfWork};
use crate::error::{AppError, DomainError};

pub struct InventoryService<IR, UW>
where
    IR: InventoryRepository + ?Sized,
    UW: UnitOfWork + ?Sized,
{
    inventories: Arc<IR>,
    unit_of_work: Arc<UW>,
}

impl<IR, UW> InventoryService<IR, UW>
where
    IR: InventoryRepository + ?Sized,
    UW: UnitOfWork + ?Sized,
{
    pub fn new(inventories: Arc<IR>, unit_of_work: Arc<UW>) -> Self {
        Self {
            inventories,
            unit_of_work,
        }
    }

    fn not_found(id: &InventoryId) -> AppError {
        DomainError::NotFound(format!("Inventory {} not found", id)).into()
    }

    pub async fn create(&self, details: InventoryDetails) -> Result<Inventory, AppError> {
        let id = self.inventories.next_id().await?;
        let item = Inventory::new(id, details)?;

        let mut changes = ChangeSet::new();
        changes.save(item.clone());
        self.unit_of_work.complete(changes).await?;

        tracing::info!(inventory_id = %item.id, product = %item.product_name, "Inventory created");
        Ok(item)
    }

    pub async fn update(
        &self,
        id: &InventoryId,
        details: InventoryDetails,
    ) -> Result<Inventory, AppError> {
        let mut item = self
            .inventories
            .find_by_id(id)
            .await?
            .ok_or_else(|| Self::not_found(id))?;

        item.update(details)?;

        let mut changes = ChangeSet::new();
        changes.save(item.clone());
        self.unit_of_work.complete(changes).await?;
        Ok(item)
    }

    pub async fn delete(&self, id: &InventoryId) -> Result<(), AppError> {
        if self.inventories.find_by_id(id).await?.is_none() {
            return Err(Self::not_found(id));
        }

        let mut changes = ChangeSet::new();
        changes.remove(*id);
        self.unit_of_work.complete(changes).await?;

        tracing::info!(inventory_id = %id, "Inventory deleted");
        Ok(())
    }

    pub async fn get(&self, id: &InventoryId) -> Result<Option<Inventory>, AppError> {
        Ok(self.inventories.find_by_id(id).await?)
    }

    pub async fn list(&self) -> Result<Vec<Inventory>, AppError> {
        Ok(self.inventories.list().await?)
    }
}
