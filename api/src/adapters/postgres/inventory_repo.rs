//! PostgreSQL adapter for InventoryRepository

use async_trait::async_trait;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ConnectionTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};

use super::{db_err, ensure_deleted, next_val};
use crate::domain::entities::{Inventory, InventoryId};
use crate::domain::ports::InventoryRepository;
use crate::entity::inventories;
use crate::error::DomainError;

/// PostgreSQL implementation of InventoryRepository
pub struct PostgresInventoryRepository {
    db: DatabaseConnection,
}

impl PostgresInventoryRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl InventoryRepository for PostgresInventoryRepository {
    async fn next_id(&self) -> Result<InventoryId, DomainError> {
        Ok(InventoryId(next_val(&self.db, "inventories_id_seq").await?))
    }

    async fn find_by_id(&self, id: &InventoryId) -> Result<Option<Inventory>, DomainError> {
        let result = inventories::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(result.map(|m| m.into()))
    }

    async fn list(&self) -> Result<Vec<Inventory>, DomainError> {
        let results = inventories::Entity::find()
            .order_by_asc(inventories::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }
}

pub(super) async fn save<C: ConnectionTrait>(
    conn: &C,
    item: &Inventory,
) -> Result<(), DomainError> {
    let model = inventories::ActiveModel {
        id: Set(item.id.0),
        product_name: Set(item.product_name.clone()),
        wine_type: Set(item.wine_type.clone()),
        quantity: Set(item.quantity),
        unit_price: Set(item.unit_price),
        location: Set(item.location.clone()),
    };

    inventories::Entity::insert(model)
        .on_conflict(
            OnConflict::column(inventories::Column::Id)
                .update_columns([
                    inventories::Column::ProductName,
                    inventories::Column::WineType,
                    inventories::Column::Quantity,
                    inventories::Column::UnitPrice,
                    inventories::Column::Location,
                ])
                .to_owned(),
        )
        .exec_without_returning(conn)
        .await
        .map_err(db_err)?;

    Ok(())
}

pub(super) async fn remove<C: ConnectionTrait>(
    conn: &C,
    id: &InventoryId,
) -> Result<(), DomainError> {
    let result = inventories::Entity::delete_by_id(id.0)
        .exec(conn)
        .await
        .map_err(db_err)?;

    ensure_deleted(result.rows_affected, || format!("Inventory {} not found", id))
}

impl From<inventories::Model> for Inventory {
    fn from(model: inventories::Model) -> Self {
        Inventory {
            id: InventoryId(model.id),
            product_name: model.product_name,
            wine_type: model.wine_type,
            quantity: model.quantity,
            unit_price: model.unit_price,
            location: model.location,
        }
    }
}
