//! PostgreSQL adapter for OrderRepository

use async_trait::async_trait;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use super::{db_err, ensure_deleted, next_val};
use crate::domain::entities::{Order, OrderId, OrderStatus, ProfileId};
use crate::domain::ports::OrderRepository;
use crate::entity::orders;
use crate::error::DomainError;

/// PostgreSQL implementation of OrderRepository
pub struct PostgresOrderRepository {
    db: DatabaseConnection,
}

impl PostgresOrderRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OrderRepository for PostgresOrderRepository {
    async fn next_id(&self) -> Result<OrderId, DomainError> {
        Ok(OrderId(next_val(&self.db, "orders_id_seq").await?))
    }

    async fn find_by_id(&self, id: &OrderId) -> Result<Option<Order>, DomainError> {
        let result = orders::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(result.map(|m| m.into()))
    }

    async fn find_by_profile(&self, profile_id: &ProfileId) -> Result<Vec<Order>, DomainError> {
        let results = orders::Entity::find()
            .filter(orders::Column::ProfileId.eq(profile_id.0))
            .order_by_asc(orders::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn list(&self) -> Result<Vec<Order>, DomainError> {
        let results = orders::Entity::find()
            .order_by_asc(orders::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }
}

pub(super) async fn save<C: ConnectionTrait>(conn: &C, order: &Order) -> Result<(), DomainError> {
    let model = orders::ActiveModel {
        id: Set(order.id.0),
        profile_id: Set(order.profile_id.0),
        status: Set(order.status.to_string()),
        quantity: Set(order.quantity),
        total_price: Set(order.total_price),
        order_date: Set(order.order_date.clone()),
    };

    orders::Entity::insert(model)
        .on_conflict(
            OnConflict::column(orders::Column::Id)
                .update_columns([
                    orders::Column::ProfileId,
                    orders::Column::Status,
                    orders::Column::Quantity,
                    orders::Column::TotalPrice,
                    orders::Column::OrderDate,
                ])
                .to_owned(),
        )
        .exec_without_returning(conn)
        .await
        .map_err(db_err)?;

    Ok(())
}

pub(super) async fn remove<C: ConnectionTrait>(conn: &C, id: &OrderId) -> Result<(), DomainError> {
    let result = orders::Entity::delete_by_id(id.0)
        .exec(conn)
        .await
        .map_err(db_err)?;

    ensure_deleted(result.rows_affected, || format!("Order {} not found", id))
}

/// Convert SeaORM model to domain entity
impl From<orders::Model> for Order {
    fn from(model: orders::Model) -> Self {
        Order {
            id: OrderId(model.id),
            profile_id: ProfileId(model.profile_id),
            status: model.status.parse().unwrap_or(OrderStatus::Pending),
            quantity: model.quantity,
            total_price: model.total_price,
            order_date: model.order_date,
        }
    }
}
