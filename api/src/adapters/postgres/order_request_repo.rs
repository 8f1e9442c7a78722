//! PostgreSQL adapter for OrderRequestRepository

use async_trait::async_trait;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ConnectionTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};

use super::{db_err, ensure_deleted, next_val};
use crate::domain::entities::{OrderRequest, OrderRequestDetails, OrderRequestId};
use crate::domain::ports::OrderRequestRepository;
use crate::entity::order_requests;
use crate::error::DomainError;

/// PostgreSQL implementation of OrderRequestRepository
pub struct PostgresOrderRequestRepository {
    db: DatabaseConnection,
}

impl PostgresOrderRequestRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OrderRequestRepository for PostgresOrderRequestRepository {
    async fn next_id(&self) -> Result<OrderRequestId, DomainError> {
        Ok(OrderRequestId(
            next_val(&self.db, "order_requests_id_seq").await?,
        ))
    }

    async fn find_by_id(&self, id: &OrderRequestId) -> Result<Option<OrderRequest>, DomainError> {
        let result = order_requests::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(result.map(|m| m.into()))
    }

    async fn list(&self) -> Result<Vec<OrderRequest>, DomainError> {
        let results = order_requests::Entity::find()
            .order_by_asc(order_requests::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }
}

pub(super) async fn save<C: ConnectionTrait>(
    conn: &C,
    request: &OrderRequest,
) -> Result<(), DomainError> {
    let d = &request.details;
    let model = order_requests::ActiveModel {
        id: Set(request.id.0),
        quantity: Set(d.quantity),
        price: Set(d.price),
        status: Set(d.status.clone()),
        order_number: Set(d.order_number.clone()),
        order_date: Set(d.order_date.clone()),
        transport_condition: Set(d.transport_condition.clone()),
        payment_method: Set(d.payment_method.clone()),
        consumer_phone: Set(d.consumer_phone.clone()),
        producer_phone: Set(d.producer_phone.clone()),
        payment_terms: Set(d.payment_terms.clone()),
        date: Set(d.date.clone()),
        delivery_date: Set(d.delivery_date.clone()),
        request_type: Set(d.request_type.clone()),
    };

    order_requests::Entity::insert(model)
        .on_conflict(
            OnConflict::column(order_requests::Column::Id)
                .update_columns([
                    order_requests::Column::Quantity,
                    order_requests::Column::Price,
                    order_requests::Column::Status,
                    order_requests::Column::OrderNumber,
                    order_requests::Column::OrderDate,
                    order_requests::Column::TransportCondition,
                    order_requests::Column::PaymentMethod,
                    order_requests::Column::ConsumerPhone,
                    order_requests::Column::ProducerPhone,
                    order_requests::Column::PaymentTerms,
                    order_requests::Column::Date,
                    order_requests::Column::DeliveryDate,
                    order_requests::Column::RequestType,
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
    id: &OrderRequestId,
) -> Result<(), DomainError> {
    let result = order_requests::Entity::delete_by_id(id.0)
        .exec(conn)
        .await
        .map_err(db_err)?;

    ensure_deleted(result.rows_affected, || {
        format!("Order request {} not found", id)
    })
}

/// Convert SeaORM model to domain entity
impl From<order_requests::Model> for OrderRequest {
    fn from(model: order_requests::Model) -> Self {
        OrderRequest {
            id: OrderRequestId(model.id),
            details: OrderRequestDetails {
                quantity: model.quantity,
                price: model.price,
                status: model.status,
                order_number: model.order_number,
                order_date: model.order_date,
                transport_condition: model.transport_condition,
                payment_method: model.payment_method,
                consumer_phone: model.consumer_phone,
                producer_phone: model.producer_phone,
                payment_terms: model.payment_terms,
                date: model.date,
                delivery_date: model.delivery_date,
                request_type: model.request_type,
            },
        }
    }
}
