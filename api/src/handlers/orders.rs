//! Order handlers
//!
//! Orders are created under their profile; everything else is addressed by
//! order id.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::{NewOrder, Order, OrderId, OrderStatus, ProfileId};
use crate::error::AppError;
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub quantity: i32,
    pub total_price: f64,
    pub order_date: String,
    /// Defaults to pending
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateOrderStatusRequest {
    pub status: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub id: i32,
    pub profile_id: String,
    pub status: String,
    pub quantity: i32,
    pub total_price: f64,
    pub order_date: String,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.id.0,
            profile_id: order.profile_id.to_string(),
            status: order.status.to_string(),
            quantity: order.quantity,
            total_price: order.total_price,
            order_date: order.order_date,
        }
    }
}

fn parse_status(status: &str) -> Result<OrderStatus, AppError> {
    status.parse().map_err(AppError::BadRequest)
}

/// POST /api/v1/profiles/:profile_id/orders
///
/// Any failure, including a missing profile, is a 400.
pub async fn create_order(
    State(state): State<AppState>,
    Path(profile_id): Path<Uuid>,
    Json(request): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<OrderResponse>), AppError> {
    let status = request.status.as_deref().map(parse_status).transpose()?;
    let command = NewOrder {
        quantity: request.quantity,
        total_price: request.total_price,
        order_date: request.order_date,
        status,
    };

    let order = state
        .order_service
        .create_order(&ProfileId(profile_id), command)
        .await
        .map_err(AppError::into_bad_request)?;

    Ok((StatusCode::CREATED, Json(order.into())))
}

/// GET /api/v1/profiles/:profile_id/orders
pub async fn list_profile_orders(
    State(state): State<AppState>,
    Path(profile_id): Path<Uuid>,
) -> Result<Json<Vec<OrderResponse>>, AppError> {
    let orders = state
        .order_service
        .list_orders_by_profile(&ProfileId(profile_id))
        .await?;
    Ok(Json(orders.into_iter().map(OrderResponse::from).collect()))
}

/// GET /api/v1/orders
pub async fn list_orders(
    State(state): State<AppState>,
) -> Result<Json<Vec<OrderResponse>>, AppError> {
    let orders = state.order_service.list_orders().await?;
    Ok(Json(orders.into_iter().map(OrderResponse::from).collect()))
}

/// GET /api/v1/orders/:id
pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<OrderResponse>, AppError> {
    let order = state
        .order_service
        .get_order(&OrderId(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Order {} not found", id)))?;

    Ok(Json(order.into()))
}

/// PUT /api/v1/orders/:id/status
pub async fn update_order_status(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<UpdateOrderStatusRequest>,
) -> Result<Json<OrderResponse>, AppError> {
    let status = parse_status(&request.status)?;

    let order = state
        .order_service
        .update_order_status(&OrderId(id), status)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Order {} not found", id)))?;

    Ok(Json(order.into()))
}

/// DELETE /api/v1/orders/:id
pub async fn delete_order(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    state.order_service.delete_order(&OrderId(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
