//! Order request handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::domain::entities::{OrderRequest, OrderRequestDetails, OrderRequestId};
use crate::error::AppError;
use crate::AppState;

/// Every editable field of an order request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequestBody {
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
    #[serde(rename = "type")]
    pub request_type: String,
}

impl From<OrderRequestBody> for OrderRequestDetails {
    fn from(body: OrderRequestBody) -> Self {
        OrderRequestDetails {
            quantity: body.quantity,
            price: body.price,
            status: body.status,
            order_number: body.order_number,
            order_date: body.order_date,
            transport_condition: body.transport_condition,
            payment_method: body.payment_method,
            consumer_phone: body.consumer_phone,
            producer_phone: body.producer_phone,
            payment_terms: body.payment_terms,
            date: body.date,
            delivery_date: body.delivery_date,
            request_type: body.request_type,
        }
    }
}

impl From<OrderRequestDetails> for OrderRequestBody {
    fn from(details: OrderRequestDetails) -> Self {
        OrderRequestBody {
            quantity: details.quantity,
            price: details.price,
            status: details.status,
            order_number: details.order_number,
            order_date: details.order_date,
            transport_condition: details.transport_condition,
            payment_method: details.payment_method,
            consumer_phone: details.consumer_phone,
            producer_phone: details.producer_phone,
            payment_terms: details.payment_terms,
            date: details.date,
            delivery_date: details.delivery_date,
            request_type: details.request_type,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct OrderRequestResponse {
    pub id: i32,
    #[serde(flatten)]
    pub body: OrderRequestBody,
}

impl From<OrderRequest> for OrderRequestResponse {
    fn from(request: OrderRequest) -> Self {
        Self {
            id: request.id.0,
            body: request.details.into(),
        }
    }
}

/// POST /api/v1/order-requests
pub async fn create_order_request(
    State(state): State<AppState>,
    Json(body): Json<OrderRequestBody>,
) -> Result<(StatusCode, Json<OrderRequestResponse>), AppError> {
    let request = state.order_request_service.create(body.into()).await?;
    Ok((StatusCode::CREATED, Json(request.into())))
}

/// GET /api/v1/order-requests
pub async fn list_order_requests(
    State(state): State<AppState>,
) -> Result<Json<Vec<OrderRequestResponse>>, AppError> {
    let requests = state.order_request_service.list().await?;
    Ok(Json(
        requests.into_iter().map(OrderRequestResponse::from).collect(),
    ))
}

/// GET /api/v1/order-requests/:id
pub async fn get_order_request(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<OrderRequestResponse>, AppError> {
    let request = state
        .order_request_service
        .get(&OrderRequestId(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Order request {} not found", id)))?;

    Ok(Json(request.into()))
}

/// PUT /api/v1/order-requests/:id
pub async fn update_order_request(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<OrderRequestBody>,
) -> Result<Json<OrderRequestResponse>, AppError> {
    let request = state
        .order_request_service
        .update(&OrderRequestId(id), body.into())
        .await?;
    Ok(Json(request.into()))
}

/// PUT /api/v1/order-requests/:id/status
pub async fn update_order_request_status(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<OrderRequestResponse>, AppError> {
    let updated = state
        .order_request_service
        .update_status(&OrderRequestId(id), &request.status)
        .await?;
    Ok(Json(updated.into()))
}

/// DELETE /api/v1/order-requests/:id
pub async fn delete_order_request(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    state
        .order_request_service
        .delete(&OrderRequestId(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
