//! Inventory handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::domain::entities::{Inventory, InventoryDetails, InventoryId};
use crate::error::AppError;
use crate::AppState;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryBody {
    pub product_name: String,
    pub wine_type: String,
    pub quantity: i32,
    pub unit_price: f64,
    pub location: String,
}

impl From<InventoryBody> for InventoryDetails {
    fn from(body: InventoryBody) -> Self {
        InventoryDetails {
            product_name: body.product_name,
            wine_type: body.wine_type,
            quantity: body.quantity,
            unit_price: body.unit_price,
            location: body.location,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct InventoryResponse {
    pub id: i32,
    #[serde(flatten)]
    pub body: InventoryBody,
}

impl From<Inventory> for InventoryResponse {
    fn from(item: Inventory) -> Self {
        Self {
            id: item.id.0,
            body: InventoryBody {
                product_name: item.product_name,
                wine_type: item.wine_type,
                quantity: item.quantity,
                unit_price: item.unit_price,
                location: item.location,
            },
        }
    }
}

/// POST /api/v1/inventories
pub async fn create_inventory(
    State(state): State<AppState>,
    Json(body): Json<InventoryBody>,
) -> Result<(StatusCode, Json<InventoryResponse>), AppError> {
    let item = state.inventory_service.create(body.into()).await?;
    Ok((StatusCode::CREATED, Json(item.into())))
}

/// GET /api/v1/inventories
pub async fn list_inventories(
    State(state): State<AppState>,
) -> Result<Json<Vec<InventoryResponse>>, AppError> {
    let items = state.inventory_service.list().await?;
    Ok(Json(items.into_iter().map(InventoryResponse::from).collect()))
}

/// GET /api/v1/inventories/:id
pub async fn get_inventory(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<InventoryResponse>, AppError> {
    let item = state
        .inventory_service
        .get(&InventoryId(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Inventory {} not found", id)))?;

    Ok(Json(item.into()))
}

/// PUT /api/v1/inventories/:id
pub async fn update_inventory(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<InventoryBody>,
) -> Result<Json<InventoryResponse>, AppError> {
    let item = state
        .inventory_service
        .update(&InventoryId(id), body.into())
        .await?;
    Ok(Json(item.into()))
}

/// DELETE /api/v1/inventories/:id
pub async fn delete_inventory(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    state.inventory_service.delete(&InventoryId(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
