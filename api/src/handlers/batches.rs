//! Batch handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::domain::entities::{Batch, BatchId, NewBatch, StageKind};
use crate::error::AppError;
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBatchRequest {
    pub vineyard_code: String,
    pub grape_variety: String,
    pub harvest_campaign: String,
    pub reception_date: String,
    pub initial_grape_quantity_kg: f64,
    pub created_by: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchResponse {
    pub id: i32,
    pub vineyard_code: String,
    pub grape_variety: String,
    pub harvest_campaign: String,
    pub reception_date: String,
    pub initial_grape_quantity_kg: f64,
    pub created_by: String,
    /// Recorded stages in process order
    pub stages: Vec<StageKind>,
    pub current_stage: Option<StageKind>,
}

impl From<Batch> for BatchResponse {
    fn from(batch: Batch) -> Self {
        let stages = batch.stages().map(|record| record.kind()).collect();
        let current_stage = batch.latest_stage();
        Self {
            id: batch.id.0,
            vineyard_code: batch.vineyard_code,
            grape_variety: batch.grape_variety,
            harvest_campaign: batch.harvest_campaign,
            reception_date: batch.reception_date,
            initial_grape_quantity_kg: batch.initial_grape_quantity_kg,
            created_by: batch.created_by,
            stages,
            current_stage,
        }
    }
}

/// POST /api/v1/batches
pub async fn create_batch(
    State(state): State<AppState>,
    Json(request): Json<CreateBatchRequest>,
) -> Result<(StatusCode, Json<BatchResponse>), AppError> {
    let batch = state
        .batch_service
        .create_batch(NewBatch {
            vineyard_code: request.vineyard_code,
            grape_variety: request.grape_variety,
            harvest_campaign: request.harvest_campaign,
            reception_date: request.reception_date,
            initial_grape_quantity_kg: request.initial_grape_quantity_kg,
            created_by: request.created_by,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(batch.into())))
}

/// GET /api/v1/batches
pub async fn list_batches(
    State(state): State<AppState>,
) -> Result<Json<Vec<BatchResponse>>, AppError> {
    let batches = state.batch_service.list_batches().await?;
    Ok(Json(batches.into_iter().map(BatchResponse::from).collect()))
}

/// GET /api/v1/batches/:id
pub async fn get_batch(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<BatchResponse>, AppError> {
    let batch = state
        .batch_service
        .get_batch(&BatchId(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Batch {} not found", id)))?;

    Ok(Json(batch.into()))
}

/// DELETE /api/v1/batches/:id
pub async fn delete_batch(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    state.batch_service.delete_batch(&BatchId(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
