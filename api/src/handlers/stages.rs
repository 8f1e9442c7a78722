//! Winemaking process handlers
//!
//! One set of handlers serves all four stages. The `:stage` path segment
//! selects the kind and decides how the JSON body is decoded.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use serde_json::Value;

use crate::domain::entities::{BatchId, StageKind, StageRecord};
use crate::error::AppError;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct DeleteStageResponse {
    pub title: String,
    pub message: String,
}

fn parse_kind(stage: &str) -> Result<StageKind, AppError> {
    stage.parse().map_err(AppError::BadRequest)
}

/// The record's fields plus the owning batch id
fn stage_body(batch_id: BatchId, record: &StageRecord) -> Value {
    let mut body = record.to_json();
    if let Value::Object(fields) = &mut body {
        fields.insert("batchId".to_string(), Value::from(batch_id.0));
    }
    body
}

/// GET /api/v1/winemakingProcess/batch/:batch_id/:stage
pub async fn get_stage(
    State(state): State<AppState>,
    Path((batch_id, stage)): Path<(i32, String)>,
) -> Result<Json<Value>, AppError> {
    let kind = parse_kind(&stage)?;
    let batch_id = BatchId(batch_id);

    let record = state
        .batch_service
        .get_stage(&batch_id, kind)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("{} for batch {} not found", kind.title(), batch_id))
        })?;

    Ok(Json(stage_body(batch_id, &record)))
}

/// POST /api/v1/winemakingProcess/:batch_id/:stage
///
/// A missing batch or an existing record of the same kind is a 400.
pub async fn add_stage(
    State(state): State<AppState>,
    Path((batch_id, stage)): Path<(i32, String)>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let kind = parse_kind(&stage)?;
    let batch_id = BatchId(batch_id);
    let record = StageRecord::from_json(kind, body)?;

    let added = state
        .batch_service
        .add_stage(&batch_id, record)
        .await
        .map_err(AppError::into_bad_request)?;

    let location = format!("/api/v1/winemakingProcess/batch/{}/{}", batch_id, kind);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(stage_body(batch_id, &added)),
    ))
}

/// PUT /api/v1/winemakingProcess/:batch_id/:stage
///
/// A missing batch or stage is a 404 even when the body would not decode.
pub async fn update_stage(
    State(state): State<AppState>,
    Path((batch_id, stage)): Path<(i32, String)>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, AppError> {
    let kind = parse_kind(&stage)?;
    let batch_id = BatchId(batch_id);

    if state.batch_service.get_stage(&batch_id, kind).await?.is_none() {
        return Err(AppError::NotFound(format!(
            "{} for batch {} not found",
            kind.title(),
            batch_id
        )));
    }
    let record = StageRecord::from_json(kind, body)?;

    let updated = state.batch_service.update_stage(&batch_id, record).await?;

    Ok(Json(stage_body(batch_id, &updated)))
}

/// DELETE /api/v1/winemakingProcess/:batch_id/:stage
pub async fn delete_stage(
    State(state): State<AppState>,
    Path((batch_id, stage)): Path<(i32, String)>,
) -> Result<Json<DeleteStageResponse>, AppError> {
    let kind = parse_kind(&stage)?;
    let batch_id = BatchId(batch_id);

    state.batch_service.delete_stage(&batch_id, kind).await?;

    Ok(Json(DeleteStageResponse {
        title: format!("Delete {}", kind.title()),
        message: format!(
            "{} for batch {} was successfully deleted",
            kind.title(),
            batch_id
        ),
    }))
}
