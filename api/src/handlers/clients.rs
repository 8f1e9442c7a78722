//! Client handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::domain::entities::{Client, ClientId, NewClient};
use crate::error::AppError;
use crate::AppState;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientBody {
    pub person_name: String,
    pub dni: i64,
    pub email: String,
    pub business_name: String,
    pub phone: i64,
    pub address: String,
    pub country: String,
    pub city: String,
    pub ruc: i64,
}

impl From<ClientBody> for NewClient {
    fn from(body: ClientBody) -> Self {
        NewClient {
            person_name: body.person_name,
            dni: body.dni,
            email: body.email,
            business_name: body.business_name,
            phone: body.phone,
            address: body.address,
            country: body.country,
            city: body.city,
            ruc: body.ruc,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ClientResponse {
    pub id: i32,
    #[serde(flatten)]
    pub body: ClientBody,
}

impl From<Client> for ClientResponse {
    fn from(client: Client) -> Self {
        Self {
            id: client.id.0,
            body: ClientBody {
                person_name: client.person_name,
                dni: client.dni,
                email: client.email,
                business_name: client.business_name,
                phone: client.phone,
                address: client.address,
                country: client.country,
                city: client.city,
                ruc: client.ruc,
            },
        }
    }
}

/// POST /api/v1/clients
pub async fn create_client(
    State(state): State<AppState>,
    Json(body): Json<ClientBody>,
) -> Result<(StatusCode, Json<ClientResponse>), AppError> {
    let client = state.client_service.create(body.into()).await?;
    Ok((StatusCode::CREATED, Json(client.into())))
}

/// GET /api/v1/clients
pub async fn list_clients(
    State(state): State<AppState>,
) -> Result<Json<Vec<ClientResponse>>, AppError> {
    let clients = state.client_service.list().await?;
    Ok(Json(clients.into_iter().map(ClientResponse::from).collect()))
}

/// GET /api/v1/clients/:id
pub async fn get_client(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ClientResponse>, AppError> {
    let client = state
        .client_service
        .get(&ClientId(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Client {} not found", id)))?;

    Ok(Json(client.into()))
}

/// DELETE /api/v1/clients/:id
pub async fn delete_client(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    state.client_service.delete(&ClientId(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
