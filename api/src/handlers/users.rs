//! User handlers

use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::domain::entities::{User, UserId};
use crate::error::AppError;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i32,
    pub username: String,
    pub role: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.0,
            username: user.username,
            role: user.role.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UserQuery {
    pub username: Option<String>,
}

/// GET /api/v1/users
///
/// `?username=` narrows the list to that account, or to nothing.
pub async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    let users = match query.username {
        Some(username) => state
            .identity_service
            .get_user_by_username(&username)
            .await?
            .into_iter()
            .collect(),
        None => state.identity_service.list_users().await?,
    };
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Extract the access token from the Authorization header
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
}

/// GET /api/v1/authentication/me
///
/// Resolves the account behind a token issued at sign-in.
pub async fn current_user(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<UserResponse>, AppError> {
    let token = bearer_token(&headers).ok_or(AppError::Unauthorized)?;
    let claims = state.identity_service.verify_token(token)?;

    let user = state
        .identity_service
        .get_user(&claims.sub)
        .await?
        .ok_or(AppError::Unauthorized)?;

    Ok(Json(user.into()))
}

/// GET /api/v1/users/:id
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<UserResponse>, AppError> {
    let user = state
        .identity_service
        .get_user(&UserId(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))?;

    Ok(Json(user.into()))
}
