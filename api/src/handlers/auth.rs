//! Authentication handlers
//!
//! Sign-up and sign-in endpoints. Both are rate limited per client IP when
//! the limiter is configured.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use crate::domain::entities::{Role, SignIn, SignUp};
use crate::error::AppError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct SignUpRequest {
    pub username: String,
    pub password: String,
    /// One of admin, producer, distributor, customer
    pub role: String,
}

#[derive(Debug, Deserialize)]
pub struct SignInRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct AuthenticatedUserResponse {
    pub id: i32,
    pub username: String,
    pub token: String,
}

/// POST /api/v1/authentication/sign-up
pub async fn sign_up(
    State(state): State<AppState>,
    Json(request): Json<SignUpRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    let role: Role = request.role.parse().map_err(AppError::BadRequest)?;

    state
        .identity_service
        .sign_up(SignUp {
            username: request.username,
            password: request.password,
            role,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "User created successfully".to_string(),
        }),
    ))
}

/// POST /api/v1/authentication/sign-in
///
/// Returns the user id and a signed access token.
pub async fn sign_in(
    State(state): State<AppState>,
    Json(request): Json<SignInRequest>,
) -> Result<Json<AuthenticatedUserResponse>, AppError> {
    let (user, token) = state
        .identity_service
        .sign_in(SignIn {
            username: request.username,
            password: request.password,
        })
        .await?;

    Ok(Json(AuthenticatedUserResponse {
        id: user.id.0,
        username: user.username,
        token,
    }))
}
