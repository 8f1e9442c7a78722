//! Profile handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::{NewProfile, Profile, ProfileId};
use crate::error::AppError;
use crate::AppState;

/// Body for creating or replacing a profile
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub company_name: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub ruc: String,
    pub street: String,
    #[serde(default)]
    pub number: String,
    pub city: String,
    pub country: String,
}

impl From<ProfileRequest> for NewProfile {
    fn from(request: ProfileRequest) -> Self {
        NewProfile {
            first_name: request.first_name,
            last_name: request.last_name,
            email: request.email,
            company_name: request.company_name,
            phone_number: request.phone_number,
            ruc: request.ruc,
            street: request.street,
            number: request.number,
            city: request.city,
            country: request.country,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub street_address: String,
    pub company_name: String,
    pub phone_number: String,
    pub ruc: String,
}

impl From<Profile> for ProfileResponse {
    fn from(profile: Profile) -> Self {
        Self {
            id: profile.id.to_string(),
            full_name: profile.full_name(),
            email: profile.email_address().to_string(),
            street_address: profile.street_address(),
            company_name: profile.company_name,
            phone_number: profile.phone_number,
            ruc: profile.ruc,
        }
    }
}

/// POST /api/v1/profiles
pub async fn create_profile(
    State(state): State<AppState>,
    Json(request): Json<ProfileRequest>,
) -> Result<(StatusCode, Json<ProfileResponse>), AppError> {
    let profile = state
        .profile_service
        .create_profile(request.into())
        .await?;

    Ok((StatusCode::CREATED, Json(profile.into())))
}

/// GET /api/v1/profiles
pub async fn list_profiles(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProfileResponse>>, AppError> {
    let profiles = state.profile_service.list_profiles().await?;
    Ok(Json(profiles.into_iter().map(ProfileResponse::from).collect()))
}

/// GET /api/v1/profiles/:profile_id
pub async fn get_profile(
    State(state): State<AppState>,
    Path(profile_id): Path<Uuid>,
) -> Result<Json<ProfileResponse>, AppError> {
    let profile = state
        .profile_service
        .get_profile(&ProfileId(profile_id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Profile {} not found", profile_id)))?;

    Ok(Json(profile.into()))
}

/// PUT /api/v1/profiles/:profile_id
pub async fn update_profile(
    State(state): State<AppState>,
    Path(profile_id): Path<Uuid>,
    Json(request): Json<ProfileRequest>,
) -> Result<Json<ProfileResponse>, AppError> {
    let profile = state
        .profile_service
        .update_profile(&ProfileId(profile_id), request.into())
        .await?;

    Ok(Json(profile.into()))
}
