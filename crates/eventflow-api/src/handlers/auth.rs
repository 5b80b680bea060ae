// ============================================================================
// EventFlow API - Auth Handlers
// File: crates/eventflow-api/src/handlers/auth.rs
// ============================================================================
//! Authentication HTTP handlers (register, login, profile)

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use eventflow_core::domain::UserView;

use crate::dto::{
    AuthResponse, LoginRequest, ProfileResponse, RegisterRequest, UpdateProfileRequest,
};
use crate::error::ApiError;
use crate::middleware::{ApiJson, AuthUser};
use crate::state::AppState;

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let result = state.auth.register(payload.into()).await?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            message: "User registered successfully".to_string(),
            user: UserView::from(&result.user),
            access_token: result.access_token,
        }),
    ))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let result = state
        .auth
        .login(payload.email, payload.password, payload.role)
        .await?;

    Ok(Json(AuthResponse {
        message: "Login successful".to_string(),
        user: UserView::from(&result.user),
        access_token: result.access_token,
    }))
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<UserView>, ApiError> {
    let user = state.auth.current_user(&auth.user_id).await?;
    Ok(Json(UserView::from(&user)))
}

/// PUT /api/auth/update-profile
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(payload): ApiJson<UpdateProfileRequest>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let user = state
        .auth
        .update_profile(&auth.user_id, payload.into())
        .await?;

    Ok(Json(ProfileResponse {
        message: "Profile updated successfully".to_string(),
        user: UserView::from(&user),
    }))
}
