//! Authentication extractors
//!
//! The principal is resolved once at the HTTP boundary and threaded into
//! handlers as an explicit value, never as ambient state:
//!
//! - [`AuthUser`] validates the bearer token and carries the principal id.
//! - [`RequireAdmin`] additionally loads the account and requires the
//!   admin role.
//! - [`RequireVendor`] is the vendor-portal counterpart.
//!
//! The three 401 bodies are distinguishable so clients can tell a missing
//! header from a garbage token from an expired session.

use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};
use uuid::Uuid;

use eventflow_core::domain::{User, UserRole};
use eventflow_core::repositories::UserRepository;
use eventflow_security::jwt::JwtError;

use crate::error::ApiError;
use crate::state::AppState;

const MISSING_TOKEN: &str = "Missing authorization token";
const INVALID_TOKEN: &str = "Invalid token";
const TOKEN_EXPIRED: &str = "Token has expired";
const ACCESS_DENIED: &str = "Access denied";

/// Authenticated principal id, extracted from `Authorization: Bearer <jwt>`.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
}

fn bearer_token(parts: &Parts) -> Result<String, ApiError> {
    let header_value = parts
        .headers
        .get(header::AUTHORIZATION)
        .ok_or_else(|| ApiError::unauthorized(MISSING_TOKEN))?;

    let raw = header_value
        .to_str()
        .map_err(|_| ApiError::unauthorized(INVALID_TOKEN))?;
    let token = raw
        .strip_prefix("Bearer ")
        .ok_or_else(|| ApiError::unauthorized(INVALID_TOKEN))?;
    if token.is_empty() {
        return Err(ApiError::unauthorized(INVALID_TOKEN));
    }

    Ok(token.to_string())
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;

        let claims = state.jwt.validate_token(&token).map_err(|e| match e {
            JwtError::TokenExpired => ApiError::unauthorized(TOKEN_EXPIRED),
            _ => ApiError::unauthorized(INVALID_TOKEN),
        })?;

        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| ApiError::unauthorized(INVALID_TOKEN))?;

        Ok(Self { user_id })
    }
}

/// Authenticated admin account. Any authenticated non-admin principal is
/// rejected with 403, as is a token whose account no longer exists.
#[derive(Debug, Clone)]
pub struct RequireAdmin {
    pub admin: User,
}

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth = AuthUser::from_request_parts(parts, state).await?;

        let user = state
            .user_repo
            .find_by_id(&auth.user_id)
            .await
            .map_err(ApiError::from)?
            .ok_or_else(|| ApiError::forbidden(ACCESS_DENIED))?;

        if user.role != UserRole::Admin {
            return Err(ApiError::forbidden(ACCESS_DENIED));
        }

        Ok(Self { admin: user })
    }
}

/// Authenticated vendor account for the vendor portal.
#[derive(Debug, Clone)]
pub struct RequireVendor {
    pub vendor: User,
}

impl FromRequestParts<AppState> for RequireVendor {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth = AuthUser::from_request_parts(parts, state).await?;

        let user = state
            .user_repo
            .find_by_id(&auth.user_id)
            .await
            .map_err(ApiError::from)?
            .ok_or_else(|| ApiError::forbidden(ACCESS_DENIED))?;

        if user.role != UserRole::Vendor {
            return Err(ApiError::forbidden(ACCESS_DENIED));
        }

        Ok(Self { vendor: user })
    }
}
