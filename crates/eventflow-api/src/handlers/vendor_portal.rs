//! Vendor portal handlers: apply to events, track applications and
//! payments, withdraw a pending application.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use uuid::Uuid;

use eventflow_core::domain::{ApplicationView, PaymentView};

use crate::dto::{ApplicationResponse, ApplyRequest};
use crate::error::ApiError;
use crate::middleware::{ApiJson, RequireVendor};
use crate::state::AppState;

/// POST /api/vendor/applications
pub async fn apply(
    State(state): State<AppState>,
    vendor: RequireVendor,
    ApiJson(payload): ApiJson<ApplyRequest>,
) -> Result<(StatusCode, Json<ApplicationResponse>), ApiError> {
    let (event_id, draft) = payload.into_parts();
    let application = state
        .applications
        .submit(vendor.vendor.id, event_id, draft)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApplicationResponse {
            message: "Application submitted successfully".to_string(),
            application,
        }),
    ))
}

/// GET /api/vendor/applications
pub async fn list_applications(
    State(state): State<AppState>,
    vendor: RequireVendor,
) -> Result<Json<Vec<ApplicationView>>, ApiError> {
    let applications = state
        .applications
        .list_for_vendor(vendor.vendor.id)
        .await?;
    Ok(Json(applications))
}

/// PUT /api/vendor/applications/{application_id}/withdraw
pub async fn withdraw(
    State(state): State<AppState>,
    vendor: RequireVendor,
    Path(application_id): Path<Uuid>,
) -> Result<Json<ApplicationResponse>, ApiError> {
    let application = state
        .applications
        .withdraw(vendor.vendor.id, application_id)
        .await?;

    Ok(Json(ApplicationResponse {
        message: "Application withdrawn successfully".to_string(),
        application,
    }))
}

/// GET /api/vendor/payments
pub async fn list_payments(
    State(state): State<AppState>,
    vendor: RequireVendor,
) -> Result<Json<Vec<PaymentView>>, ApiError> {
    let payments = state.payments.list_for_vendor(vendor.vendor.id).await?;
    Ok(Json(payments))
}
