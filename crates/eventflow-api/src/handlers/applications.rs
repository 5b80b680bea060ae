//! Application review handlers (admin surface)

use axum::extract::{Path, Query, State};
use axum::Json;
use uuid::Uuid;

use eventflow_core::domain::ApplicationView;

use crate::dto::{ApplicationListQuery, ApplicationResponse, ReviewRequest};
use crate::error::ApiError;
use crate::middleware::{ApiJson, RequireAdmin};
use crate::state::AppState;

/// GET /api/admin/applications?status=&event_id=
pub async fn list(
    State(state): State<AppState>,
    admin: RequireAdmin,
    Query(query): Query<ApplicationListQuery>,
) -> Result<Json<Vec<ApplicationView>>, ApiError> {
    let applications = state
        .applications
        .list_for_admin(admin.admin.id, query.status.as_deref(), query.event_id)
        .await?;
    Ok(Json(applications))
}

/// PUT /api/admin/applications/{application_id}/review
pub async fn review(
    State(state): State<AppState>,
    admin: RequireAdmin,
    Path(application_id): Path<Uuid>,
    ApiJson(payload): ApiJson<ReviewRequest>,
) -> Result<Json<ApplicationResponse>, ApiError> {
    let application = state
        .applications
        .review(
            admin.admin.id,
            application_id,
            payload.status.as_deref(),
            payload.admin_notes,
        )
        .await?;

    Ok(Json(ApplicationResponse {
        message: format!("Application {} successfully", application.status.as_str()),
        application,
    }))
}
