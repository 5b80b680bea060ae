//! Dashboard and analytics handlers (admin surface, read-only)

use axum::extract::State;
use axum::Json;

use eventflow_core::domain::{DashboardStats, MonthCount, MonthRevenue, StatusCount};

use crate::error::ApiError;
use crate::middleware::RequireAdmin;
use crate::state::AppState;

/// GET /api/admin/dashboard/stats
pub async fn dashboard_stats(
    State(state): State<AppState>,
    admin: RequireAdmin,
) -> Result<Json<DashboardStats>, ApiError> {
    let stats = state.reports.dashboard_stats(admin.admin.id).await?;
    Ok(Json(stats))
}

/// GET /api/admin/analytics/applications-by-status
pub async fn applications_by_status(
    State(state): State<AppState>,
    admin: RequireAdmin,
) -> Result<Json<Vec<StatusCount>>, ApiError> {
    let data = state.reports.applications_by_status(admin.admin.id).await?;
    Ok(Json(data))
}

/// GET /api/admin/analytics/applications-over-time
pub async fn applications_over_time(
    State(state): State<AppState>,
    admin: RequireAdmin,
) -> Result<Json<Vec<MonthCount>>, ApiError> {
    let data = state
        .reports
        .applications_over_time(admin.admin.id)
        .await?;
    Ok(Json(data))
}

/// GET /api/admin/analytics/revenue-by-month
pub async fn revenue_by_month(
    State(state): State<AppState>,
    admin: RequireAdmin,
) -> Result<Json<Vec<MonthRevenue>>, ApiError> {
    let data = state.reports.revenue_by_month(admin.admin.id).await?;
    Ok(Json(data))
}
