//! Vendor account management handlers (admin surface)

use axum::extract::{Path, State};
use axum::Json;
use uuid::Uuid;

use eventflow_core::domain::UserView;

use crate::dto::{VendorDetailResponse, VendorResponse};
use crate::error::ApiError;
use crate::middleware::RequireAdmin;
use crate::state::AppState;

/// GET /api/admin/vendors
pub async fn list(
    State(state): State<AppState>,
    _admin: RequireAdmin,
) -> Result<Json<Vec<UserView>>, ApiError> {
    let vendors = state.users.list_vendors().await?;
    Ok(Json(vendors.iter().map(UserView::from).collect()))
}

/// GET /api/admin/vendors/{vendor_id}
pub async fn detail(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(vendor_id): Path<Uuid>,
) -> Result<Json<VendorDetailResponse>, ApiError> {
    let vendor = state.users.get_vendor(&vendor_id).await?;
    let applications = state.applications.list_for_vendor(vendor_id).await?;
    let payments = state.payments.list_for_vendor(vendor_id).await?;

    Ok(Json(VendorDetailResponse {
        vendor: UserView::from(&vendor),
        applications,
        payments,
    }))
}

/// PUT /api/admin/vendors/{vendor_id}/toggle-status
pub async fn toggle_status(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(vendor_id): Path<Uuid>,
) -> Result<Json<VendorResponse>, ApiError> {
    let vendor = state.users.toggle_vendor_status(&vendor_id).await?;

    let message = if vendor.is_active {
        "Vendor activated successfully"
    } else {
        "Vendor deactivated successfully"
    };

    Ok(Json(VendorResponse {
        message: message.to_string(),
        vendor: UserView::from(&vendor),
    }))
}
