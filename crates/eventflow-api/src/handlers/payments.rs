//! Payment ledger handlers (admin surface)

use axum::extract::{Path, State};
use axum::Json;
use uuid::Uuid;

use eventflow_core::domain::PaymentView;

use crate::dto::{PaymentResponse, UpdatePaymentStatusRequest};
use crate::error::ApiError;
use crate::middleware::{ApiJson, RequireAdmin};
use crate::state::AppState;

/// GET /api/admin/payments
pub async fn list(
    State(state): State<AppState>,
    admin: RequireAdmin,
) -> Result<Json<Vec<PaymentView>>, ApiError> {
    let payments = state.payments.list_for_admin(admin.admin.id).await?;
    Ok(Json(payments))
}

/// PUT /api/admin/payments/{payment_id}/update-status
pub async fn update_status(
    State(state): State<AppState>,
    admin: RequireAdmin,
    Path(payment_id): Path<Uuid>,
    ApiJson(payload): ApiJson<UpdatePaymentStatusRequest>,
) -> Result<Json<PaymentResponse>, ApiError> {
    let payment = state
        .payments
        .update_status(admin.admin.id, payment_id, payload.into())
        .await?;

    Ok(Json(PaymentResponse {
        message: "Payment status updated successfully".to_string(),
        payment,
    }))
}
