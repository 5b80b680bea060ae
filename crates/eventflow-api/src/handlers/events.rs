//! Event registry handlers (admin CRUD + public listing)

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use uuid::Uuid;

use eventflow_core::domain::EventView;

use crate::dto::{CreateEventRequest, EventResponse, MessageResponse, UpdateEventRequest};
use crate::error::ApiError;
use crate::middleware::{ApiJson, RequireAdmin};
use crate::state::AppState;

/// GET /api/admin/events
pub async fn list_for_admin(
    State(state): State<AppState>,
    admin: RequireAdmin,
) -> Result<Json<Vec<EventView>>, ApiError> {
    let events = state.events.list_for_admin(admin.admin.id).await?;
    Ok(Json(events))
}

/// POST /api/admin/events
pub async fn create(
    State(state): State<AppState>,
    admin: RequireAdmin,
    ApiJson(payload): ApiJson<CreateEventRequest>,
) -> Result<(StatusCode, Json<EventResponse>), ApiError> {
    let event = state.events.create(admin.admin.id, payload.into()).await?;

    Ok((
        StatusCode::CREATED,
        Json(EventResponse {
            message: "Event created successfully".to_string(),
            event: EventView::from_event(&event, Some(admin.admin.email)),
        }),
    ))
}

/// PUT /api/admin/events/{event_id}
pub async fn update(
    State(state): State<AppState>,
    admin: RequireAdmin,
    Path(event_id): Path<Uuid>,
    ApiJson(payload): ApiJson<UpdateEventRequest>,
) -> Result<Json<EventResponse>, ApiError> {
    let event = state
        .events
        .update(admin.admin.id, event_id, payload.into())
        .await?;

    Ok(Json(EventResponse {
        message: "Event updated successfully".to_string(),
        event: EventView::from_event(&event, Some(admin.admin.email)),
    }))
}

/// DELETE /api/admin/events/{event_id}
pub async fn delete(
    State(state): State<AppState>,
    admin: RequireAdmin,
    Path(event_id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.events.delete(admin.admin.id, event_id).await?;

    Ok(Json(MessageResponse {
        message: "Event deleted successfully".to_string(),
    }))
}

/// GET /api/events (public, unauthenticated)
pub async fn list_public(
    State(state): State<AppState>,
) -> Result<Json<Vec<EventView>>, ApiError> {
    let events = state.events.list_public().await?;
    Ok(Json(events))
}
