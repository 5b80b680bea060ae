//! Router assembly

use axum::http::{header, Method};
use axum::routing::{get, post, put};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers::{
    analytics, applications, auth, events, health, payments, vendor_portal, vendors,
};
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        // Public surface
        .route("/api/health", get(health::health_check))
        .route("/api/events", get(events::list_public))
        // Identity
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/me", get(auth::me))
        .route("/api/auth/update-profile", put(auth::update_profile))
        // Admin: vendors
        .route("/api/admin/vendors", get(vendors::list))
        .route("/api/admin/vendors/{vendor_id}", get(vendors::detail))
        .route(
            "/api/admin/vendors/{vendor_id}/toggle-status",
            put(vendors::toggle_status),
        )
        // Admin: events
        .route(
            "/api/admin/events",
            get(events::list_for_admin).post(events::create),
        )
        .route(
            "/api/admin/events/{event_id}",
            put(events::update).delete(events::delete),
        )
        // Admin: applications
        .route("/api/admin/applications", get(applications::list))
        .route(
            "/api/admin/applications/{application_id}/review",
            put(applications::review),
        )
        // Admin: payments
        .route("/api/admin/payments", get(payments::list))
        .route(
            "/api/admin/payments/{payment_id}/update-status",
            put(payments::update_status),
        )
        // Admin: dashboard & analytics
        .route("/api/admin/dashboard/stats", get(analytics::dashboard_stats))
        .route(
            "/api/admin/analytics/applications-by-status",
            get(analytics::applications_by_status),
        )
        .route(
            "/api/admin/analytics/applications-over-time",
            get(analytics::applications_over_time),
        )
        .route(
            "/api/admin/analytics/revenue-by-month",
            get(analytics::revenue_by_month),
        )
        // Vendor portal
        .route(
            "/api/vendor/applications",
            get(vendor_portal::list_applications).post(vendor_portal::apply),
        )
        .route(
            "/api/vendor/applications/{application_id}/withdraw",
            put(vendor_portal::withdraw),
        )
        .route("/api/vendor/payments", get(vendor_portal::list_payments))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
        )
        .with_state(state)
}
