//! API error responses
//!
//! Every failure surfaces as `{"error": message}` with the status the
//! taxonomy assigns: Validation 400, Unauthorized 401, Forbidden 403,
//! NotFound 404, Conflict 409 (except delete-blocked, which keeps the
//! original 400), everything else 500.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use eventflow_core::DomainError;

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl ApiError {
    pub fn bad_request(message: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.to_string(),
        }
    }

    pub fn unauthorized(message: &str) -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            message: message.to_string(),
        }
    }

    pub fn forbidden(message: &str) -> Self {
        Self {
            status: StatusCode::FORBIDDEN,
            message: message.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorBody {
                error: self.message,
            }),
        )
            .into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        let status = match err {
            DomainError::MissingField(_)
            | DomainError::InvalidRole
            | DomainError::CredentialsRequired
            | DomainError::InvalidEventDate
            | DomainError::InvalidEventStatus
            | DomainError::EmptyCurrencyOptions
            | DomainError::DefaultCurrencyNotInOptions
            | DomainError::InvalidReviewStatus
            | DomainError::PaymentStatusRequired
            | DomainError::InvalidPaymentStatus
            | DomainError::Validation(_) => StatusCode::BAD_REQUEST,

            // Deleting stays 400 for wire compatibility even though it is
            // a conflict at heart.
            DomainError::EventHasApplications(_) => StatusCode::BAD_REQUEST,

            DomainError::InvalidCredentials
            | DomainError::AccountDeactivated
            | DomainError::RoleMismatch(_) => StatusCode::UNAUTHORIZED,

            DomainError::AccessDenied | DomainError::NotEventOwner => StatusCode::FORBIDDEN,

            DomainError::UserNotFound
            | DomainError::VendorNotFound
            | DomainError::EventNotFound
            | DomainError::ApplicationNotFound
            | DomainError::PaymentNotFound => StatusCode::NOT_FOUND,

            DomainError::EmailAlreadyRegistered
            | DomainError::DuplicateApplication
            | DomainError::AlreadyReviewed
            | DomainError::ApplicationWithdrawn
            | DomainError::WithdrawNotAllowed => StatusCode::CONFLICT,

            DomainError::PasswordHash(_)
            | DomainError::TokenGeneration(_)
            | DomainError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("Internal error: {}", err);
        }

        Self {
            status,
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_taxonomy_to_status_codes() {
        let cases = [
            (DomainError::MissingField("name"), StatusCode::BAD_REQUEST),
            (DomainError::EventHasApplications(2), StatusCode::BAD_REQUEST),
            (DomainError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (DomainError::AccountDeactivated, StatusCode::UNAUTHORIZED),
            (DomainError::NotEventOwner, StatusCode::FORBIDDEN),
            (DomainError::ApplicationNotFound, StatusCode::NOT_FOUND),
            (DomainError::EmailAlreadyRegistered, StatusCode::CONFLICT),
            (DomainError::AlreadyReviewed, StatusCode::CONFLICT),
            (
                DomainError::Database("connection reset".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(ApiError::from(err).status, expected);
        }
    }

    #[test]
    fn keeps_domain_messages() {
        let err = ApiError::from(DomainError::EventHasApplications(3));
        assert_eq!(
            err.message,
            "Cannot delete event with 3 applications. Cancel event instead."
        );
    }
}
