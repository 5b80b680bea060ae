//! Domain errors

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Email already registered")]
    EmailAlreadyRegistered,

    #[error("Invalid role. Must be vendor or admin")]
    InvalidRole,

    #[error("Email and password are required")]
    CredentialsRequired,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Account is deactivated")]
    AccountDeactivated,

    #[error("Invalid credentials for {0} login")]
    RoleMismatch(String),

    #[error("User not found")]
    UserNotFound,

    #[error("Vendor not found")]
    VendorNotFound,

    #[error("Event not found")]
    EventNotFound,

    #[error("Application not found")]
    ApplicationNotFound,

    #[error("Payment not found")]
    PaymentNotFound,

    #[error("Access denied")]
    AccessDenied,

    #[error("Access denied for this event")]
    NotEventOwner,

    #[error("Invalid event_date format. Use ISO format")]
    InvalidEventDate,

    #[error("Invalid status")]
    InvalidEventStatus,

    #[error("currency_options cannot be empty")]
    EmptyCurrencyOptions,

    #[error("default_currency must be included in currency_options")]
    DefaultCurrencyNotInOptions,

    #[error("Invalid status. Must be approved or rejected")]
    InvalidReviewStatus,

    #[error("Application has already been reviewed")]
    AlreadyReviewed,

    #[error("Application has been withdrawn")]
    ApplicationWithdrawn,

    #[error("Only pending applications can be withdrawn")]
    WithdrawNotAllowed,

    #[error("You have already applied to this event")]
    DuplicateApplication,

    #[error("Cannot delete event with {0} applications. Cancel event instead.")]
    EventHasApplications(i64),

    #[error("Status is required")]
    PaymentStatusRequired,

    #[error("Invalid status")]
    InvalidPaymentStatus,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Password hash error: {0}")]
    PasswordHash(String),

    #[error("Token generation error: {0}")]
    TokenGeneration(String),

    #[error("Database error: {0}")]
    Database(String),
}
