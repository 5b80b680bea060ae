//! Repository traits (ports)

pub mod application_repository;
pub mod event_repository;
pub mod payment_repository;
pub mod reporting_repository;
pub mod user_repository;

pub use application_repository::{ApplicationFilter, ApplicationRepository};
pub use event_repository::EventRepository;
pub use payment_repository::PaymentRepository;
pub use reporting_repository::ReportingRepository;
pub use user_repository::UserRepository;
