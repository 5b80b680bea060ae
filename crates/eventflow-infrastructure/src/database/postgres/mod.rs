//! PostgreSQL repository implementations

pub mod application_repo_impl;
pub mod event_repo_impl;
pub mod payment_repo_impl;
pub mod reporting_repo_impl;
pub mod user_repo_impl;

pub use application_repo_impl::PgApplicationRepository;
pub use event_repo_impl::PgEventRepository;
pub use payment_repo_impl::PgPaymentRepository;
pub use reporting_repo_impl::PgReportingRepository;
pub use user_repo_impl::PgUserRepository;
