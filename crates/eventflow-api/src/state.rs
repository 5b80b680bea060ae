//! Application state: services wired to the PostgreSQL adapters.

use std::sync::Arc;

use sqlx::PgPool;

use eventflow_core::services::{
    ApplicationService, AuthService, EventService, PaymentService, ReportingService, UserService,
};
use eventflow_infrastructure::{
    PgApplicationRepository, PgEventRepository, PgPaymentRepository, PgReportingRepository,
    PgUserRepository,
};
use eventflow_security::JwtService;
use eventflow_shared::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService<PgUserRepository>>,
    pub users: Arc<UserService<PgUserRepository>>,
    pub events: Arc<EventService<PgEventRepository>>,
    pub applications: Arc<ApplicationService<PgApplicationRepository, PgEventRepository>>,
    pub payments: Arc<PaymentService<PgPaymentRepository>>,
    pub reports: Arc<ReportingService<PgReportingRepository>>,
    /// Token validation for the auth extractors.
    pub jwt: Arc<JwtService>,
    /// Principal resolution for the auth extractors.
    pub user_repo: Arc<PgUserRepository>,
}

impl AppState {
    pub fn new(pool: PgPool, config: &AppConfig) -> Self {
        let user_repo = Arc::new(PgUserRepository::new(pool.clone()));
        let event_repo = Arc::new(PgEventRepository::new(pool.clone()));
        let application_repo = Arc::new(PgApplicationRepository::new(pool.clone()));
        let payment_repo = Arc::new(PgPaymentRepository::new(pool.clone()));
        let reporting_repo = Arc::new(PgReportingRepository::new(pool));

        let jwt = config.jwt.clone();

        Self {
            auth: Arc::new(AuthService::new(
                user_repo.clone(),
                JwtService::new(jwt.secret.clone(), jwt.access_token_expiry),
            )),
            users: Arc::new(UserService::new(user_repo.clone())),
            events: Arc::new(EventService::new(event_repo.clone())),
            applications: Arc::new(ApplicationService::new(application_repo, event_repo)),
            payments: Arc::new(PaymentService::new(payment_repo)),
            reports: Arc::new(ReportingService::new(reporting_repo)),
            jwt: Arc::new(JwtService::new(jwt.secret, jwt.access_token_expiry)),
            user_repo,
        }
    }
}
