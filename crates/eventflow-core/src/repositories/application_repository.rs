//! Application repository trait (port)

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Application, ApplicationStatus, ApplicationView, Event, Payment};
use crate::error::DomainError;

/// Optional listing filters; the ownership join is applied regardless.
#[derive(Debug, Clone, Default)]
pub struct ApplicationFilter {
    pub status: Option<ApplicationStatus>,
    pub event_id: Option<Uuid>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Application>, DomainError>;
    /// Application together with its event, for ownership checks and the
    /// review transition.
    async fn find_with_event(
        &self,
        id: &Uuid,
    ) -> Result<Option<(Application, Event)>, DomainError>;
    async fn find_by_vendor_and_event(
        &self,
        vendor_id: &Uuid,
        event_id: &Uuid,
    ) -> Result<Option<Application>, DomainError>;
    async fn create(&self, application: &Application) -> Result<Application, DomainError>;
    async fn update(&self, application: &Application) -> Result<Application, DomainError>;
    /// Persist a review outcome atomically: the application update and,
    /// for approvals, the payment insert commit in one transaction. The
    /// payment insert must be a no-op when one already exists for the
    /// application, under concurrent reviewers included.
    async fn persist_review<'a>(
        &self,
        application: &Application,
        payment: Option<&'a Payment>,
    ) -> Result<(), DomainError>;
    async fn find_view(&self, id: &Uuid) -> Result<Option<ApplicationView>, DomainError>;
    /// Applications whose event is owned by the admin, newest first.
    async fn list_for_admin(
        &self,
        admin_id: &Uuid,
        filter: &ApplicationFilter,
    ) -> Result<Vec<ApplicationView>, DomainError>;
    async fn list_for_vendor(&self, vendor_id: &Uuid)
        -> Result<Vec<ApplicationView>, DomainError>;
}
