//! Event repository trait (port)

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Event, EventView};
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Event>, DomainError>;
    async fn create(&self, event: &Event) -> Result<Event, DomainError>;
    async fn update(&self, event: &Event) -> Result<Event, DomainError>;
    async fn delete(&self, id: &Uuid) -> Result<(), DomainError>;
    /// Applications referencing the event; deletion is blocked while > 0.
    async fn application_count(&self, event_id: &Uuid) -> Result<i64, DomainError>;
    /// Events owned by the admin, newest event date first, with
    /// application counts.
    async fn list_for_admin(&self, admin_id: &Uuid) -> Result<Vec<EventView>, DomainError>;
    /// Public listing: upcoming/ongoing events, soonest first.
    async fn list_public(&self) -> Result<Vec<EventView>, DomainError>;
}
