//! Event registry service
//!
//! Admin-owned event CRUD. Update and delete verify ownership; delete is
//! blocked while any application references the event.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::domain::{Event, EventDraft, EventPatch, EventView};
use crate::error::DomainError;
use crate::repositories::EventRepository;

pub struct EventService<E: EventRepository> {
    events: Arc<E>,
}

impl<E: EventRepository> EventService<E> {
    pub fn new(events: Arc<E>) -> Self {
        Self { events }
    }

    pub async fn create(&self, admin_id: Uuid, draft: EventDraft) -> Result<Event, DomainError> {
        let event = Event::create(admin_id, draft)?;
        let created = self.events.create(&event).await?;
        info!(event_id = %created.id, "Event created");
        Ok(created)
    }

    pub async fn update(
        &self,
        admin_id: Uuid,
        event_id: Uuid,
        patch: EventPatch,
    ) -> Result<Event, DomainError> {
        let mut event = self.owned_event(admin_id, &event_id).await?;
        event.apply(patch)?;
        self.events.update(&event).await
    }

    pub async fn delete(&self, admin_id: Uuid, event_id: Uuid) -> Result<(), DomainError> {
        let event = self.owned_event(admin_id, &event_id).await?;

        let applications = self.events.application_count(&event.id).await?;
        if applications > 0 {
            return Err(DomainError::EventHasApplications(applications));
        }

        self.events.delete(&event.id).await?;
        info!(event_id = %event.id, "Event deleted");
        Ok(())
    }

    pub async fn list_for_admin(&self, admin_id: Uuid) -> Result<Vec<EventView>, DomainError> {
        self.events.list_for_admin(&admin_id).await
    }

    /// Unauthenticated listing of upcoming/ongoing events.
    pub async fn list_public(&self) -> Result<Vec<EventView>, DomainError> {
        self.events.list_public().await
    }

    async fn owned_event(&self, admin_id: Uuid, event_id: &Uuid) -> Result<Event, DomainError> {
        let event = self
            .events
            .find_by_id(event_id)
            .await?
            .ok_or(DomainError::EventNotFound)?;
        if event.created_by_admin_id != admin_id {
            return Err(DomainError::NotEventOwner);
        }
        Ok(event)
    }
}
