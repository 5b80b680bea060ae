// ============================================================================
// EventFlow Core - Application Lifecycle Service
// File: crates/eventflow-core/src/services/application_service.rs
// Description: Vendor application review; approval spawns the payment
// ============================================================================

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::domain::{
    Application, ApplicationDraft, ApplicationStatus, ApplicationView, ReviewDecision,
};
use crate::error::DomainError;
use crate::repositories::{ApplicationFilter, ApplicationRepository, EventRepository};

pub struct ApplicationService<A: ApplicationRepository, E: EventRepository> {
    applications: Arc<A>,
    events: Arc<E>,
}

impl<A: ApplicationRepository, E: EventRepository> ApplicationService<A, E> {
    pub fn new(applications: Arc<A>, events: Arc<E>) -> Self {
        Self {
            applications,
            events,
        }
    }

    /// Approve or reject an application. Only the admin owning the
    /// application's event may review it; the application update and any
    /// spawned payment are persisted in one transaction.
    pub async fn review(
        &self,
        admin_id: Uuid,
        application_id: Uuid,
        status: Option<&str>,
        admin_notes: Option<String>,
    ) -> Result<ApplicationView, DomainError> {
        let (application, event) = self
            .applications
            .find_with_event(&application_id)
            .await?
            .ok_or(DomainError::ApplicationNotFound)?;

        if event.created_by_admin_id != admin_id {
            return Err(DomainError::NotEventOwner);
        }

        let decision = status
            .and_then(ReviewDecision::from_str)
            .ok_or(DomainError::InvalidReviewStatus)?;

        let outcome = application.review(&event, decision, admin_id, admin_notes)?;
        self.applications
            .persist_review(&outcome.application, outcome.payment.as_ref())
            .await?;

        info!(
            application_id = %application_id,
            status = outcome.application.status.as_str(),
            "Application reviewed"
        );

        self.applications
            .find_view(&application_id)
            .await?
            .ok_or(DomainError::ApplicationNotFound)
    }

    /// Applications to the admin's events; the ownership join applies even
    /// when no filters are given. An unknown status filter matches nothing.
    pub async fn list_for_admin(
        &self,
        admin_id: Uuid,
        status: Option<&str>,
        event_id: Option<Uuid>,
    ) -> Result<Vec<ApplicationView>, DomainError> {
        let mut filter = ApplicationFilter {
            status: None,
            event_id,
        };
        if let Some(raw) = status {
            match ApplicationStatus::from_str(raw) {
                Some(parsed) => filter.status = Some(parsed),
                None => return Ok(Vec::new()),
            }
        }
        self.applications.list_for_admin(&admin_id, &filter).await
    }

    /// Vendor submits an application to an event; one per vendor per event.
    pub async fn submit(
        &self,
        vendor_id: Uuid,
        event_id: Option<Uuid>,
        draft: ApplicationDraft,
    ) -> Result<ApplicationView, DomainError> {
        let event_id = event_id.ok_or(DomainError::MissingField("event_id"))?;
        let event = self
            .events
            .find_by_id(&event_id)
            .await?
            .ok_or(DomainError::EventNotFound)?;

        if self
            .applications
            .find_by_vendor_and_event(&vendor_id, &event.id)
            .await?
            .is_some()
        {
            return Err(DomainError::DuplicateApplication);
        }

        let application = Application::new(
            vendor_id,
            event.id,
            draft.product_service,
            draft.booth_requirements,
            draft.additional_notes,
        )?;
        let created = self.applications.create(&application).await?;

        info!(application_id = %created.id, event_id = %event.id, "Application submitted");

        self.applications
            .find_view(&created.id)
            .await?
            .ok_or(DomainError::ApplicationNotFound)
    }

    /// Vendor withdraws their own pending application.
    pub async fn withdraw(
        &self,
        vendor_id: Uuid,
        application_id: Uuid,
    ) -> Result<ApplicationView, DomainError> {
        let application = self
            .applications
            .find_by_id(&application_id)
            .await?
            .ok_or(DomainError::ApplicationNotFound)?;

        if application.vendor_id != vendor_id {
            return Err(DomainError::AccessDenied);
        }

        let withdrawn = application.withdraw()?;
        self.applications.update(&withdrawn).await?;

        self.applications
            .find_view(&application_id)
            .await?
            .ok_or(DomainError::ApplicationNotFound)
    }

    pub async fn list_for_vendor(
        &self,
        vendor_id: Uuid,
    ) -> Result<Vec<ApplicationView>, DomainError> {
        self.applications.list_for_vendor(&vendor_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Event, EventDraft};
    use crate::repositories::application_repository::MockApplicationRepository;
    use crate::repositories::event_repository::MockEventRepository;

    fn sample_event(admin_id: Uuid, fee: f64) -> Event {
        Event::create(
            admin_id,
            EventDraft {
                name: Some("Spring Food Festival".into()),
                event_date: Some("2026-04-15T10:00:00".into()),
                vendor_fee: Some(fee),
                ..Default::default()
            },
        )
        .unwrap()
    }

    fn pending_application(vendor_id: Uuid, event_id: Uuid) -> Application {
        Application::new(
            vendor_id,
            event_id,
            Some("Gourmet burgers".into()),
            None,
            None,
        )
        .unwrap()
    }

    fn view_for(application: &Application, event: &Event) -> ApplicationView {
        ApplicationView {
            id: application.id,
            vendor_id: application.vendor_id,
            vendor_name: "John Smith".into(),
            vendor_company: None,
            event_id: event.id,
            event_name: event.name.clone(),
            event_date: event.event_date,
            product_service: application.product_service.clone(),
            booth_requirements: None,
            additional_notes: None,
            status: application.status,
            admin_notes: None,
            reviewed_at: application.reviewed_at,
            applied_at: application.applied_at,
            vendor_fee: event.vendor_fee,
            default_currency: event.default_currency.clone(),
            currency_options: event.currency_options.clone(),
            mpesa_number: None,
            paypal_account: None,
            zelle_account: None,
            card_instructions: None,
        }
    }

    fn service(
        applications: MockApplicationRepository,
        events: MockEventRepository,
    ) -> ApplicationService<MockApplicationRepository, MockEventRepository> {
        ApplicationService::new(Arc::new(applications), Arc::new(events))
    }

    #[tokio::test]
    async fn review_by_non_owner_is_forbidden() {
        let owner = Uuid::new_v4();
        let event = sample_event(owner, 500.0);
        let application = pending_application(Uuid::new_v4(), event.id);

        let mut applications = MockApplicationRepository::new();
        applications
            .expect_find_with_event()
            .returning(move |_| Ok(Some((application.clone(), event.clone()))));

        let err = service(applications, MockEventRepository::new())
            .review(Uuid::new_v4(), Uuid::new_v4(), Some("approved"), None)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotEventOwner));
    }

    #[tokio::test]
    async fn review_missing_application_is_not_found() {
        let mut applications = MockApplicationRepository::new();
        applications.expect_find_with_event().returning(|_| Ok(None));

        let err = service(applications, MockEventRepository::new())
            .review(Uuid::new_v4(), Uuid::new_v4(), Some("approved"), None)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::ApplicationNotFound));
    }

    #[tokio::test]
    async fn review_validates_decision_after_ownership() {
        let admin_id = Uuid::new_v4();
        let event = sample_event(admin_id, 500.0);
        let application = pending_application(Uuid::new_v4(), event.id);

        let mut applications = MockApplicationRepository::new();
        applications
            .expect_find_with_event()
            .returning(move |_| Ok(Some((application.clone(), event.clone()))));

        let err = service(applications, MockEventRepository::new())
            .review(admin_id, Uuid::new_v4(), Some("withdrawn"), None)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidReviewStatus));
    }

    #[tokio::test]
    async fn approval_persists_application_and_payment_atomically() {
        let admin_id = Uuid::new_v4();
        let event = sample_event(admin_id, 500.0);
        let application = pending_application(Uuid::new_v4(), event.id);
        let application_id = application.id;

        let mut applications = MockApplicationRepository::new();
        {
            let application = application.clone();
            let event = event.clone();
            applications
                .expect_find_with_event()
                .returning(move |_| Ok(Some((application.clone(), event.clone()))));
        }
        applications
            .expect_persist_review()
            .withf(move |application, payment| {
                application.status == ApplicationStatus::Approved
                    && payment.is_some_and(|p| {
                        p.amount == 500.0 && p.application_id == application.id
                    })
            })
            .times(1)
            .returning(|_, _| Ok(()));
        {
            let mut approved = application.clone();
            approved.status = ApplicationStatus::Approved;
            let event = event.clone();
            applications
                .expect_find_view()
                .returning(move |_| Ok(Some(view_for(&approved, &event))));
        }

        let view = service(applications, MockEventRepository::new())
            .review(admin_id, application_id, Some("approved"), None)
            .await
            .unwrap();
        assert_eq!(view.status, ApplicationStatus::Approved);
    }

    #[tokio::test]
    async fn unknown_status_filter_matches_nothing() {
        let applications = MockApplicationRepository::new();
        let views = service(applications, MockEventRepository::new())
            .list_for_admin(Uuid::new_v4(), Some("archived"), None)
            .await
            .unwrap();
        assert!(views.is_empty());
    }

    #[tokio::test]
    async fn duplicate_submission_conflicts() {
        let admin_id = Uuid::new_v4();
        let vendor_id = Uuid::new_v4();
        let event = sample_event(admin_id, 300.0);
        let existing = pending_application(vendor_id, event.id);
        let event_id = event.id;

        let mut events = MockEventRepository::new();
        events
            .expect_find_by_id()
            .returning(move |_| Ok(Some(event.clone())));

        let mut applications = MockApplicationRepository::new();
        applications
            .expect_find_by_vendor_and_event()
            .returning(move |_, _| Ok(Some(existing.clone())));

        let err = service(applications, events)
            .submit(
                vendor_id,
                Some(event_id),
                ApplicationDraft {
                    product_service: Some("Pottery".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::DuplicateApplication));
    }

    #[tokio::test]
    async fn withdraw_rejects_other_vendors_application() {
        let application = pending_application(Uuid::new_v4(), Uuid::new_v4());
        let application_id = application.id;

        let mut applications = MockApplicationRepository::new();
        applications
            .expect_find_by_id()
            .returning(move |_| Ok(Some(application.clone())));

        let err = service(applications, MockEventRepository::new())
            .withdraw(Uuid::new_v4(), application_id)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::AccessDenied));
    }
}
