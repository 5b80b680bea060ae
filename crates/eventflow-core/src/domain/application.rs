// ============================================================================
// EventFlow Core - Vendor Application Entity
// File: crates/eventflow-core/src/domain/application.rs
// Description: Application state machine; approval spawns the payment record
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use eventflow_shared::types::new_id;

use crate::domain::event::Event;
use crate::domain::payment::Payment;
use crate::error::DomainError;

/// Application lifecycle. `pending` is initial; review moves it to
/// `approved` or `rejected`; a vendor can withdraw while still pending.
/// All three outcomes are terminal, except that re-submitting the same
/// review decision is accepted so retried requests stay harmless.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Pending,
    Approved,
    Rejected,
    Withdrawn,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Approved => "approved",
            ApplicationStatus::Rejected => "rejected",
            ApplicationStatus::Withdrawn => "withdrawn",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(ApplicationStatus::Pending),
            "approved" => Some(ApplicationStatus::Approved),
            "rejected" => Some(ApplicationStatus::Rejected),
            "withdrawn" => Some(ApplicationStatus::Withdrawn),
            _ => None,
        }
    }
}

impl Default for ApplicationStatus {
    fn default() -> Self {
        ApplicationStatus::Pending
    }
}

/// Admin review outcome; the only statuses a review may set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewDecision {
    Approved,
    Rejected,
}

impl ReviewDecision {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "approved" => Some(ReviewDecision::Approved),
            "rejected" => Some(ReviewDecision::Rejected),
            _ => None,
        }
    }

    pub fn status(&self) -> ApplicationStatus {
        match self {
            ReviewDecision::Approved => ApplicationStatus::Approved,
            ReviewDecision::Rejected => ApplicationStatus::Rejected,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Application {
    pub id: Uuid,
    pub vendor_id: Uuid,
    pub event_id: Uuid,

    pub product_service: String,
    pub booth_requirements: Option<String>,
    pub additional_notes: Option<String>,

    pub status: ApplicationStatus,
    pub admin_notes: Option<String>,
    /// Set only on transition out of pending.
    pub reviewed_at: Option<DateTime<Utc>>,
    pub reviewed_by: Option<Uuid>,

    pub applied_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Vendor-submitted application details.
#[derive(Debug, Clone, Default)]
pub struct ApplicationDraft {
    pub product_service: Option<String>,
    pub booth_requirements: Option<String>,
    pub additional_notes: Option<String>,
}

/// Result of a review transition: the updated application, plus the
/// payment record an approval spawns. Returning both keeps the
/// cross-entity coupling visible and lets the persistence layer commit
/// them in one transaction.
#[derive(Debug, Clone)]
pub struct ReviewOutcome {
    pub application: Application,
    pub payment: Option<Payment>,
}

impl Application {
    pub fn new(
        vendor_id: Uuid,
        event_id: Uuid,
        product_service: Option<String>,
        booth_requirements: Option<String>,
        additional_notes: Option<String>,
    ) -> Result<Self, DomainError> {
        let product_service =
            product_service.ok_or(DomainError::MissingField("product_service"))?;
        let now = Utc::now();
        Ok(Self {
            id: new_id(),
            vendor_id,
            event_id,
            product_service,
            booth_requirements,
            additional_notes,
            status: ApplicationStatus::Pending,
            admin_notes: None,
            reviewed_at: None,
            reviewed_by: None,
            applied_at: now,
            updated_at: now,
        })
    }

    /// Review transition. The caller must already have verified that
    /// `reviewed_by` owns the application's event.
    ///
    /// Approval produces a payment snapshot; persistence guards it with a
    /// uniqueness constraint on `application_id` so a retried or
    /// concurrent approval can never record a second payment.
    pub fn review(
        &self,
        event: &Event,
        decision: ReviewDecision,
        reviewed_by: Uuid,
        admin_notes: Option<String>,
    ) -> Result<ReviewOutcome, DomainError> {
        match self.status {
            ApplicationStatus::Withdrawn => return Err(DomainError::ApplicationWithdrawn),
            ApplicationStatus::Approved | ApplicationStatus::Rejected
                if self.status != decision.status() =>
            {
                return Err(DomainError::AlreadyReviewed)
            }
            _ => {}
        }

        let now = Utc::now();
        let mut application = self.clone();
        application.status = decision.status();
        application.admin_notes = admin_notes;
        application.reviewed_at = Some(now);
        application.reviewed_by = Some(reviewed_by);
        application.updated_at = now;

        let payment = match decision {
            ReviewDecision::Approved => Some(Payment::for_application(&application, event)),
            ReviewDecision::Rejected => None,
        };

        Ok(ReviewOutcome {
            application,
            payment,
        })
    }

    /// Vendor-side withdrawal; only pending applications can leave the
    /// queue this way.
    pub fn withdraw(&self) -> Result<Self, DomainError> {
        if self.status != ApplicationStatus::Pending {
            return Err(DomainError::WithdrawNotAllowed);
        }
        let mut application = self.clone();
        application.status = ApplicationStatus::Withdrawn;
        application.updated_at = Utc::now();
        Ok(application)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::event::EventDraft;
    use crate::domain::payment::PaymentStatus;

    fn pending_pair(fee: f64) -> (Application, Event, Uuid) {
        let admin_id = Uuid::new_v4();
        let event = Event::create(
            admin_id,
            EventDraft {
                name: Some("Spring Food Festival".into()),
                event_date: Some("2026-04-15T10:00:00".into()),
                vendor_fee: Some(fee),
                currency_options: Some(crate::domain::currency::CurrencyOptionsInput::Csv(
                    "USD,EUR".into(),
                )),
                ..Default::default()
            },
        )
        .unwrap();
        let application = Application::new(
            Uuid::new_v4(),
            event.id,
            Some("Gourmet burgers and craft beverages".into()),
            Some("10x10 booth with electricity".into()),
            None,
        )
        .unwrap();
        (application, event, admin_id)
    }

    #[test]
    fn approval_spawns_pending_payment_with_fee_snapshot() {
        let (application, event, admin_id) = pending_pair(500.0);

        let outcome = application
            .review(&event, ReviewDecision::Approved, admin_id, Some("Great vendor".into()))
            .unwrap();

        assert_eq!(outcome.application.status, ApplicationStatus::Approved);
        assert_eq!(outcome.application.reviewed_by, Some(admin_id));
        assert!(outcome.application.reviewed_at.is_some());

        let payment = outcome.payment.expect("approval creates a payment");
        assert_eq!(payment.application_id, application.id);
        assert_eq!(payment.vendor_id, application.vendor_id);
        assert_eq!(payment.amount, 500.0);
        assert_eq!(payment.status, PaymentStatus::Pending);
    }

    #[test]
    fn rejection_spawns_no_payment() {
        let (application, event, admin_id) = pending_pair(500.0);
        let outcome = application
            .review(&event, ReviewDecision::Rejected, admin_id, None)
            .unwrap();

        assert_eq!(outcome.application.status, ApplicationStatus::Rejected);
        assert!(outcome.payment.is_none());
    }

    #[test]
    fn repeated_approval_is_accepted() {
        let (application, event, admin_id) = pending_pair(500.0);
        let approved = application
            .review(&event, ReviewDecision::Approved, admin_id, None)
            .unwrap()
            .application;

        // A retried approval goes through; the duplicate payment is
        // suppressed by the persistence-layer uniqueness guard.
        let retry = approved
            .review(&event, ReviewDecision::Approved, admin_id, None)
            .unwrap();
        assert_eq!(retry.application.status, ApplicationStatus::Approved);
        assert!(retry.payment.is_some());
    }

    #[test]
    fn terminal_status_cannot_flip() {
        let (application, event, admin_id) = pending_pair(500.0);
        let approved = application
            .review(&event, ReviewDecision::Approved, admin_id, None)
            .unwrap()
            .application;

        let err = approved
            .review(&event, ReviewDecision::Rejected, admin_id, None)
            .unwrap_err();
        assert!(matches!(err, DomainError::AlreadyReviewed));
    }

    #[test]
    fn withdrawn_application_cannot_be_reviewed() {
        let (application, event, admin_id) = pending_pair(500.0);
        let withdrawn = application.withdraw().unwrap();
        assert_eq!(withdrawn.status, ApplicationStatus::Withdrawn);

        let err = withdrawn
            .review(&event, ReviewDecision::Approved, admin_id, None)
            .unwrap_err();
        assert!(matches!(err, DomainError::ApplicationWithdrawn));
    }

    #[test]
    fn only_pending_applications_withdraw() {
        let (application, event, admin_id) = pending_pair(500.0);
        let rejected = application
            .review(&event, ReviewDecision::Rejected, admin_id, None)
            .unwrap()
            .application;

        assert!(matches!(
            rejected.withdraw(),
            Err(DomainError::WithdrawNotAllowed)
        ));
    }
}
