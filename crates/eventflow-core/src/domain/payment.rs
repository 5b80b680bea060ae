//! Payment domain entity
//!
//! A payment is created lazily when an application is approved (1:1 with
//! the application) and then tracked through its own status lifecycle.
//! `amount` and `currency` are point-in-time snapshots of the event's
//! configuration at approval time and are never recomputed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use eventflow_shared::types::new_id;

use crate::domain::application::Application;
use crate::domain::event::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Completed,
    Failed,
    Refunded,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Completed => "completed",
            PaymentStatus::Failed => "failed",
            PaymentStatus::Refunded => "refunded",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(PaymentStatus::Pending),
            "completed" => Some(PaymentStatus::Completed),
            "failed" => Some(PaymentStatus::Failed),
            "refunded" => Some(PaymentStatus::Refunded),
            _ => None,
        }
    }
}

impl Default for PaymentStatus {
    fn default() -> Self {
        PaymentStatus::Pending
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    pub id: Uuid,
    pub application_id: Uuid,
    pub vendor_id: Uuid,

    pub amount: f64,
    pub payment_method: Option<String>,
    pub transaction_id: Option<String>,
    pub status: PaymentStatus,
    pub currency: String,
    pub pay_to: Option<String>,

    /// Set exactly once, on the first transition into `completed`.
    pub payment_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Admin-driven status change with optionally merged detail fields.
/// Double `Option` distinguishes "sent as null" from "absent".
#[derive(Debug, Clone, Default)]
pub struct PaymentStatusChange {
    pub status: PaymentStatus,
    pub payment_method: Option<Option<String>>,
    pub transaction_id: Option<Option<String>>,
    pub notes: Option<Option<String>>,
}

impl Payment {
    /// Snapshot a payment from an approved application: amount from the
    /// event's vendor fee, currency from the event's default.
    pub fn for_application(application: &Application, event: &Event) -> Self {
        let now = Utc::now();
        Self {
            id: new_id(),
            application_id: application.id,
            vendor_id: application.vendor_id,
            amount: event.vendor_fee,
            payment_method: None,
            transaction_id: None,
            status: PaymentStatus::Pending,
            currency: event.default_currency.clone(),
            pay_to: None,
            payment_date: None,
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply_status_change(&mut self, change: PaymentStatusChange) {
        self.status = change.status;
        if self.status == PaymentStatus::Completed && self.payment_date.is_none() {
            self.payment_date = Some(Utc::now());
        }

        if let Some(payment_method) = change.payment_method {
            self.payment_method = payment_method;
        }
        if let Some(transaction_id) = change.transaction_id {
            self.transaction_id = transaction_id;
        }
        if let Some(notes) = change.notes {
            self.notes = notes;
        }
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::application::Application;
    use crate::domain::event::{Event, EventDraft};

    fn approved_pair(fee: f64) -> (Application, Event) {
        let admin_id = Uuid::new_v4();
        let event = Event::create(
            admin_id,
            EventDraft {
                name: Some("Spring Food Festival".into()),
                event_date: Some("2026-04-15T10:00:00".into()),
                vendor_fee: Some(fee),
                ..Default::default()
            },
        )
        .unwrap();
        let application = Application::new(
            Uuid::new_v4(),
            event.id,
            Some("Gourmet burgers".into()),
            None,
            None,
        )
        .unwrap();
        (application, event)
    }

    #[test]
    fn snapshots_amount_and_currency_from_event() {
        let (application, mut event) = approved_pair(500.0);
        let payment = Payment::for_application(&application, &event);

        assert_eq!(payment.amount, 500.0);
        assert_eq!(payment.currency, "USD");
        assert_eq!(payment.status, PaymentStatus::Pending);
        assert!(payment.payment_date.is_none());

        // A later fee change on the event must not affect the snapshot.
        event.vendor_fee = 750.0;
        assert_eq!(payment.amount, 500.0);
    }

    #[test]
    fn payment_date_is_set_once() {
        let (application, event) = approved_pair(500.0);
        let mut payment = Payment::for_application(&application, &event);

        payment.apply_status_change(PaymentStatusChange {
            status: PaymentStatus::Completed,
            ..Default::default()
        });
        let first_date = payment.payment_date.expect("set on first completion");

        payment.apply_status_change(PaymentStatusChange {
            status: PaymentStatus::Completed,
            ..Default::default()
        });
        assert_eq!(payment.payment_date, Some(first_date));
    }

    #[test]
    fn merges_only_provided_detail_fields() {
        let (application, event) = approved_pair(300.0);
        let mut payment = Payment::for_application(&application, &event);

        payment.apply_status_change(PaymentStatusChange {
            status: PaymentStatus::Completed,
            payment_method: Some(Some("credit_card".into())),
            transaction_id: Some(Some("TXN001234567".into())),
            ..Default::default()
        });
        assert_eq!(payment.payment_method.as_deref(), Some("credit_card"));

        payment.apply_status_change(PaymentStatusChange {
            status: PaymentStatus::Refunded,
            notes: Some(Some("refunded after cancellation".into())),
            ..Default::default()
        });
        // Untouched fields survive the second change.
        assert_eq!(payment.transaction_id.as_deref(), Some("TXN001234567"));
        assert_eq!(payment.status, PaymentStatus::Refunded);
    }
}
