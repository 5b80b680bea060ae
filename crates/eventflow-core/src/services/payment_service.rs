//! Payment ledger service
//!
//! Admin-driven status updates on payment records. The ownership chain
//! (payment -> application -> event -> admin) is verified on every
//! mutation and listing.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::domain::{PaymentStatus, PaymentStatusChange, PaymentView};
use crate::error::DomainError;
use crate::repositories::PaymentRepository;

/// Raw status-update request; `status` is required, detail fields are
/// merged only when provided.
#[derive(Debug, Clone, Default)]
pub struct PaymentStatusRequest {
    pub status: Option<String>,
    pub payment_method: Option<Option<String>>,
    pub transaction_id: Option<Option<String>>,
    pub notes: Option<Option<String>>,
}

pub struct PaymentService<P: PaymentRepository> {
    payments: Arc<P>,
}

impl<P: PaymentRepository> PaymentService<P> {
    pub fn new(payments: Arc<P>) -> Self {
        Self { payments }
    }

    pub async fn update_status(
        &self,
        admin_id: Uuid,
        payment_id: Uuid,
        request: PaymentStatusRequest,
    ) -> Result<PaymentView, DomainError> {
        let (mut payment, owner_admin_id) = self
            .payments
            .find_with_owner(&payment_id)
            .await?
            .ok_or(DomainError::PaymentNotFound)?;

        if owner_admin_id != admin_id {
            return Err(DomainError::NotEventOwner);
        }

        let raw_status = request.status.ok_or(DomainError::PaymentStatusRequired)?;
        let status =
            PaymentStatus::from_str(&raw_status).ok_or(DomainError::InvalidPaymentStatus)?;

        payment.apply_status_change(PaymentStatusChange {
            status,
            payment_method: request.payment_method,
            transaction_id: request.transaction_id,
            notes: request.notes,
        });
        self.payments.update(&payment).await?;

        info!(payment_id = %payment_id, status = status.as_str(), "Payment status updated");

        self.payments
            .find_view(&payment_id)
            .await?
            .ok_or(DomainError::PaymentNotFound)
    }

    pub async fn list_for_admin(&self, admin_id: Uuid) -> Result<Vec<PaymentView>, DomainError> {
        self.payments.list_for_admin(&admin_id).await
    }

    pub async fn list_for_vendor(&self, vendor_id: Uuid) -> Result<Vec<PaymentView>, DomainError> {
        self.payments.list_for_vendor(&vendor_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Application, Event, EventDraft, Payment};
    use crate::repositories::payment_repository::MockPaymentRepository;

    fn sample_payment(admin_id: Uuid) -> Payment {
        let event = Event::create(
            admin_id,
            EventDraft {
                name: Some("Tech Expo".into()),
                event_date: Some("2026-05-20T09:00:00".into()),
                vendor_fee: Some(1000.0),
                ..Default::default()
            },
        )
        .unwrap();
        let application = Application::new(
            Uuid::new_v4(),
            event.id,
            Some("Smartphones".into()),
            None,
            None,
        )
        .unwrap();
        Payment::for_application(&application, &event)
    }

    fn view_for(payment: &Payment) -> PaymentView {
        PaymentView {
            id: payment.id,
            application_id: payment.application_id,
            vendor_id: payment.vendor_id,
            vendor_name: "Michael Chen".into(),
            amount: payment.amount,
            payment_method: payment.payment_method.clone(),
            transaction_id: payment.transaction_id.clone(),
            status: payment.status,
            currency: payment.currency.clone(),
            pay_to: payment.pay_to.clone(),
            payment_date: payment.payment_date,
            created_at: payment.created_at,
            notes: payment.notes.clone(),
        }
    }

    #[tokio::test]
    async fn update_by_non_owner_is_forbidden() {
        let owner = Uuid::new_v4();
        let payment = sample_payment(owner);

        let mut repo = MockPaymentRepository::new();
        repo.expect_find_with_owner()
            .returning(move |_| Ok(Some((payment.clone(), owner))));

        let err = PaymentService::new(Arc::new(repo))
            .update_status(
                Uuid::new_v4(),
                Uuid::new_v4(),
                PaymentStatusRequest {
                    status: Some("completed".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotEventOwner));
    }

    #[tokio::test]
    async fn update_requires_status() {
        let admin_id = Uuid::new_v4();
        let payment = sample_payment(admin_id);

        let mut repo = MockPaymentRepository::new();
        repo.expect_find_with_owner()
            .returning(move |_| Ok(Some((payment.clone(), admin_id))));

        let err = PaymentService::new(Arc::new(repo))
            .update_status(admin_id, Uuid::new_v4(), PaymentStatusRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::PaymentStatusRequired));
    }

    #[tokio::test]
    async fn update_rejects_unknown_status() {
        let admin_id = Uuid::new_v4();
        let payment = sample_payment(admin_id);

        let mut repo = MockPaymentRepository::new();
        repo.expect_find_with_owner()
            .returning(move |_| Ok(Some((payment.clone(), admin_id))));

        let err = PaymentService::new(Arc::new(repo))
            .update_status(
                admin_id,
                Uuid::new_v4(),
                PaymentStatusRequest {
                    status: Some("charged".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidPaymentStatus));
    }

    #[tokio::test]
    async fn completion_sets_payment_date_and_merges_fields() {
        let admin_id = Uuid::new_v4();
        let payment = sample_payment(admin_id);
        let payment_id = payment.id;

        let mut repo = MockPaymentRepository::new();
        {
            let payment = payment.clone();
            repo.expect_find_with_owner()
                .returning(move |_| Ok(Some((payment.clone(), admin_id))));
        }
        repo.expect_update()
            .withf(|payment| {
                payment.status == PaymentStatus::Completed
                    && payment.payment_date.is_some()
                    && payment.payment_method.as_deref() == Some("credit_card")
            })
            .times(1)
            .returning(|payment| Ok(payment.clone()));
        repo.expect_find_view().returning(move |_| {
            let mut completed = payment.clone();
            completed.status = PaymentStatus::Completed;
            Ok(Some(view_for(&completed)))
        });

        let view = PaymentService::new(Arc::new(repo))
            .update_status(
                admin_id,
                payment_id,
                PaymentStatusRequest {
                    status: Some("completed".into()),
                    payment_method: Some(Some("credit_card".into())),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(view.status, PaymentStatus::Completed);
    }
}
