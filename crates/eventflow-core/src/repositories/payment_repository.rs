//! Payment repository trait (port)

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Payment, PaymentView};
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PaymentRepository: Send + Sync {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Payment>, DomainError>;
    /// Payment plus the admin who owns it through the
    /// application -> event chain.
    async fn find_with_owner(&self, id: &Uuid) -> Result<Option<(Payment, Uuid)>, DomainError>;
    async fn update(&self, payment: &Payment) -> Result<Payment, DomainError>;
    async fn find_view(&self, id: &Uuid) -> Result<Option<PaymentView>, DomainError>;
    /// Payments under the admin's events, newest first.
    async fn list_for_admin(&self, admin_id: &Uuid) -> Result<Vec<PaymentView>, DomainError>;
    async fn list_for_vendor(&self, vendor_id: &Uuid) -> Result<Vec<PaymentView>, DomainError>;
}
