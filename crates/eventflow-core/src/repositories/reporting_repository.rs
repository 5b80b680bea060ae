//! Reporting repository trait (port)
//!
//! Read-only aggregation. Every query carries the same ownership-chain
//! filter as the listing endpoints; a report must never leak counts from
//! another admin's events.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{DashboardStats, MonthCount, MonthRevenue, StatusCount};
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReportingRepository: Send + Sync {
    async fn dashboard_stats(&self, admin_id: &Uuid) -> Result<DashboardStats, DomainError>;
    async fn applications_by_status(
        &self,
        admin_id: &Uuid,
    ) -> Result<Vec<StatusCount>, DomainError>;
    async fn applications_over_time(
        &self,
        admin_id: &Uuid,
    ) -> Result<Vec<MonthCount>, DomainError>;
    async fn revenue_by_month(&self, admin_id: &Uuid) -> Result<Vec<MonthRevenue>, DomainError>;
}
