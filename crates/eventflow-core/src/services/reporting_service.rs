//! Reporting service
//!
//! Dashboard and analytics aggregates, all scoped to the acting admin's
//! owned events by the reporting adapter's queries.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{DashboardStats, MonthCount, MonthRevenue, StatusCount};
use crate::error::DomainError;
use crate::repositories::ReportingRepository;

pub struct ReportingService<R: ReportingRepository> {
    reports: Arc<R>,
}

impl<R: ReportingRepository> ReportingService<R> {
    pub fn new(reports: Arc<R>) -> Self {
        Self { reports }
    }

    pub async fn dashboard_stats(&self, admin_id: Uuid) -> Result<DashboardStats, DomainError> {
        self.reports.dashboard_stats(&admin_id).await
    }

    pub async fn applications_by_status(
        &self,
        admin_id: Uuid,
    ) -> Result<Vec<StatusCount>, DomainError> {
        self.reports.applications_by_status(&admin_id).await
    }

    pub async fn applications_over_time(
        &self,
        admin_id: Uuid,
    ) -> Result<Vec<MonthCount>, DomainError> {
        self.reports.applications_over_time(&admin_id).await
    }

    pub async fn revenue_by_month(
        &self,
        admin_id: Uuid,
    ) -> Result<Vec<MonthRevenue>, DomainError> {
        self.reports.revenue_by_month(&admin_id).await
    }
}
