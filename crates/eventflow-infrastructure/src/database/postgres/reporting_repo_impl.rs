// ============================================================================
// EventFlow Infrastructure - PostgreSQL Reporting Repository
// File: crates/eventflow-infrastructure/src/database/postgres/reporting_repo_impl.rs
// Description: Dashboard and analytics aggregates. Every query joins
//              through events.created_by_admin_id so one admin's report
//              can never include another admin's data.
// ============================================================================

use async_trait::async_trait;
use chrono::{Duration, Utc};
use sqlx::{FromRow, PgPool};
use tracing::error;
use uuid::Uuid;

use eventflow_core::domain::{
    ApplicationStats, DashboardStats, EventStats, MonthCount, MonthRevenue, RevenueStats,
    StatusCount, VendorStats,
};
use eventflow_core::error::DomainError;
use eventflow_core::repositories::ReportingRepository;
use eventflow_shared::constants::{ANALYTICS_WINDOW_DAYS, RECENT_ACTIVITY_DAYS};

pub struct PgReportingRepository {
    pool: PgPool,
}

impl PgReportingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn db_error(context: &str) -> impl Fn(sqlx::Error) -> DomainError + '_ {
    move |e: sqlx::Error| {
        error!("Database error {}: {}", context, e);
        DomainError::Database(e.to_string())
    }
}

#[derive(Debug, FromRow)]
struct VendorStatsRow {
    total: i64,
    active: i64,
    new_this_week: i64,
}

#[derive(Debug, FromRow)]
struct ApplicationStatsRow {
    total: i64,
    pending: i64,
    approved: i64,
    rejected: i64,
    new_this_week: i64,
}

#[derive(Debug, FromRow)]
struct EventStatsRow {
    total: i64,
    upcoming: i64,
    ongoing: i64,
}

#[derive(Debug, FromRow)]
struct RevenueRow {
    total: f64,
    pending: f64,
}

#[async_trait]
impl ReportingRepository for PgReportingRepository {
    async fn dashboard_stats(&self, admin_id: &Uuid) -> Result<DashboardStats, DomainError> {
        let week_ago = Utc::now() - Duration::days(RECENT_ACTIVITY_DAYS);

        // Vendors with at least one application to one of the admin's
        // events; the dashboard never counts vendors an admin has no
        // relationship with.
        let vendors: VendorStatsRow = sqlx::query_as(
            r#"
            SELECT
                COUNT(*) AS total,
                COUNT(*) FILTER (WHERE u.is_active) AS active,
                COUNT(*) FILTER (WHERE u.created_at >= $2) AS new_this_week
            FROM users u
            WHERE u.role = 'vendor'
              AND u.id IN (
                  SELECT a.vendor_id
                  FROM vendor_applications a
                  JOIN events e ON e.id = a.event_id
                  WHERE e.created_by_admin_id = $1
              )
            "#,
        )
        .bind(admin_id)
        .bind(week_ago)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("aggregating vendor stats"))?;

        let applications: ApplicationStatsRow = sqlx::query_as(
            r#"
            SELECT
                COUNT(*) AS total,
                COUNT(*) FILTER (WHERE a.status = 'pending') AS pending,
                COUNT(*) FILTER (WHERE a.status = 'approved') AS approved,
                COUNT(*) FILTER (WHERE a.status = 'rejected') AS rejected,
                COUNT(*) FILTER (WHERE a.applied_at >= $2) AS new_this_week
            FROM vendor_applications a
            JOIN events e ON e.id = a.event_id
            WHERE e.created_by_admin_id = $1
            "#,
        )
        .bind(admin_id)
        .bind(week_ago)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("aggregating application stats"))?;

        let events: EventStatsRow = sqlx::query_as(
            r#"
            SELECT
                COUNT(*) AS total,
                COUNT(*) FILTER (WHERE status = 'upcoming' AND event_date > NOW()) AS upcoming,
                COUNT(*) FILTER (WHERE status = 'ongoing') AS ongoing
            FROM events
            WHERE created_by_admin_id = $1
            "#,
        )
        .bind(admin_id)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("aggregating event stats"))?;

        let revenue: RevenueRow = sqlx::query_as(
            r#"
            SELECT
                COALESCE(SUM(p.amount) FILTER (WHERE p.status = 'completed'), 0) AS total,
                COALESCE(SUM(p.amount) FILTER (WHERE p.status = 'pending'), 0) AS pending
            FROM payments p
            JOIN vendor_applications a ON a.id = p.application_id
            JOIN events e ON e.id = a.event_id
            WHERE e.created_by_admin_id = $1
            "#,
        )
        .bind(admin_id)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("aggregating revenue stats"))?;

        Ok(DashboardStats {
            vendors: VendorStats {
                total: vendors.total,
                active: vendors.active,
                inactive: vendors.total - vendors.active,
                new_this_week: vendors.new_this_week,
            },
            applications: ApplicationStats {
                total: applications.total,
                pending: applications.pending,
                approved: applications.approved,
                rejected: applications.rejected,
                new_this_week: applications.new_this_week,
            },
            events: EventStats {
                total: events.total,
                upcoming: events.upcoming,
                ongoing: events.ongoing,
            },
            revenue: RevenueStats {
                total: revenue.total,
                pending: revenue.pending,
            },
        })
    }

    async fn applications_by_status(
        &self,
        admin_id: &Uuid,
    ) -> Result<Vec<StatusCount>, DomainError> {
        let rows: Vec<(String, i64)> = sqlx::query_as(
            r#"
            SELECT a.status, COUNT(a.id)
            FROM vendor_applications a
            JOIN events e ON e.id = a.event_id
            WHERE e.created_by_admin_id = $1
            GROUP BY a.status
            "#,
        )
        .bind(admin_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("grouping applications by status"))?;

        Ok(rows
            .into_iter()
            .map(|(status, count)| StatusCount { status, count })
            .collect())
    }

    async fn applications_over_time(
        &self,
        admin_id: &Uuid,
    ) -> Result<Vec<MonthCount>, DomainError> {
        let window_start = Utc::now() - Duration::days(ANALYTICS_WINDOW_DAYS);

        let rows: Vec<(String, i64)> = sqlx::query_as(
            r#"
            SELECT to_char(date_trunc('month', a.applied_at), 'YYYY-MM') AS month, COUNT(a.id)
            FROM vendor_applications a
            JOIN events e ON e.id = a.event_id
            WHERE e.created_by_admin_id = $1
              AND a.applied_at >= $2
            GROUP BY 1
            ORDER BY 1
            "#,
        )
        .bind(admin_id)
        .bind(window_start)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("bucketing applications over time"))?;

        Ok(rows
            .into_iter()
            .map(|(month, count)| MonthCount { month, count })
            .collect())
    }

    async fn revenue_by_month(&self, admin_id: &Uuid) -> Result<Vec<MonthRevenue>, DomainError> {
        let window_start = Utc::now() - Duration::days(ANALYTICS_WINDOW_DAYS);

        let rows: Vec<(String, f64)> = sqlx::query_as(
            r#"
            SELECT to_char(date_trunc('month', p.payment_date), 'YYYY-MM') AS month,
                   COALESCE(SUM(p.amount), 0)
            FROM payments p
            JOIN vendor_applications a ON a.id = p.application_id
            JOIN events e ON e.id = a.event_id
            WHERE e.created_by_admin_id = $1
              AND p.status = 'completed'
              AND p.payment_date >= $2
            GROUP BY 1
            ORDER BY 1
            "#,
        )
        .bind(admin_id)
        .bind(window_start)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("bucketing revenue by month"))?;

        Ok(rows
            .into_iter()
            .map(|(month, revenue)| MonthRevenue { month, revenue })
            .collect())
    }
}
