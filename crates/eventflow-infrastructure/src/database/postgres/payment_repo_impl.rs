// ============================================================================
// EventFlow Infrastructure - PostgreSQL Payment Repository
// File: crates/eventflow-infrastructure/src/database/postgres/payment_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::error;
use uuid::Uuid;

use eventflow_core::domain::{Payment, PaymentStatus, PaymentView};
use eventflow_core::error::DomainError;
use eventflow_core::repositories::PaymentRepository;

pub struct PgPaymentRepository {
    pool: PgPool,
}

impl PgPaymentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const PAYMENT_COLUMNS: &str = r#"
    id, application_id, vendor_id, amount, payment_method,
    transaction_id, status, currency, pay_to, payment_date,
    notes, created_at, updated_at
"#;

#[derive(Debug, FromRow)]
struct PaymentRow {
    pub id: Uuid,
    pub application_id: Uuid,
    pub vendor_id: Uuid,
    pub amount: f64,
    pub payment_method: Option<String>,
    pub transaction_id: Option<String>,
    pub status: String,
    pub currency: String,
    pub pay_to: Option<String>,
    pub payment_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<PaymentRow> for Payment {
    fn from(row: PaymentRow) -> Self {
        Payment {
            id: row.id,
            application_id: row.application_id,
            vendor_id: row.vendor_id,
            amount: row.amount,
            payment_method: row.payment_method,
            transaction_id: row.transaction_id,
            status: PaymentStatus::from_str(&row.status).unwrap_or_default(),
            currency: row.currency,
            pay_to: row.pay_to,
            payment_date: row.payment_date,
            notes: row.notes,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Payment plus the owning admin resolved through the ownership chain.
#[derive(Debug, FromRow)]
struct PaymentOwnerRow {
    #[sqlx(flatten)]
    payment: PaymentRow,
    owner_admin_id: Uuid,
}

#[derive(Debug, FromRow)]
struct PaymentViewRow {
    #[sqlx(flatten)]
    payment: PaymentRow,
    vendor_name: String,
}

impl From<PaymentViewRow> for PaymentView {
    fn from(row: PaymentViewRow) -> Self {
        PaymentView {
            id: row.payment.id,
            application_id: row.payment.application_id,
            vendor_id: row.payment.vendor_id,
            vendor_name: row.vendor_name,
            amount: row.payment.amount,
            payment_method: row.payment.payment_method,
            transaction_id: row.payment.transaction_id,
            status: PaymentStatus::from_str(&row.payment.status).unwrap_or_default(),
            currency: row.payment.currency,
            pay_to: row.payment.pay_to,
            payment_date: row.payment.payment_date,
            created_at: row.payment.created_at,
            notes: row.payment.notes,
        }
    }
}

const PAYMENT_VIEW_QUERY: &str = r#"
    SELECT
        p.id, p.application_id, p.vendor_id, p.amount, p.payment_method,
        p.transaction_id, p.status, p.currency, p.pay_to, p.payment_date,
        p.notes, p.created_at, p.updated_at,
        v.full_name AS vendor_name
    FROM payments p
    JOIN users v ON v.id = p.vendor_id
"#;

#[async_trait]
impl PaymentRepository for PgPaymentRepository {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Payment>, DomainError> {
        let row: Option<PaymentRow> = sqlx::query_as(&format!(
            "SELECT {PAYMENT_COLUMNS} FROM payments WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error finding payment by id: {}", e);
            DomainError::Database(e.to_string())
        })?;

        Ok(row.map(|r| r.into()))
    }

    async fn find_with_owner(&self, id: &Uuid) -> Result<Option<(Payment, Uuid)>, DomainError> {
        let row: Option<PaymentOwnerRow> = sqlx::query_as(
            r#"
            SELECT
                p.id, p.application_id, p.vendor_id, p.amount, p.payment_method,
                p.transaction_id, p.status, p.currency, p.pay_to, p.payment_date,
                p.notes, p.created_at, p.updated_at,
                e.created_by_admin_id AS owner_admin_id
            FROM payments p
            JOIN vendor_applications a ON a.id = p.application_id
            JOIN events e ON e.id = a.event_id
            WHERE p.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error resolving payment owner: {}", e);
            DomainError::Database(e.to_string())
        })?;

        Ok(row.map(|r| (r.payment.into(), r.owner_admin_id)))
    }

    async fn update(&self, payment: &Payment) -> Result<Payment, DomainError> {
        // amount, application_id, and vendor_id are snapshots; only the
        // status lifecycle fields are writable.
        let row: PaymentRow = sqlx::query_as(&format!(
            r#"
            UPDATE payments
            SET
                payment_method = $2,
                transaction_id = $3,
                status = $4,
                pay_to = $5,
                payment_date = $6,
                notes = $7,
                updated_at = $8
            WHERE id = $1
            RETURNING {PAYMENT_COLUMNS}
            "#
        ))
        .bind(payment.id)
        .bind(&payment.payment_method)
        .bind(&payment.transaction_id)
        .bind(payment.status.as_str())
        .bind(&payment.pay_to)
        .bind(payment.payment_date)
        .bind(&payment.notes)
        .bind(payment.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error updating payment: {}", e);
            DomainError::Database(e.to_string())
        })?;

        Ok(row.into())
    }

    async fn find_view(&self, id: &Uuid) -> Result<Option<PaymentView>, DomainError> {
        let row: Option<PaymentViewRow> =
            sqlx::query_as(&format!("{PAYMENT_VIEW_QUERY} WHERE p.id = $1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e: sqlx::Error| {
                    error!("Database error loading payment view: {}", e);
                    DomainError::Database(e.to_string())
                })?;

        Ok(row.map(|r| r.into()))
    }

    async fn list_for_admin(&self, admin_id: &Uuid) -> Result<Vec<PaymentView>, DomainError> {
        let rows: Vec<PaymentViewRow> = sqlx::query_as(&format!(
            r#"
            {PAYMENT_VIEW_QUERY}
            JOIN vendor_applications a ON a.id = p.application_id
            JOIN events e ON e.id = a.event_id
            WHERE e.created_by_admin_id = $1
            ORDER BY p.created_at DESC
            "#
        ))
        .bind(admin_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error listing admin payments: {}", e);
            DomainError::Database(e.to_string())
        })?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn list_for_vendor(&self, vendor_id: &Uuid) -> Result<Vec<PaymentView>, DomainError> {
        let rows: Vec<PaymentViewRow> = sqlx::query_as(&format!(
            "{PAYMENT_VIEW_QUERY} WHERE p.vendor_id = $1 ORDER BY p.created_at DESC"
        ))
        .bind(vendor_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error listing vendor payments: {}", e);
            DomainError::Database(e.to_string())
        })?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }
}
