// ============================================================================
// EventFlow Infrastructure - PostgreSQL Application Repository
// File: crates/eventflow-infrastructure/src/database/postgres/application_repo_impl.rs
// Description: Application persistence, including the transactional review
//              commit that keeps approval payment-creation idempotent
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::{error, info};
use uuid::Uuid;

use eventflow_core::domain::{
    Application, ApplicationStatus, ApplicationView, Event, EventStatus, Payment,
};
use eventflow_core::error::DomainError;
use eventflow_core::repositories::{ApplicationFilter, ApplicationRepository};

pub struct PgApplicationRepository {
    pool: PgPool,
}

impl PgApplicationRepository {
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

const APPLICATION_COLUMNS: &str = r#"
    id, vendor_id, event_id, product_service, booth_requirements,
    additional_notes, status, admin_notes, reviewed_at, reviewed_by,
    applied_at, updated_at
"#;

#[derive(Debug, FromRow)]
struct ApplicationRow {
    pub id: Uuid,
    pub vendor_id: Uuid,
    pub event_id: Uuid,
    pub product_service: String,
    pub booth_requirements: Option<String>,
    pub additional_notes: Option<String>,
    pub status: String,
    pub admin_notes: Option<String>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub reviewed_by: Option<Uuid>,
    pub applied_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ApplicationRow> for Application {
    fn from(row: ApplicationRow) -> Self {
        Application {
            id: row.id,
            vendor_id: row.vendor_id,
            event_id: row.event_id,
            product_service: row.product_service,
            booth_requirements: row.booth_requirements,
            additional_notes: row.additional_notes,
            status: ApplicationStatus::from_str(&row.status).unwrap_or_default(),
            admin_notes: row.admin_notes,
            reviewed_at: row.reviewed_at,
            reviewed_by: row.reviewed_by,
            applied_at: row.applied_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, FromRow)]
struct EventRow {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub event_date: DateTime<Utc>,
    pub location: Option<String>,
    pub venue: Option<String>,
    pub expected_attendees: Option<i32>,
    pub vendor_fee: f64,
    pub status: String,
    pub created_by_admin_id: Uuid,
    pub default_currency: String,
    pub currency_options: String,
    pub mpesa_number: Option<String>,
    pub paypal_account: Option<String>,
    pub zelle_account: Option<String>,
    pub card_instructions: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<EventRow> for Event {
    fn from(row: EventRow) -> Self {
        Event {
            id: row.id,
            name: row.name,
            description: row.description,
            event_date: row.event_date,
            location: row.location,
            venue: row.venue,
            expected_attendees: row.expected_attendees,
            vendor_fee: row.vendor_fee,
            status: EventStatus::from_str(&row.status).unwrap_or_default(),
            created_by_admin_id: row.created_by_admin_id,
            default_currency: row.default_currency,
            currency_options: row.currency_options,
            mpesa_number: row.mpesa_number,
            paypal_account: row.paypal_account,
            zelle_account: row.zelle_account,
            card_instructions: row.card_instructions,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Application joined with vendor and event for the HTTP surface.
#[derive(Debug, FromRow)]
struct ApplicationViewRow {
    pub id: Uuid,
    pub vendor_id: Uuid,
    pub vendor_name: String,
    pub vendor_company: Option<String>,
    pub event_id: Uuid,
    pub event_name: String,
    pub event_date: DateTime<Utc>,
    pub product_service: String,
    pub booth_requirements: Option<String>,
    pub additional_notes: Option<String>,
    pub status: String,
    pub admin_notes: Option<String>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub applied_at: DateTime<Utc>,
    pub vendor_fee: f64,
    pub default_currency: String,
    pub currency_options: String,
    pub mpesa_number: Option<String>,
    pub paypal_account: Option<String>,
    pub zelle_account: Option<String>,
    pub card_instructions: Option<String>,
}

impl From<ApplicationViewRow> for ApplicationView {
    fn from(row: ApplicationViewRow) -> Self {
        ApplicationView {
            id: row.id,
            vendor_id: row.vendor_id,
            vendor_name: row.vendor_name,
            vendor_company: row.vendor_company,
            event_id: row.event_id,
            event_name: row.event_name,
            event_date: row.event_date,
            product_service: row.product_service,
            booth_requirements: row.booth_requirements,
            additional_notes: row.additional_notes,
            status: ApplicationStatus::from_str(&row.status).unwrap_or_default(),
            admin_notes: row.admin_notes,
            reviewed_at: row.reviewed_at,
            applied_at: row.applied_at,
            vendor_fee: row.vendor_fee,
            default_currency: row.default_currency,
            currency_options: row.currency_options,
            mpesa_number: row.mpesa_number,
            paypal_account: row.paypal_account,
            zelle_account: row.zelle_account,
            card_instructions: row.card_instructions,
        }
    }
}

const APPLICATION_VIEW_QUERY: &str = r#"
    SELECT
        a.id, a.vendor_id, v.full_name AS vendor_name, v.company_name AS vendor_company,
        a.event_id, e.name AS event_name, e.event_date,
        a.product_service, a.booth_requirements, a.additional_notes,
        a.status, a.admin_notes, a.reviewed_at, a.applied_at,
        e.vendor_fee, e.default_currency, e.currency_options,
        e.mpesa_number, e.paypal_account, e.zelle_account, e.card_instructions
    FROM vendor_applications a
    JOIN users v ON v.id = a.vendor_id
    JOIN events e ON e.id = a.event_id
"#;

#[async_trait]
impl ApplicationRepository for PgApplicationRepository {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Application>, DomainError> {
        let row: Option<ApplicationRow> = sqlx::query_as(&format!(
            "SELECT {APPLICATION_COLUMNS} FROM vendor_applications WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("finding application by id"))?;

        Ok(row.map(|r| r.into()))
    }

    async fn find_with_event(
        &self,
        id: &Uuid,
    ) -> Result<Option<(Application, Event)>, DomainError> {
        let application = match self.find_by_id(id).await? {
            Some(application) => application,
            None => return Ok(None),
        };

        let event: Option<EventRow> = sqlx::query_as(
            r#"
            SELECT
                id, name, description, event_date, location, venue,
                expected_attendees, vendor_fee, status, created_by_admin_id,
                default_currency, currency_options, mpesa_number, paypal_account,
                zelle_account, card_instructions, created_at, updated_at
            FROM events
            WHERE id = $1
            "#,
        )
        .bind(application.event_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("finding application event"))?;

        Ok(event.map(|e| (application, e.into())))
    }

    async fn find_by_vendor_and_event(
        &self,
        vendor_id: &Uuid,
        event_id: &Uuid,
    ) -> Result<Option<Application>, DomainError> {
        let row: Option<ApplicationRow> = sqlx::query_as(&format!(
            "SELECT {APPLICATION_COLUMNS} FROM vendor_applications WHERE vendor_id = $1 AND event_id = $2"
        ))
        .bind(vendor_id)
        .bind(event_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("finding application by vendor and event"))?;

        Ok(row.map(|r| r.into()))
    }

    async fn create(&self, application: &Application) -> Result<Application, DomainError> {
        let row: ApplicationRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO vendor_applications (
                id, vendor_id, event_id, product_service, booth_requirements,
                additional_notes, status, admin_notes, reviewed_at, reviewed_by,
                applied_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING {APPLICATION_COLUMNS}
            "#
        ))
        .bind(application.id)
        .bind(application.vendor_id)
        .bind(application.event_id)
        .bind(&application.product_service)
        .bind(&application.booth_requirements)
        .bind(&application.additional_notes)
        .bind(application.status.as_str())
        .bind(&application.admin_notes)
        .bind(application.reviewed_at)
        .bind(application.reviewed_by)
        .bind(application.applied_at)
        .bind(application.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error creating application: {}", e);
            let msg = e.to_string();
            if msg.contains("unique") || msg.contains("duplicate") {
                DomainError::DuplicateApplication
            } else {
                DomainError::Database(msg)
            }
        })?;

        info!("Application created: {}", row.id);
        Ok(row.into())
    }

    async fn update(&self, application: &Application) -> Result<Application, DomainError> {
        let row: ApplicationRow = sqlx::query_as(&format!(
            r#"
            UPDATE vendor_applications
            SET
                product_service = $2,
                booth_requirements = $3,
                additional_notes = $4,
                status = $5,
                admin_notes = $6,
                reviewed_at = $7,
                reviewed_by = $8,
                updated_at = $9
            WHERE id = $1
            RETURNING {APPLICATION_COLUMNS}
            "#
        ))
        .bind(application.id)
        .bind(&application.product_service)
        .bind(&application.booth_requirements)
        .bind(&application.additional_notes)
        .bind(application.status.as_str())
        .bind(&application.admin_notes)
        .bind(application.reviewed_at)
        .bind(application.reviewed_by)
        .bind(application.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("updating application"))?;

        Ok(row.into())
    }

    /// One transaction for the review commit. The payment insert rides on
    /// the UNIQUE constraint on payments.application_id: a concurrent or
    /// retried approval hits ON CONFLICT DO NOTHING instead of recording a
    /// second payment.
    async fn persist_review<'a>(
        &self,
        application: &Application,
        payment: Option<&'a Payment>,
    ) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("starting review transaction"))?;

        sqlx::query(
            r#"
            UPDATE vendor_applications
            SET status = $2, admin_notes = $3, reviewed_at = $4, reviewed_by = $5, updated_at = $6
            WHERE id = $1
            "#,
        )
        .bind(application.id)
        .bind(application.status.as_str())
        .bind(&application.admin_notes)
        .bind(application.reviewed_at)
        .bind(application.reviewed_by)
        .bind(application.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(db_error("persisting review"))?;

        if let Some(payment) = payment {
            sqlx::query(
                r#"
                INSERT INTO payments (
                    id, application_id, vendor_id, amount, payment_method,
                    transaction_id, status, currency, pay_to, payment_date,
                    notes, created_at, updated_at
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
                ON CONFLICT (application_id) DO NOTHING
                "#,
            )
            .bind(payment.id)
            .bind(payment.application_id)
            .bind(payment.vendor_id)
            .bind(payment.amount)
            .bind(&payment.payment_method)
            .bind(&payment.transaction_id)
            .bind(payment.status.as_str())
            .bind(&payment.currency)
            .bind(&payment.pay_to)
            .bind(payment.payment_date)
            .bind(&payment.notes)
            .bind(payment.created_at)
            .bind(payment.updated_at)
            .execute(&mut *tx)
            .await
            .map_err(db_error("persisting review payment"))?;
        }

        tx.commit()
            .await
            .map_err(db_error("committing review transaction"))?;

        Ok(())
    }

    async fn find_view(&self, id: &Uuid) -> Result<Option<ApplicationView>, DomainError> {
        let row: Option<ApplicationViewRow> =
            sqlx::query_as(&format!("{APPLICATION_VIEW_QUERY} WHERE a.id = $1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(db_error("loading application view"))?;

        Ok(row.map(|r| r.into()))
    }

    async fn list_for_admin(
        &self,
        admin_id: &Uuid,
        filter: &ApplicationFilter,
    ) -> Result<Vec<ApplicationView>, DomainError> {
        let rows: Vec<ApplicationViewRow> = sqlx::query_as(&format!(
            r#"
            {APPLICATION_VIEW_QUERY}
            WHERE e.created_by_admin_id = $1
              AND ($2::text IS NULL OR a.status = $2)
              AND ($3::uuid IS NULL OR a.event_id = $3)
            ORDER BY a.applied_at DESC
            "#
        ))
        .bind(admin_id)
        .bind(filter.status.map(|s| s.as_str()))
        .bind(filter.event_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("listing admin applications"))?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn list_for_vendor(
        &self,
        vendor_id: &Uuid,
    ) -> Result<Vec<ApplicationView>, DomainError> {
        let rows: Vec<ApplicationViewRow> = sqlx::query_as(&format!(
            "{APPLICATION_VIEW_QUERY} WHERE a.vendor_id = $1 ORDER BY a.applied_at DESC"
        ))
        .bind(vendor_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("listing vendor applications"))?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }
}
