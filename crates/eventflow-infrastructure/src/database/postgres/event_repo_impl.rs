// ============================================================================
// EventFlow Infrastructure - PostgreSQL Event Repository
// File: crates/eventflow-infrastructure/src/database/postgres/event_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::{error, info};
use uuid::Uuid;

use eventflow_core::domain::{Event, EventStatus, EventView};
use eventflow_core::error::DomainError;
use eventflow_core::repositories::EventRepository;

pub struct PgEventRepository {
    pool: PgPool,
}

impl PgEventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const EVENT_COLUMNS: &str = r#"
    id, name, description, event_date, location, venue,
    expected_attendees, vendor_fee, status, created_by_admin_id,
    default_currency, currency_options, mpesa_number, paypal_account,
    zelle_account, card_instructions, created_at, updated_at
"#;

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

/// Listing row: event joined with the owning admin's email and, for the
/// admin listing, application counts.
#[derive(Debug, FromRow)]
struct EventListingRow {
    #[sqlx(flatten)]
    event: EventRow,
    admin_email: Option<String>,
    application_count: Option<i64>,
    approved_vendors: Option<i64>,
}

impl From<EventListingRow> for EventView {
    fn from(row: EventListingRow) -> Self {
        let event: Event = row.event.into();
        let view = EventView::from_event(&event, row.admin_email);
        match (row.application_count, row.approved_vendors) {
            (Some(applications), Some(approved)) => view.with_counts(applications, approved),
            _ => view,
        }
    }
}

#[async_trait]
impl EventRepository for PgEventRepository {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Event>, DomainError> {
        let row: Option<EventRow> = sqlx::query_as(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error finding event by id: {}", e);
            DomainError::Database(e.to_string())
        })?;

        Ok(row.map(|r| r.into()))
    }

    async fn create(&self, event: &Event) -> Result<Event, DomainError> {
        let row: EventRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO events (
                id, name, description, event_date, location, venue,
                expected_attendees, vendor_fee, status, created_by_admin_id,
                default_currency, currency_options, mpesa_number, paypal_account,
                zelle_account, card_instructions, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18)
            RETURNING {EVENT_COLUMNS}
            "#
        ))
        .bind(event.id)
        .bind(&event.name)
        .bind(&event.description)
        .bind(event.event_date)
        .bind(&event.location)
        .bind(&event.venue)
        .bind(event.expected_attendees)
        .bind(event.vendor_fee)
        .bind(event.status.as_str())
        .bind(event.created_by_admin_id)
        .bind(&event.default_currency)
        .bind(&event.currency_options)
        .bind(&event.mpesa_number)
        .bind(&event.paypal_account)
        .bind(&event.zelle_account)
        .bind(&event.card_instructions)
        .bind(event.created_at)
        .bind(event.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error creating event: {}", e);
            DomainError::Database(e.to_string())
        })?;

        info!("Event created: {}", row.id);
        Ok(row.into())
    }

    async fn update(&self, event: &Event) -> Result<Event, DomainError> {
        // created_by_admin_id is immutable and deliberately not updated.
        let row: EventRow = sqlx::query_as(&format!(
            r#"
            UPDATE events
            SET
                name = $2,
                description = $3,
                event_date = $4,
                location = $5,
                venue = $6,
                expected_attendees = $7,
                vendor_fee = $8,
                status = $9,
                default_currency = $10,
                currency_options = $11,
                mpesa_number = $12,
                paypal_account = $13,
                zelle_account = $14,
                card_instructions = $15,
                updated_at = $16
            WHERE id = $1
            RETURNING {EVENT_COLUMNS}
            "#
        ))
        .bind(event.id)
        .bind(&event.name)
        .bind(&event.description)
        .bind(event.event_date)
        .bind(&event.location)
        .bind(&event.venue)
        .bind(event.expected_attendees)
        .bind(event.vendor_fee)
        .bind(event.status.as_str())
        .bind(&event.default_currency)
        .bind(&event.currency_options)
        .bind(&event.mpesa_number)
        .bind(&event.paypal_account)
        .bind(&event.zelle_account)
        .bind(&event.card_instructions)
        .bind(event.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error updating event: {}", e);
            DomainError::Database(e.to_string())
        })?;

        Ok(row.into())
    }

    async fn delete(&self, id: &Uuid) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e: sqlx::Error| {
                error!("Database error deleting event: {}", e);
                DomainError::Database(e.to_string())
            })?;

        Ok(())
    }

    async fn application_count(&self, event_id: &Uuid) -> Result<i64, DomainError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM vendor_applications WHERE event_id = $1")
                .bind(event_id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e: sqlx::Error| {
                    error!("Database error counting applications: {}", e);
                    DomainError::Database(e.to_string())
                })?;

        Ok(count)
    }

    async fn list_for_admin(&self, admin_id: &Uuid) -> Result<Vec<EventView>, DomainError> {
        let rows: Vec<EventListingRow> = sqlx::query_as(
            r#"
            SELECT
                e.id, e.name, e.description, e.event_date, e.location, e.venue,
                e.expected_attendees, e.vendor_fee, e.status, e.created_by_admin_id,
                e.default_currency, e.currency_options, e.mpesa_number, e.paypal_account,
                e.zelle_account, e.card_instructions, e.created_at, e.updated_at,
                u.email AS admin_email,
                COUNT(a.id) AS application_count,
                COUNT(a.id) FILTER (WHERE a.status = 'approved') AS approved_vendors
            FROM events e
            JOIN users u ON u.id = e.created_by_admin_id
            LEFT JOIN vendor_applications a ON a.event_id = e.id
            WHERE e.created_by_admin_id = $1
            GROUP BY e.id, u.email
            ORDER BY e.event_date DESC
            "#,
        )
        .bind(admin_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error listing admin events: {}", e);
            DomainError::Database(e.to_string())
        })?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn list_public(&self) -> Result<Vec<EventView>, DomainError> {
        let rows: Vec<EventListingRow> = sqlx::query_as(
            r#"
            SELECT
                e.id, e.name, e.description, e.event_date, e.location, e.venue,
                e.expected_attendees, e.vendor_fee, e.status, e.created_by_admin_id,
                e.default_currency, e.currency_options, e.mpesa_number, e.paypal_account,
                e.zelle_account, e.card_instructions, e.created_at, e.updated_at,
                u.email AS admin_email,
                NULL::bigint AS application_count,
                NULL::bigint AS approved_vendors
            FROM events e
            JOIN users u ON u.id = e.created_by_admin_id
            WHERE e.status IN ('upcoming', 'ongoing')
            ORDER BY e.event_date ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error listing public events: {}", e);
            DomainError::Database(e.to_string())
        })?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }
}
