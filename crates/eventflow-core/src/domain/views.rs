//! Read-model views
//!
//! Flattened, serializable projections of the domain entities with the
//! joined fields the HTTP surface exposes (vendor names on applications,
//! the owning admin's email on events, application counts). Field names
//! are the wire format.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::application::ApplicationStatus;
use crate::domain::event::{Event, EventStatus};
use crate::domain::payment::PaymentStatus;
use crate::domain::user::{User, UserRole};

#[derive(Debug, Clone, Serialize)]
pub struct UserView {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub role: UserRole,
    pub phone: Option<String>,
    pub company_name: Option<String>,
    pub business_type: Option<String>,
    pub created_at: DateTime<Utc>,
    pub is_active: bool,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            full_name: user.full_name.clone(),
            role: user.role,
            phone: user.phone.clone(),
            company_name: user.company_name.clone(),
            business_type: user.business_type.clone(),
            created_at: user.created_at,
            is_active: user.is_active,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EventView {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub event_date: DateTime<Utc>,
    pub location: Option<String>,
    pub venue: Option<String>,
    pub expected_attendees: Option<i32>,
    pub vendor_fee: f64,
    pub status: EventStatus,
    pub created_by_admin_id: Uuid,
    pub admin_email: Option<String>,
    pub default_currency: String,
    pub currency_options: String,
    pub mpesa_number: Option<String>,
    pub paypal_account: Option<String>,
    pub zelle_account: Option<String>,
    pub card_instructions: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approved_vendors: Option<i64>,
}

impl EventView {
    pub fn from_event(event: &Event, admin_email: Option<String>) -> Self {
        Self {
            id: event.id,
            name: event.name.clone(),
            description: event.description.clone(),
            event_date: event.event_date,
            location: event.location.clone(),
            venue: event.venue.clone(),
            expected_attendees: event.expected_attendees,
            vendor_fee: event.vendor_fee,
            status: event.status,
            created_by_admin_id: event.created_by_admin_id,
            admin_email,
            default_currency: event.default_currency.clone(),
            currency_options: event.currency_options.clone(),
            mpesa_number: event.mpesa_number.clone(),
            paypal_account: event.paypal_account.clone(),
            zelle_account: event.zelle_account.clone(),
            card_instructions: event.card_instructions.clone(),
            created_at: event.created_at,
            application_count: None,
            approved_vendors: None,
        }
    }

    pub fn with_counts(mut self, application_count: i64, approved_vendors: i64) -> Self {
        self.application_count = Some(application_count);
        self.approved_vendors = Some(approved_vendors);
        self
    }
}

/// Application joined with its vendor and event (the event's fee and
/// payment-channel fields ride along so a vendor sees how to pay).
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationView {
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
    pub status: ApplicationStatus,
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

#[derive(Debug, Clone, Serialize)]
pub struct PaymentView {
    pub id: Uuid,
    pub application_id: Uuid,
    pub vendor_id: Uuid,
    pub vendor_name: String,
    pub amount: f64,
    pub payment_method: Option<String>,
    pub transaction_id: Option<String>,
    pub status: PaymentStatus,
    pub currency: String,
    pub pay_to: Option<String>,
    pub payment_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub notes: Option<String>,
}

// --- Dashboard / analytics ---

#[derive(Debug, Clone, Serialize)]
pub struct VendorStats {
    pub total: i64,
    pub active: i64,
    pub inactive: i64,
    pub new_this_week: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ApplicationStats {
    pub total: i64,
    pub pending: i64,
    pub approved: i64,
    pub rejected: i64,
    pub new_this_week: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct EventStats {
    pub total: i64,
    pub upcoming: i64,
    pub ongoing: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RevenueStats {
    pub total: f64,
    pub pending: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardStats {
    pub vendors: VendorStats,
    pub applications: ApplicationStats,
    pub events: EventStats,
    pub revenue: RevenueStats,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusCount {
    pub status: String,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthCount {
    pub month: String,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthRevenue {
    pub month: String,
    pub revenue: f64,
}
