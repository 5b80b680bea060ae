//! Request and response payloads
//!
//! Partial-update requests distinguish "field absent" (keep) from "field
//! sent as null" (clear) with a double `Option`: the outer layer defaults
//! to `None` when the key is missing, and `deserialize_present` wraps
//! whatever was actually sent, null included.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use eventflow_core::domain::{
    ApplicationDraft, ApplicationView, CurrencyOptionsInput, EventDraft, EventPatch, EventView,
    PaymentView, UserView,
};
use eventflow_core::services::{PaymentStatusRequest, ProfileChange, RegisterDraft};

fn deserialize_present<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

// --- Auth ---

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub full_name: Option<String>,
    pub role: Option<String>,
    pub phone: Option<String>,
    pub company_name: Option<String>,
    pub business_type: Option<String>,
}

impl From<RegisterRequest> for RegisterDraft {
    fn from(req: RegisterRequest) -> Self {
        RegisterDraft {
            email: req.email,
            password: req.password,
            full_name: req.full_name,
            role: req.role,
            phone: req.phone,
            company_name: req.company_name,
            business_type: req.business_type,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    /// Optional role hint; must match the stored role when present.
    pub role: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateProfileRequest {
    pub full_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub phone: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub company_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub business_type: Option<Option<String>>,
    pub password: Option<String>,
}

impl From<UpdateProfileRequest> for ProfileChange {
    fn from(req: UpdateProfileRequest) -> Self {
        ProfileChange {
            full_name: req.full_name,
            phone: req.phone,
            company_name: req.company_name,
            business_type: req.business_type,
            password: req.password,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub message: String,
    pub user: UserView,
    pub access_token: String,
}

// --- Events ---

#[derive(Debug, Default, Deserialize)]
pub struct CreateEventRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub event_date: Option<String>,
    pub location: Option<String>,
    pub venue: Option<String>,
    pub expected_attendees: Option<i32>,
    pub vendor_fee: Option<f64>,
    pub status: Option<String>,
    pub default_currency: Option<String>,
    pub currency_options: Option<CurrencyOptionsInput>,
    pub mpesa_number: Option<String>,
    pub paypal_account: Option<String>,
    pub zelle_account: Option<String>,
    pub card_instructions: Option<String>,
}

impl From<CreateEventRequest> for EventDraft {
    fn from(req: CreateEventRequest) -> Self {
        EventDraft {
            name: req.name,
            description: req.description,
            event_date: req.event_date,
            location: req.location,
            venue: req.venue,
            expected_attendees: req.expected_attendees,
            vendor_fee: req.vendor_fee,
            status: req.status,
            default_currency: req.default_currency,
            currency_options: req.currency_options,
            mpesa_number: req.mpesa_number,
            paypal_account: req.paypal_account,
            zelle_account: req.zelle_account,
            card_instructions: req.card_instructions,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateEventRequest {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub description: Option<Option<String>>,
    pub event_date: Option<String>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub location: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub venue: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub expected_attendees: Option<Option<i32>>,
    pub vendor_fee: Option<f64>,
    pub status: Option<String>,
    pub default_currency: Option<String>,
    pub currency_options: Option<CurrencyOptionsInput>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub mpesa_number: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub paypal_account: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub zelle_account: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub card_instructions: Option<Option<String>>,
}

impl From<UpdateEventRequest> for EventPatch {
    fn from(req: UpdateEventRequest) -> Self {
        EventPatch {
            name: req.name,
            description: req.description,
            event_date: req.event_date,
            location: req.location,
            venue: req.venue,
            expected_attendees: req.expected_attendees,
            vendor_fee: req.vendor_fee,
            status: req.status,
            default_currency: req.default_currency,
            currency_options: req.currency_options,
            mpesa_number: req.mpesa_number,
            paypal_account: req.paypal_account,
            zelle_account: req.zelle_account,
            card_instructions: req.card_instructions,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EventResponse {
    pub message: String,
    pub event: EventView,
}

// --- Applications ---

#[derive(Debug, Deserialize)]
pub struct ReviewRequest {
    pub status: Option<String>,
    pub admin_notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ApplicationListQuery {
    pub status: Option<String>,
    pub event_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct ApplyRequest {
    pub event_id: Option<Uuid>,
    pub product_service: Option<String>,
    pub booth_requirements: Option<String>,
    pub additional_notes: Option<String>,
}

impl ApplyRequest {
    pub fn into_parts(self) -> (Option<Uuid>, ApplicationDraft) {
        (
            self.event_id,
            ApplicationDraft {
                product_service: self.product_service,
                booth_requirements: self.booth_requirements,
                additional_notes: self.additional_notes,
            },
        )
    }
}

#[derive(Debug, Serialize)]
pub struct ApplicationResponse {
    pub message: String,
    pub application: ApplicationView,
}

// --- Payments ---

#[derive(Debug, Default, Deserialize)]
pub struct UpdatePaymentStatusRequest {
    pub status: Option<String>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub payment_method: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub transaction_id: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub notes: Option<Option<String>>,
}

impl From<UpdatePaymentStatusRequest> for PaymentStatusRequest {
    fn from(req: UpdatePaymentStatusRequest) -> Self {
        PaymentStatusRequest {
            status: req.status,
            payment_method: req.payment_method,
            transaction_id: req.transaction_id,
            notes: req.notes,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PaymentResponse {
    pub message: String,
    pub payment: PaymentView,
}

// --- Misc ---

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub message: String,
    pub user: UserView,
}

#[derive(Debug, Serialize)]
pub struct VendorResponse {
    pub message: String,
    pub vendor: UserView,
}

#[derive(Debug, Serialize)]
pub struct VendorDetailResponse {
    pub vendor: UserView,
    pub applications: Vec<ApplicationView>,
    pub payments: Vec<PaymentView>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_event_distinguishes_absent_from_null() {
        let req: UpdateEventRequest =
            serde_json::from_str(r#"{"venue": null, "vendor_fee": 250.0}"#).unwrap();

        assert_eq!(req.venue, Some(None));
        assert_eq!(req.description, None);
        assert_eq!(req.vendor_fee, Some(250.0));
    }

    #[test]
    fn currency_options_accept_string_or_list() {
        let from_csv: CreateEventRequest =
            serde_json::from_str(r#"{"currency_options": "USD,KES"}"#).unwrap();
        assert!(matches!(
            from_csv.currency_options,
            Some(CurrencyOptionsInput::Csv(_))
        ));

        let from_list: CreateEventRequest =
            serde_json::from_str(r#"{"currency_options": ["Euros", " usd "]}"#).unwrap();
        assert!(matches!(
            from_list.currency_options,
            Some(CurrencyOptionsInput::List(_))
        ));
    }

    #[test]
    fn payment_update_merges_null_as_clear() {
        let req: UpdatePaymentStatusRequest = serde_json::from_str(
            r#"{"status": "completed", "transaction_id": null, "payment_method": "cash"}"#,
        )
        .unwrap();

        assert_eq!(req.status.as_deref(), Some("completed"));
        assert_eq!(req.transaction_id, Some(None));
        assert_eq!(req.payment_method, Some(Some("cash".into())));
        assert_eq!(req.notes, None);
    }
}
