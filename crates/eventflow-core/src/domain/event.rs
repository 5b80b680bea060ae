// ============================================================================
// EventFlow Core - Event Entity
// File: crates/eventflow-core/src/domain/event.rs
// Description: Admin-owned event with currency/payment-channel configuration
// ============================================================================

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use eventflow_shared::types::new_id;

use crate::domain::currency::{normalize_currency_options, CurrencyOptionsInput};
use crate::error::DomainError;

/// Event lifecycle status. Values are validated against this set, but
/// transitions between members are unrestricted (an event can move from
/// completed back to upcoming).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    Upcoming,
    Ongoing,
    Completed,
    Cancelled,
}

impl EventStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Upcoming => "upcoming",
            EventStatus::Ongoing => "ongoing",
            EventStatus::Completed => "completed",
            EventStatus::Cancelled => "cancelled",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "upcoming" => Some(EventStatus::Upcoming),
            "ongoing" => Some(EventStatus::Ongoing),
            "completed" => Some(EventStatus::Completed),
            "cancelled" => Some(EventStatus::Cancelled),
            _ => None,
        }
    }
}

impl Default for EventStatus {
    fn default() -> Self {
        EventStatus::Upcoming
    }
}

/// Parse an ISO-8601 event date. Accepts RFC 3339 (`2026-04-15T10:00:00Z`),
/// a naive datetime (`2026-04-15T10:00:00`, taken as UTC), or a bare date.
pub fn parse_event_date(raw: &str) -> Result<DateTime<Utc>, DomainError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = raw.parse::<NaiveDateTime>() {
        return Ok(naive.and_utc());
    }
    if let Ok(date) = raw.parse::<NaiveDate>() {
        if let Some(naive) = date.and_hms_opt(0, 0, 0) {
            return Ok(naive.and_utc());
        }
    }
    Err(DomainError::InvalidEventDate)
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Event {
    pub id: Uuid,

    #[validate(length(min = 1, max = 200, message = "Event name must be between 1 and 200 characters"))]
    pub name: String,
    pub description: Option<String>,
    pub event_date: DateTime<Utc>,
    pub location: Option<String>,
    pub venue: Option<String>,
    pub expected_attendees: Option<i32>,

    pub vendor_fee: f64,
    pub status: EventStatus,

    /// Owning admin; required and immutable. Every authorization check on
    /// applications and payments resolves through this field.
    pub created_by_admin_id: Uuid,

    pub default_currency: String,
    /// Comma-separated, normalized (see [`normalize_currency_options`]).
    /// Invariant: non-empty and contains `default_currency`.
    pub currency_options: String,

    pub mpesa_number: Option<String>,
    pub paypal_account: Option<String>,
    pub zelle_account: Option<String>,
    pub card_instructions: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields for event creation. `name` and `event_date` are required; the
/// rest default (fee 0, status upcoming, currency USD).
#[derive(Debug, Clone, Default)]
pub struct EventDraft {
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

/// Partial update: only provided fields are applied. Nullable fields use a
/// double `Option` so "sent as null" (clear) is distinct from "absent"
/// (keep). Invariants are re-validated after the merge.
#[derive(Debug, Clone, Default)]
pub struct EventPatch {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub event_date: Option<String>,
    pub location: Option<Option<String>>,
    pub venue: Option<Option<String>>,
    pub expected_attendees: Option<Option<i32>>,
    pub vendor_fee: Option<f64>,
    pub status: Option<String>,
    pub default_currency: Option<String>,
    pub currency_options: Option<CurrencyOptionsInput>,
    pub mpesa_number: Option<Option<String>>,
    pub paypal_account: Option<Option<String>>,
    pub zelle_account: Option<Option<String>>,
    pub card_instructions: Option<Option<String>>,
}

impl Event {
    pub fn create(admin_id: Uuid, draft: EventDraft) -> Result<Self, DomainError> {
        let name = draft.name.ok_or(DomainError::MissingField("name"))?;
        let event_date_raw = draft
            .event_date
            .ok_or(DomainError::MissingField("event_date"))?;
        let event_date = parse_event_date(&event_date_raw)?;

        let status = match draft.status.as_deref() {
            None => EventStatus::Upcoming,
            Some(s) => EventStatus::from_str(s).ok_or(DomainError::InvalidEventStatus)?,
        };

        let default_currency = draft
            .default_currency
            .as_deref()
            .unwrap_or("USD")
            .to_uppercase();
        let currency_options =
            normalize_currency_options(draft.currency_options.as_ref(), &default_currency);

        let now = Utc::now();
        let event = Self {
            id: new_id(),
            name: name.trim().to_string(),
            description: draft.description,
            event_date,
            location: draft.location,
            venue: draft.venue,
            expected_attendees: draft.expected_attendees,
            vendor_fee: draft.vendor_fee.unwrap_or(0.0),
            status,
            created_by_admin_id: admin_id,
            default_currency,
            currency_options,
            mpesa_number: draft.mpesa_number,
            paypal_account: draft.paypal_account,
            zelle_account: draft.zelle_account,
            card_instructions: draft.card_instructions,
            created_at: now,
            updated_at: now,
        };

        event
            .validate()
            .map_err(|e| DomainError::Validation(e.to_string()))?;
        event.validate_currency_invariant()?;
        Ok(event)
    }

    /// Merge a partial update and re-validate the currency invariant. The
    /// existing `default_currency` is reused when the patch does not carry
    /// one.
    pub fn apply(&mut self, patch: EventPatch) -> Result<(), DomainError> {
        if let Some(name) = patch.name {
            self.name = name.trim().to_string();
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(raw) = patch.event_date.as_deref() {
            self.event_date = parse_event_date(raw)?;
        }
        if let Some(location) = patch.location {
            self.location = location;
        }
        if let Some(venue) = patch.venue {
            self.venue = venue;
        }
        if let Some(expected_attendees) = patch.expected_attendees {
            self.expected_attendees = expected_attendees;
        }
        if let Some(vendor_fee) = patch.vendor_fee {
            self.vendor_fee = vendor_fee;
        }
        if let Some(status) = patch.status.as_deref() {
            self.status = EventStatus::from_str(status).ok_or(DomainError::InvalidEventStatus)?;
        }
        if let Some(default_currency) = patch.default_currency.as_deref() {
            self.default_currency = default_currency.to_uppercase();
        }
        if let Some(raw_options) = patch.currency_options.as_ref() {
            self.currency_options =
                normalize_currency_options(Some(raw_options), &self.default_currency);
        }
        if let Some(mpesa_number) = patch.mpesa_number {
            self.mpesa_number = mpesa_number;
        }
        if let Some(paypal_account) = patch.paypal_account {
            self.paypal_account = paypal_account;
        }
        if let Some(zelle_account) = patch.zelle_account {
            self.zelle_account = zelle_account;
        }
        if let Some(card_instructions) = patch.card_instructions {
            self.card_instructions = card_instructions;
        }

        self.updated_at = Utc::now();

        self.validate()
            .map_err(|e| DomainError::Validation(e.to_string()))?;
        self.validate_currency_invariant()
    }

    pub fn allowed_currencies(&self) -> Vec<String> {
        self.currency_options
            .split(',')
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .collect()
    }

    fn validate_currency_invariant(&self) -> Result<(), DomainError> {
        let allowed = self.allowed_currencies();
        if allowed.is_empty() {
            return Err(DomainError::EmptyCurrencyOptions);
        }
        if !allowed.contains(&self.default_currency.to_uppercase()) {
            return Err(DomainError::DefaultCurrencyNotInOptions);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str, date: &str) -> EventDraft {
        EventDraft {
            name: Some(name.into()),
            event_date: Some(date.into()),
            ..Default::default()
        }
    }

    #[test]
    fn create_applies_defaults() {
        let event = Event::create(Uuid::new_v4(), draft("Tech Expo 2026", "2026-05-20T09:00:00")).unwrap();

        assert_eq!(event.vendor_fee, 0.0);
        assert_eq!(event.status, EventStatus::Upcoming);
        assert_eq!(event.default_currency, "USD");
        assert_eq!(event.currency_options, "USD");
    }

    #[test]
    fn create_rejects_missing_fields() {
        let err = Event::create(Uuid::new_v4(), EventDraft::default()).unwrap_err();
        assert!(matches!(err, DomainError::MissingField("name")));
    }

    #[test]
    fn create_rejects_bad_date() {
        let err = Event::create(Uuid::new_v4(), draft("Fair", "next tuesday")).unwrap_err();
        assert!(matches!(err, DomainError::InvalidEventDate));
    }

    #[test]
    fn parses_rfc3339_naive_and_date_only() {
        assert!(parse_event_date("2026-04-15T10:00:00Z").is_ok());
        assert!(parse_event_date("2026-04-15T10:00:00+03:00").is_ok());
        assert!(parse_event_date("2026-04-15T10:00:00").is_ok());
        assert!(parse_event_date("2026-04-15").is_ok());
    }

    #[test]
    fn normalizes_currency_options_on_create() {
        let mut d = draft("Spring Food Festival", "2026-04-15T10:00:00");
        d.default_currency = Some("eur".into());
        d.currency_options = Some(CurrencyOptionsInput::List(vec![
            "Euros".into(),
            " usd ".into(),
        ]));

        let event = Event::create(Uuid::new_v4(), d).unwrap();
        assert_eq!(event.currency_options, "EUR,USD");
        assert_eq!(event.default_currency, "EUR");
    }

    #[test]
    fn create_rejects_default_outside_options() {
        let mut d = draft("Craft Fair", "2026-06-10T11:00:00");
        d.default_currency = Some("KES".into());
        d.currency_options = Some(CurrencyOptionsInput::Csv("USD,EUR".into()));

        let err = Event::create(Uuid::new_v4(), d).unwrap_err();
        assert!(matches!(err, DomainError::DefaultCurrencyNotInOptions));
    }

    #[test]
    fn patch_revalidates_currency_invariant() {
        let mut d = draft("Craft Fair", "2026-06-10T11:00:00");
        d.currency_options = Some(CurrencyOptionsInput::Csv("USD,KES".into()));
        let mut event = Event::create(Uuid::new_v4(), d).unwrap();

        // Dropping USD from the options while the default is still USD
        // must fail and leave the caller to fix the request.
        let err = event
            .apply(EventPatch {
                currency_options: Some(CurrencyOptionsInput::Csv("KES".into())),
                ..Default::default()
            })
            .unwrap_err();
        assert!(matches!(err, DomainError::DefaultCurrencyNotInOptions));

        event
            .apply(EventPatch {
                default_currency: Some("kes".into()),
                currency_options: Some(CurrencyOptionsInput::Csv("KES".into())),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(event.default_currency, "KES");
        assert_eq!(event.currency_options, "KES");
    }

    #[test]
    fn patch_applies_only_provided_fields() {
        let mut event =
            Event::create(Uuid::new_v4(), draft("Tech Expo", "2026-05-20T09:00:00")).unwrap();
        event
            .apply(EventPatch {
                vendor_fee: Some(1000.0),
                venue: Some(Some("Hall A".into())),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(event.name, "Tech Expo");
        assert_eq!(event.vendor_fee, 1000.0);
        assert_eq!(event.venue.as_deref(), Some("Hall A"));
    }

    #[test]
    fn status_transitions_are_unrestricted_within_known_set() {
        let mut event =
            Event::create(Uuid::new_v4(), draft("Festival", "2025-12-15T18:00:00")).unwrap();
        event
            .apply(EventPatch {
                status: Some("completed".into()),
                ..Default::default()
            })
            .unwrap();
        event
            .apply(EventPatch {
                status: Some("upcoming".into()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(event.status, EventStatus::Upcoming);

        let err = event
            .apply(EventPatch {
                status: Some("archived".into()),
                ..Default::default()
            })
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidEventStatus));
    }
}
