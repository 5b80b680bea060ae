//! # EventFlow Core - Domain Module
//!
//! Domain entities for the event/vendor-management backend.

pub mod application;
pub mod currency;
pub mod event;
pub mod payment;
pub mod user;
pub mod views;

pub use application::{
    Application, ApplicationDraft, ApplicationStatus, ReviewDecision, ReviewOutcome,
};
pub use currency::{normalize_currency_options, CurrencyOptionsInput};
pub use event::{parse_event_date, Event, EventDraft, EventPatch, EventStatus};
pub use payment::{Payment, PaymentStatus, PaymentStatusChange};
pub use user::{ProfileUpdate, User, UserRole};
pub use views::{
    ApplicationStats, ApplicationView, DashboardStats, EventStats, EventView, MonthCount,
    MonthRevenue, PaymentView, RevenueStats, StatusCount, UserView, VendorStats,
};
