//! # EventFlow Core
//!
//! Domain entities, services, and repository traits for the EventFlow
//! backend: events, vendor applications, payments, and the ownership
//! model that scopes each of them to the admin who created the event.

pub mod domain;
pub mod error;
pub mod repositories;
pub mod services;

pub use domain::*;
pub use error::DomainError;
