//! Request extractors: bearer auth and JSON body handling

pub mod auth;
pub mod json;

pub use auth::{AuthUser, RequireAdmin, RequireVendor};
pub use json::ApiJson;
