//! # EventFlow Shared
//!
//! Shared utilities, types, configuration, and telemetry for EventFlow.

pub mod config;
pub mod constants;
pub mod error;
pub mod telemetry;
pub mod types;
pub mod utils;

pub use error::AppError;
pub use types::*;
