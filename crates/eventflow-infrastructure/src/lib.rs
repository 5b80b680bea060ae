//! # EventFlow Infrastructure
//!
//! PostgreSQL implementations (adapters) of the core repository ports.

pub mod database;

pub use database::{
    create_pool, PgApplicationRepository, PgEventRepository, PgPaymentRepository,
    PgReportingRepository, PgUserRepository,
};
