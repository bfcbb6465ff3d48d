//! # Company Infrastructure
//! 
//! Storage adapters (PostgreSQL and in-memory) and message bundles.

pub mod database;
pub mod i18n;

pub use database::{create_pool, run_migrations, InMemoryCompanyRepository, PgCompanyRepository};
pub use i18n::BundleMessageSource;
