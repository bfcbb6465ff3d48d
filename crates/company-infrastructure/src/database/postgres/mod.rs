//! PostgreSQL repository implementations

pub mod company_repo_impl;

pub use company_repo_impl::{PgCompanyRepository, PgCompanyTransaction};
