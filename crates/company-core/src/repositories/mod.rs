//! Repository traits (ports)

pub mod company_repository;

pub use company_repository::{CompanyRepository, CompanyStore, CompanyTransaction};
