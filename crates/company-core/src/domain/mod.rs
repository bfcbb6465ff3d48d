//! # Company Core - Domain Module
//! 
//! The company entity and its create/update inputs.

pub mod company;
pub mod field_update;

pub use company::{Company, CompanyChanges, NewCompany};
pub use field_update::FieldUpdate;
