//! # Company Core
//! 
//! Company entity, lifecycle service, repository traits, and message lookup port.

pub mod domain;
pub mod services;
pub mod repositories;
pub mod i18n;
pub mod error;

// Re-export domain entities
pub use domain::*;
pub use error::DomainError;
pub use i18n::{Locale, MessageLookup, MessageService};
