//! Message bundles implementing the `MessageLookup` port

pub mod bundle;

pub use bundle::{format_message, BundleError, BundleMessageSource};
