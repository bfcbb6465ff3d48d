//! Locale and message lookup port

pub mod locale;
pub mod messages;

pub use locale::Locale;
pub use messages::{MessageLookup, MessageService};
