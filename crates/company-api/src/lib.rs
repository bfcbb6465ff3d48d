//! # Company API
//! 
//! HTTP handlers, DTOs, locale resolution, and error mapping.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod locale;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::router;
pub use state::AppState;
