//! HTTP handlers

pub mod companies;
pub mod health;
pub mod messages;
