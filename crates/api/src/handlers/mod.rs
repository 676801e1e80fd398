//! HTTP handlers.

pub mod dashboard;
pub mod events;
