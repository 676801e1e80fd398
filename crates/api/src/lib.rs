//! Phase dashboard API server library.
//!
//! Exposes the building blocks (config, state, error handling, chart specs,
//! routes) so integration tests and the binary entrypoint can both access
//! them.

pub mod charts;
pub mod config;
pub mod error;
pub mod handlers;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
