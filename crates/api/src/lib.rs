//! cinerate API server library.
//!
//! Exposes config, state, error handling, extractors, handlers, and the
//! router builder so integration tests and the binary entrypoint share
//! the exact same application.

pub mod auth;
pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod routes;
pub mod state;
