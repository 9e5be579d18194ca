//! Request extractors that run before handler bodies.
//!
//! - [`auth::AuthUser`] -- Extracts the session owner from a JWT Bearer token.
//! - [`request_context::RequestContext`] -- Carries the request correlation id.

pub mod auth;
pub mod request_context;
