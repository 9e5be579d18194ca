//! Session token issuing and validation.
//!
//! - [`jwt`] -- HS256 access tokens bound to a user's email.

pub mod jwt;
