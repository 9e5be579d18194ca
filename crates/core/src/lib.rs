//! Domain core for the cinerate backend.
//!
//! Holds the error taxonomy, the store-adapter traits that handlers depend
//! on, the rating policy, and credential hashing. This crate has no
//! internal dependencies so both the persistence and HTTP crates can use it.

pub mod error;
pub mod movie;
pub mod password;
pub mod ports;
pub mod resolver;
pub mod types;
pub mod user;
