//! Shared types for the Open Vault backend.
//!
//! The `objects` module holds every request/response body exchanged with
//! the server, so the server, tests, and downstream consumers agree on a
//! single JSON contract.
//!
//! Enable the `client` feature to get typed HTTP clients built on reqwest.

pub mod objects;

#[cfg(feature = "client")]
pub mod client;

/// Header carrying the plaintext admin secret for admin-only endpoints.
///
/// The server verifies it against an argon2-hashed value from its config.
pub const ADMIN_AUTH_HEADER: &str = "Ovault-Admin-Authorization";
