//! Session credential validation.
//!
//! - [`jwt`] -- HS256 session token validation (and minting, for the auth
//!   provider's shared secret and for tests).

pub mod jwt;
