//! Request guards.
//!
//! - [`auth::require_auth`] -- rejects calls without a valid session and
//!   attaches the caller's [`auth::AuthUser`] to the request.

pub mod auth;
