//! Request extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated user from a JWT Bearer token.
//! - [`auth::ServiceCaller`] -- Same, but only for service-role tokens.

pub mod auth;
