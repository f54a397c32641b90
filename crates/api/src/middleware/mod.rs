//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the caller from a Bearer identity token.
//! - [`rbac::RequireAdmin`] -- Requires an email listed in `ADMIN_EMAILS`.

pub mod auth;
pub mod rbac;
