//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated user from a JWT Bearer token.
//! - [`rbac::RequireSuperuser`] -- Requires the `superuser` role.
//! - [`rbac::SellerAccess`] -- Requires a verified seller profile (superusers pass).

pub mod auth;
pub mod rbac;
