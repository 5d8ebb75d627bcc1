//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- the caller identified by their session token.
//! - [`rbac::RequireAdmin`] -- requires the `admin` role.
//! - [`rbac::RequireAuth`] -- requires any authenticated user.

pub mod auth;
pub mod rbac;
