//! Well-known role name constants.
//!
//! These must match the `ck_users_role` check constraint in the users migration.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_STUDENT: &str = "student";
pub const ROLE_MEMBER: &str = "member";

/// All assignable roles.
pub const VALID_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_STUDENT, ROLE_MEMBER];

/// Role given to self-registered accounts.
pub const DEFAULT_ROLE: &str = ROLE_STUDENT;

pub fn is_valid_role(role: &str) -> bool {
    VALID_ROLES.contains(&role)
}
