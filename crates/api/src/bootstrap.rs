//! Startup tasks that seed required data.

use clubhub_core::roles::ROLE_ADMIN;
use clubhub_core::types::DbId;
use clubhub_db::models::user::CreateUser;
use clubhub_db::repositories::UserRepo;
use sqlx::PgPool;

use crate::auth::password::{hash_password, validate_password};
use crate::config::BootstrapAdmin;
use crate::error::{AppError, AppResult};

/// Make sure the configured admin account exists and holds the admin role.
///
/// An existing account with the same email is promoted rather than
/// recreated; its password is left alone.
pub async fn ensure_admin(pool: &PgPool, admin: &BootstrapAdmin) -> AppResult<DbId> {
    if let Some(user) = UserRepo::find_by_email(pool, &admin.email).await? {
        if user.role != ROLE_ADMIN {
            UserRepo::update_role(pool, user.id, ROLE_ADMIN).await?;
            tracing::info!(user_id = user.id, "Promoted bootstrap account to admin");
        }
        return Ok(user.id);
    }

    validate_password(&admin.password)?;
    let password_hash = hash_password(&admin.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        pool,
        &CreateUser {
            student_id: admin.student_id.clone(),
            name: admin.name.clone(),
            email: admin.email.clone(),
            password_hash,
            role: ROLE_ADMIN.to_string(),
        },
    )
    .await?;
    tracing::info!(user_id = user.id, "Created bootstrap admin account");
    Ok(user.id)
}
