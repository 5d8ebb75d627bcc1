//! Handlers for the `/admin` resource (user management).
//!
//! All handlers require the `admin` role via [`RequireAdmin`].

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use clubhub_core::error::CoreError;
use clubhub_core::roles::{is_valid_role, ROLE_ADMIN, VALID_ROLES};
use clubhub_core::types::DbId;
use clubhub_db::models::user::UserResponse;
use clubhub_db::repositories::UserRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// Request body for `PUT /admin/users/{id}/role`.
#[derive(Debug, Deserialize)]
pub struct UpdateRoleRequest {
    pub role: String,
}

/// GET /api/v1/admin/users
pub async fn list_users(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<Vec<UserResponse>>> {
    let users = UserRepo::list(&state.pool).await?;
    Ok(Json(users.iter().map(UserResponse::from).collect()))
}

/// PUT /api/v1/admin/users/{id}/role
pub async fn update_role(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateRoleRequest>,
) -> AppResult<Json<UserResponse>> {
    if !is_valid_role(&input.role) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Invalid role '{}'. Must be one of: {}",
            input.role,
            VALID_ROLES.join(", ")
        ))));
    }
    if id == admin.user_id && input.role != ROLE_ADMIN {
        return Err(AppError::Core(CoreError::Validation(
            "Admins cannot remove their own admin role".into(),
        )));
    }

    let user = UserRepo::update_role(&state.pool, id, &input.role)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;

    tracing::info!(user_id = id, role = %user.role, changed_by = admin.user_id, "User role changed");
    Ok(Json(UserResponse::from(&user)))
}

/// DELETE /api/v1/admin/users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if id == admin.user_id {
        return Err(AppError::Core(CoreError::Validation(
            "Admins cannot delete their own account".into(),
        )));
    }
    if UserRepo::delete(&state.pool, id).await? {
        tracing::info!(user_id = id, deleted_by = admin.user_id, "User deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "User", id }))
    }
}
