//! Role guards layered on [`AuthUser`].
//!
//! Club content (events, roster, participants, moderation) is edited by
//! admins only; students may log in, review and see their history.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use clubhub_core::error::CoreError;
use clubhub_core::roles::ROLE_ADMIN;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// The caller, who must hold the `admin` role (403 otherwise).
pub struct RequireAdmin(pub AuthUser);

/// The caller, who only needs a valid session (401 otherwise).
pub struct RequireAuth(pub AuthUser);

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }
}

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !user.is_admin() {
            tracing::debug!(user_id = user.user_id, role = %user.role, "Admin route refused");
            return Err(CoreError::Forbidden("Only club admins can do this".into()).into());
        }
        Ok(Self(user))
    }
}

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        AuthUser::from_request_parts(parts, state).await.map(Self)
    }
}
