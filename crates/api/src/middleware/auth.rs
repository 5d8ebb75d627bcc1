//! Session-token extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::header::{AUTHORIZATION, COOKIE};
use axum::http::request::Parts;
use clubhub_core::error::CoreError;
use clubhub_core::types::DbId;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Name of the cookie the web frontend stores the session token in.
pub const TOKEN_COOKIE: &str = "token";

/// The authenticated caller.
///
/// The token is read from `Authorization: Bearer <token>` first and from the
/// `token` cookie otherwise.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's internal database id (from `claims.sub`).
    pub user_id: DbId,
    /// The user's role name.
    pub role: String,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = match parts.headers.get(AUTHORIZATION) {
            Some(value) => {
                let header = value.to_str().unwrap_or_default();
                header
                    .strip_prefix("Bearer ")
                    .ok_or_else(|| {
                        AppError::Core(CoreError::Unauthorized(
                            "Invalid Authorization format. Expected: Bearer <token>".into(),
                        ))
                    })?
                    .to_string()
            }
            None => token_from_cookies(parts).ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized("Not authenticated".into()))
            })?,
        };

        let claims = validate_token(&token, &state.config.jwt).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        Ok(AuthUser {
            user_id: claims.sub,
            role: claims.role,
        })
    }
}

fn token_from_cookies(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|header| header.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == TOKEN_COOKIE && !value.is_empty())
        .map(|(_, value)| value.to_string())
}
