//! Handlers for the `/auth` resource (register, login, logout, me).

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::StatusCode;
use axum::Json;
use clubhub_core::error::CoreError;
use clubhub_core::profile::{validate_code, validate_email, validate_name};
use clubhub_core::roles::DEFAULT_ROLE;
use clubhub_db::models::event::Event;
use clubhub_db::models::user::{CreateUser, UserResponse};
use clubhub_db::repositories::UserRepo;
use serde::{Deserialize, Serialize};

use crate::auth::jwt::generate_token;
use crate::auth::password::{hash_password, validate_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::{AuthUser, TOKEN_COOKIE};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(alias = "studentId")]
    pub student_id: String,
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Successful login response.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserResponse,
}

/// The current user together with the events they took part in.
#[derive(Debug, Serialize)]
pub struct MeResponse {
    #[serde(flatten)]
    pub user: UserResponse,
    pub participated_events: Vec<Event>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/register
///
/// Self-registration. New accounts always get the default role.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let student_id = input.student_id.trim();
    let email = input.email.trim();
    validate_code("Student ID", student_id)?;
    validate_name(&input.name)?;
    validate_email(email)?;
    validate_password(&input.password)?;

    if let Some(field) = UserRepo::find_conflict(&state.pool, email, student_id).await? {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "A user with this {field} already exists"
        ))));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            student_id: student_id.to_string(),
            name: input.name.trim().to_string(),
            email: email.to_string(),
            password_hash,
            role: DEFAULT_ROLE.to_string(),
        },
    )
    .await?;

    tracing::info!(user_id = user.id, "User registered");
    Ok((StatusCode::CREATED, Json(UserResponse::from(&user))))
}

/// POST /api/v1/auth/login
///
/// Authenticate with email + password. The token is returned in the body and
/// also set as an HTTP-only cookie for the browser frontend.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<([(axum::http::HeaderName, String); 1], Json<AuthResponse>)> {
    let invalid = || AppError::Core(CoreError::Unauthorized("Invalid email or password".into()));

    let user = UserRepo::find_by_email(&state.pool, input.email.trim())
        .await?
        .ok_or_else(invalid)?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        return Err(invalid());
    }

    let token = generate_token(user.id, &user.role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;
    let expires_in = state.config.jwt.expiry_secs();

    let cookie = format!(
        "{TOKEN_COOKIE}={token}; HttpOnly; Path=/; SameSite=Lax; Max-Age={expires_in}"
    );

    tracing::info!(user_id = user.id, "User logged in");
    Ok((
        [(SET_COOKIE, cookie)],
        Json(AuthResponse {
            token,
            expires_in,
            user: UserResponse::from(&user),
        }),
    ))
}

/// POST /api/v1/auth/logout
///
/// Clears the session cookie. Tokens are stateless, so a bearer token stays
/// valid until it expires.
pub async fn logout() -> ([(axum::http::HeaderName, String); 1], StatusCode) {
    (
        [(
            SET_COOKIE,
            format!("{TOKEN_COOKIE}=; HttpOnly; Path=/; SameSite=Lax; Max-Age=0"),
        )],
        StatusCode::NO_CONTENT,
    )
}

/// GET /api/v1/auth/me
pub async fn me(State(state): State<AppState>, auth: AuthUser) -> AppResult<Json<MeResponse>> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;
    let participated_events = UserRepo::participated_events(&state.pool, user.id).await?;

    Ok(Json(MeResponse {
        user: UserResponse::from(&user),
        participated_events,
    }))
}
