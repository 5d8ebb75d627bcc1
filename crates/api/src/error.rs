use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use clubhub_core::error::CoreError;
use serde_json::json;

use crate::storage::StorageError;

/// Error type returned by every handler.
///
/// Responses always have the body `{"error": <message>, "code": <CODE>}`.
/// Internal details (SQL, I/O) are logged and replaced with a generic message.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Writing an upload to the blob store failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// The multipart upload body could not be read.
    #[error("Malformed upload: {0}")]
    Multipart(#[from] MultipartError),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

pub type AppResult<T> = Result<T, AppError>;

const INTERNAL_MESSAGE: &str = "An internal error occurred";

type Classified = (StatusCode, &'static str, String);

fn internal() -> Classified {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        INTERNAL_MESSAGE.to_string(),
    )
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(core) => classify_core_error(core),
            AppError::Database(err) => classify_sqlx_error(err),
            AppError::Storage(err) => {
                tracing::error!(error = %err, "Upload storage failed");
                internal()
            }
            AppError::Multipart(err) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", err.body_text()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal()
            }
        };

        (status, axum::Json(json!({ "error": message, "code": code }))).into_response()
    }
}

/// `NotFound` and `NoMatch` are both not-found class; they differ only in
/// whether an id is known.
fn classify_core_error(err: &CoreError) -> Classified {
    match err {
        CoreError::NotFound { entity, id } => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{entity} with id {id} not found"),
        ),
        CoreError::NoMatch(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
        CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
        CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
        CoreError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone()),
        CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
        CoreError::Internal(msg) => {
            tracing::error!(error = %msg, "Internal core error");
            internal()
        }
    }
}

/// Map a sqlx error onto a response.
///
/// Uniqueness is checked before writes, so a unique violation here means a
/// concurrent insert won the race; it is still reported as a conflict naming
/// the field. A foreign-key violation means a referenced row vanished.
fn classify_sqlx_error(err: &sqlx::Error) -> Classified {
    let sqlx::Error::Database(db_err) = err else {
        if matches!(err, sqlx::Error::RowNotFound) {
            return (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                "Resource not found".to_string(),
            );
        }
        tracing::error!(error = %err, "Database error");
        return internal();
    };

    let constraint = db_err.constraint().unwrap_or_default();
    match db_err.code().as_deref() {
        Some("23505") if constraint.starts_with("uq_") => (
            StatusCode::CONFLICT,
            "CONFLICT",
            format!("A record with this {} already exists", conflicting_field(constraint)),
        ),
        Some("23503") => (
            StatusCode::BAD_REQUEST,
            "VALIDATION_ERROR",
            "Referenced record does not exist".to_string(),
        ),
        _ => {
            tracing::error!(error = %db_err, constraint, "Database error");
            internal()
        }
    }
}

/// Field named by a `uq_<table>_<field>` constraint, e.g. `uq_members_student_id`
/// gives `student id`.
fn conflicting_field(constraint: &str) -> String {
    const TABLES: &[&str] = &["users", "members", "faculty", "event_gallery"];
    let rest = constraint.trim_start_matches("uq_");
    let field = TABLES
        .iter()
        .find_map(|t| rest.strip_prefix(t).and_then(|r| r.strip_prefix('_')))
        .unwrap_or(rest);
    field.replace('_', " ")
}
