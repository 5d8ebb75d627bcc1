//! `AppError` to HTTP response mapping, exercised without a server.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use clubhub_api::error::AppError;
use clubhub_core::error::CoreError;
use http_body_util::BodyExt;

async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn not_found_names_entity_and_id() {
    let (status, json) = error_to_response(AppError::Core(CoreError::NotFound {
        entity: "Task",
        id: 9,
    }))
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Task with id 9 not found");
}

#[tokio::test]
async fn no_match_is_not_found_class() {
    let (status, json) =
        error_to_response(AppError::Core(CoreError::NoMatch("No valid users found".into()))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "No valid users found");
}

#[tokio::test]
async fn validation_is_400() {
    let (status, json) =
        error_to_response(AppError::Core(CoreError::Validation("bad deadline".into()))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "bad deadline");
}

#[tokio::test]
async fn conflict_unauthorized_forbidden() {
    let (status, json) =
        error_to_response(AppError::Core(CoreError::Conflict("dup".into()))).await;
    assert_eq!((status, json["code"].as_str()), (StatusCode::CONFLICT, Some("CONFLICT")));

    let (status, _) =
        error_to_response(AppError::Core(CoreError::Unauthorized("no".into()))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = error_to_response(AppError::Core(CoreError::Forbidden("no".into()))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn internal_details_are_not_leaked() {
    let (status, json) =
        error_to_response(AppError::InternalError("connection string leaked".into())).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "An internal error occurred");

    let (status, json) =
        error_to_response(AppError::Core(CoreError::Internal("secret".into()))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
}

#[tokio::test]
async fn row_not_found_is_404() {
    let (status, _) = error_to_response(AppError::Database(sqlx::Error::RowNotFound)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
