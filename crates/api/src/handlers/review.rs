//! Handlers for the `/reviews` resource and its admin moderation routes.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use clubhub_core::error::CoreError;
use clubhub_core::review::{validate_comment, validate_rating};
use clubhub_core::types::DbId;
use clubhub_db::models::review::{CreateReview, Review};
use clubhub_db::repositories::{Reaction, ReviewRepo, UserRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::state::AppState;

/// Request body for `POST /reviews`.
#[derive(Debug, Deserialize)]
pub struct CreateReviewRequest {
    pub rating: i32,
    pub comment: String,
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Review",
        id,
    })
}

/// GET /api/v1/reviews
///
/// Approved reviews only.
pub async fn list_approved(State(state): State<AppState>) -> AppResult<Json<Vec<Review>>> {
    Ok(Json(ReviewRepo::list(&state.pool, true).await?))
}

/// GET /api/v1/admin/reviews
pub async fn list_all(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<Vec<Review>>> {
    Ok(Json(ReviewRepo::list(&state.pool, false).await?))
}

/// POST /api/v1/reviews
///
/// New reviews wait for approval before they are listed publicly.
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(auth): RequireAuth,
    Json(input): Json<CreateReviewRequest>,
) -> AppResult<(StatusCode, Json<Review>)> {
    validate_rating(input.rating)?;
    validate_comment(&input.comment)?;

    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;

    let review = ReviewRepo::create(
        &state.pool,
        &CreateReview {
            user_id: user.id,
            student_id: user.student_id,
            rating: input.rating,
            comment: input.comment.trim().to_string(),
        },
    )
    .await?;

    tracing::info!(review_id = review.id, user_id = auth.user_id, "Review submitted");
    Ok((StatusCode::CREATED, Json(review)))
}

async fn react(state: &AppState, id: DbId, reaction: Reaction) -> AppResult<Json<Review>> {
    let review = ReviewRepo::react(&state.pool, id, reaction)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(review))
}

/// POST /api/v1/reviews/{id}/like
pub async fn like(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<Json<Review>> {
    react(&state, id, Reaction::Like).await
}

/// POST /api/v1/reviews/{id}/dislike
pub async fn dislike(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Review>> {
    react(&state, id, Reaction::Dislike).await
}

async fn set_approved(state: &AppState, id: DbId, approved: bool) -> AppResult<Json<Review>> {
    let review = ReviewRepo::set_approved(&state.pool, id, approved)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(review_id = id, approved, "Review moderated");
    Ok(Json(review))
}

/// PUT /api/v1/reviews/{id}/approve
pub async fn approve(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<Review>> {
    set_approved(&state, id, true).await
}

/// PUT /api/v1/reviews/{id}/disapprove
pub async fn disapprove(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<Review>> {
    set_approved(&state, id, false).await
}

/// DELETE /api/v1/reviews/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if ReviewRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
