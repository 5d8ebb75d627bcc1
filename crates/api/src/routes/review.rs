//! Route definitions for `/reviews`.

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::review;
use crate::state::AppState;

/// ```text
/// GET    /                   -> list_approved
/// POST   /                   -> create
/// DELETE /{id}               -> delete
/// POST   /{id}/like          -> like
/// POST   /{id}/dislike       -> dislike
/// PUT    /{id}/approve       -> approve
/// PUT    /{id}/disapprove    -> disapprove
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(review::list_approved).post(review::create))
        .route("/{id}", delete(review::delete))
        .route("/{id}/like", post(review::like))
        .route("/{id}/dislike", post(review::dislike))
        .route("/{id}/approve", put(review::approve))
        .route("/{id}/disapprove", put(review::disapprove))
}
