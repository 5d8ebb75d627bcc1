//! Route definitions for `/events`, including gallery and participant
//! sub-resources.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{event, participants};
use crate::state::AppState;

/// ```text
/// GET    /                      -> list
/// POST   /                      -> create
/// GET    /{id}                  -> get_by_id
/// PUT    /{id}                  -> update
/// DELETE /{id}                  -> delete
/// POST   /{id}/gallery          -> add_gallery
/// DELETE /{id}/gallery          -> remove_gallery
/// POST   /{id}/participants     -> participants::add
/// DELETE /{id}/participants     -> participants::remove
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(event::list).post(event::create))
        .route(
            "/{id}",
            get(event::get_by_id)
                .put(event::update)
                .delete(event::delete),
        )
        .route(
            "/{id}/gallery",
            post(event::add_gallery).delete(event::remove_gallery),
        )
        .route(
            "/{id}/participants",
            post(participants::add).delete(participants::remove),
        )
}
