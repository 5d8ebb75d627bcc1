//! Route definitions for `/tasks`, scoped by event.

use axum::routing::get;
use axum::Router;

use crate::handlers::task;
use crate::state::AppState;

/// ```text
/// GET    /{event_id}             -> list_by_event
/// POST   /{event_id}             -> create
/// GET    /{event_id}/{task_id}   -> get_by_id
/// PUT    /{event_id}/{task_id}   -> update
/// DELETE /{event_id}/{task_id}   -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{event_id}", get(task::list_by_event).post(task::create))
        .route(
            "/{event_id}/{task_id}",
            get(task::get_by_id).put(task::update).delete(task::delete),
        )
}
