//! Route definitions for `/members`.

use axum::routing::get;
use axum::Router;

use crate::handlers::member;
use crate::state::AppState;

/// ```text
/// GET    /       -> list
/// POST   /       -> create
/// GET    /{id}   -> get_by_id
/// PUT    /{id}   -> update
/// DELETE /{id}   -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(member::list).post(member::create))
        .route(
            "/{id}",
            get(member::get_by_id)
                .put(member::update)
                .delete(member::delete),
        )
}
