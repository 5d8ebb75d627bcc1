//! Route definitions for `/admin`.

use axum::routing::{delete, get, put};
use axum::Router;

use crate::handlers::{admin, review};
use crate::state::AppState;

/// ```text
/// GET    /users             -> list_users
/// DELETE /users/{id}        -> delete_user
/// PUT    /users/{id}/role   -> update_role
/// GET    /reviews           -> review::list_all
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(admin::list_users))
        .route("/users/{id}", delete(admin::delete_user))
        .route("/users/{id}/role", put(admin::update_role))
        .route("/reviews", get(review::list_all))
}
