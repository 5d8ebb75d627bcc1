use axum::routing::post;
use axum::Router;

use crate::handlers::upload;
use crate::state::AppState;

/// `POST /` -> upload
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(upload::upload))
}
