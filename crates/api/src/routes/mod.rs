pub mod admin;
pub mod auth;
pub mod event;
pub mod faculty;
pub mod health;
pub mod member;
pub mod review;
pub mod task;
pub mod upload;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                         register (public)
/// /auth/login                            login (public)
/// /auth/logout                           clear session cookie
/// /auth/me                               current user (auth)
///
/// /admin/users                           list (admin)
/// /admin/users/{id}                      delete (admin)
/// /admin/users/{id}/role                 change role (admin)
/// /admin/reviews                         all reviews incl. unapproved (admin)
///
/// /members, /faculty                     list, create; get, update, delete by id
///
/// /events                                list, create
/// /events/{id}                           get (with gallery + participants), update, delete
/// /events/{id}/gallery                   add urls, remove url (admin)
/// /events/{id}/participants              add, remove (admin)
///
/// /tasks/{event_id}                      list, create
/// /tasks/{event_id}/{task_id}            get, update, delete
///
/// /reviews                               list approved, create (auth)
/// /reviews/{id}                          delete (admin)
/// /reviews/{id}/like, /dislike           react
/// /reviews/{id}/approve, /disapprove     moderate (admin)
///
/// /uploads                               store an image, returns its URL (admin)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/admin", admin::router())
        .nest("/members", member::router())
        .nest("/faculty", faculty::router())
        .nest("/events", event::router())
        .nest("/tasks", task::router())
        .nest("/reviews", review::router())
        .nest("/uploads", upload::router())
}
