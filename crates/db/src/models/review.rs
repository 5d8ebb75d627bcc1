//! Review entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use clubhub_core::types::{DbId, Timestamp};

/// A row from the `reviews` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Review {
    pub id: DbId,
    pub user_id: Option<DbId>,
    pub student_id: String,
    pub rating: i32,
    pub comment: String,
    pub likes: i32,
    pub dislikes: i32,
    pub approved: bool,
    pub created_at: Timestamp,
}

/// DTO for inserting a review. The author fields come from the caller's
/// session, not the request body.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateReview {
    pub user_id: DbId,
    pub student_id: String,
    pub rating: i32,
    pub comment: String,
}
