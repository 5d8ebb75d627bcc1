//! Repository for the `reviews` table.

use sqlx::PgPool;
use clubhub_core::types::DbId;

use crate::models::review::{CreateReview, Review};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, user_id, student_id, rating, comment, likes, dislikes, approved, created_at";

/// Which reaction counter to bump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reaction {
    Like,
    Dislike,
}

/// Provides CRUD and moderation operations for reviews.
pub struct ReviewRepo;

impl ReviewRepo {
    /// Insert a new (unapproved) review, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateReview) -> Result<Review, sqlx::Error> {
        let query = format!(
            "INSERT INTO reviews (user_id, student_id, rating, comment)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(input.user_id)
            .bind(&input.student_id)
            .bind(input.rating)
            .bind(&input.comment)
            .fetch_one(pool)
            .await
    }

    /// List reviews, newest first. With `approved_only` unapproved ones are hidden.
    pub async fn list(pool: &PgPool, approved_only: bool) -> Result<Vec<Review>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM reviews \
             WHERE ($1 = false OR approved = true) \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(approved_only)
            .fetch_all(pool)
            .await
    }

    /// Atomically increment a reaction counter. Returns `None` if the review
    /// does not exist.
    pub async fn react(
        pool: &PgPool,
        id: DbId,
        reaction: Reaction,
    ) -> Result<Option<Review>, sqlx::Error> {
        let set = match reaction {
            Reaction::Like => "likes = likes + 1",
            Reaction::Dislike => "dislikes = dislikes + 1",
        };
        let query = format!("UPDATE reviews SET {set} WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Review>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Set the moderation flag. Returns `None` if the review does not exist.
    pub async fn set_approved(
        pool: &PgPool,
        id: DbId,
        approved: bool,
    ) -> Result<Option<Review>, sqlx::Error> {
        let query = format!("UPDATE reviews SET approved = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Review>(&query)
            .bind(id)
            .bind(approved)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a review. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM reviews WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
