//! Repository for the `users` table.

use sqlx::PgPool;
use clubhub_core::types::DbId;

use crate::models::event::Event;
use crate::models::user::{CreateUser, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, student_id, name, email, password_hash, role, created_at, updated_at";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (student_id, name, email, password_hash, role)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.student_id)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.role)
            .fetch_one(pool)
            .await
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by email (case-insensitive).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE lower(email) = lower($1)");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Resolve many student codes in one query. Codes with no user are
    /// simply absent from the result.
    pub async fn find_by_student_ids(
        pool: &PgPool,
        student_ids: &[String],
    ) -> Result<Vec<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE student_id = ANY($1) ORDER BY id");
        sqlx::query_as::<_, User>(&query)
            .bind(student_ids)
            .fetch_all(pool)
            .await
    }

    /// Subset of `ids` that name an existing user.
    pub async fn existing_ids(pool: &PgPool, ids: &[DbId]) -> Result<Vec<DbId>, sqlx::Error> {
        let rows: Vec<(DbId,)> = sqlx::query_as("SELECT id FROM users WHERE id = ANY($1) ORDER BY id")
            .bind(ids)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    /// Name the unique field an insert would collide on, if any.
    ///
    /// Returns `Some("email")` or `Some("student ID")` for the first clash found.
    pub async fn find_conflict(
        pool: &PgPool,
        email: &str,
        student_id: &str,
    ) -> Result<Option<&'static str>, sqlx::Error> {
        let row: Option<(bool, bool)> = sqlx::query_as(
            "SELECT bool_or(lower(email) = lower($1)), bool_or(student_id = $2)
             FROM users
             WHERE lower(email) = lower($1) OR student_id = $2
             HAVING COUNT(*) > 0",
        )
        .bind(email)
        .bind(student_id)
        .fetch_optional(pool)
        .await?;

        Ok(match row {
            Some((true, _)) => Some("email"),
            Some((_, true)) => Some("student ID"),
            _ => None,
        })
    }

    /// List all users ordered by most recently created first.
    pub async fn list(pool: &PgPool) -> Result<Vec<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, User>(&query).fetch_all(pool).await
    }

    /// Change a user's role. Returns `None` if no row with the given `id` exists.
    pub async fn update_role(
        pool: &PgPool,
        id: DbId,
        role: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("UPDATE users SET role = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(role)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a user. Participation links on both sides go with it.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Events in the user's participation history, most recently added first.
    pub async fn participated_events(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<Event>, sqlx::Error> {
        sqlx::query_as::<_, Event>(
            "SELECT e.id, e.title, e.description, e.event_date, e.event_time, e.location, \
                    e.registration_link, e.online_poster_url, e.offline_poster_url, e.is_live, \
                    e.created_at, e.updated_at \
             FROM user_participated_events upe \
             JOIN events e ON e.id = upe.event_id \
             WHERE upe.user_id = $1 \
             ORDER BY upe.added_at DESC, e.id DESC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }
}
