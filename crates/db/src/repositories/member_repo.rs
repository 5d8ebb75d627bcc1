//! Repository for the `members` table.

use sqlx::PgPool;
use clubhub_core::types::DbId;

use crate::models::member::{CreateMember, Member, UpdateMember};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, email, student_id, picture_url, description, hobbies, \
                       phone_number, is_active, join_date, created_at, updated_at";

/// Provides CRUD operations for roster members.
pub struct MemberRepo;

impl MemberRepo {
    /// Insert a new member, returning the created row.
    ///
    /// `is_active` defaults to `true` and `join_date` to today.
    pub async fn create(pool: &PgPool, input: &CreateMember) -> Result<Member, sqlx::Error> {
        let query = format!(
            "INSERT INTO members (name, email, student_id, picture_url, description, hobbies,
                                  phone_number, is_active, join_date)
             VALUES ($1, $2, $3, $4, $5, $6, $7, COALESCE($8, true), COALESCE($9, CURRENT_DATE))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Member>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.student_id)
            .bind(&input.picture_url)
            .bind(&input.description)
            .bind(&input.hobbies)
            .bind(&input.phone_number)
            .bind(input.is_active)
            .bind(input.join_date)
            .fetch_one(pool)
            .await
    }

    /// Find a member by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Member>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM members WHERE id = $1");
        sqlx::query_as::<_, Member>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all members, most recently joined first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Member>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM members ORDER BY join_date DESC, id DESC");
        sqlx::query_as::<_, Member>(&query).fetch_all(pool).await
    }

    /// Name the unique field (`email` or `student ID`) another member already
    /// uses, ignoring the member `exclude_id` when updating.
    pub async fn find_conflict(
        pool: &PgPool,
        email: Option<&str>,
        student_id: Option<&str>,
        exclude_id: Option<DbId>,
    ) -> Result<Option<&'static str>, sqlx::Error> {
        let row: Option<(bool, bool)> = sqlx::query_as(
            "SELECT COALESCE(bool_or(lower(email) = lower($1)), false),
                    COALESCE(bool_or(student_id = $2), false)
             FROM members
             WHERE (lower(email) = lower($1) OR student_id = $2)
               AND ($3::BIGINT IS NULL OR id <> $3)
             HAVING COUNT(*) > 0",
        )
        .bind(email)
        .bind(student_id)
        .bind(exclude_id)
        .fetch_optional(pool)
        .await?;

        Ok(match row {
            Some((true, _)) => Some("email"),
            Some((_, true)) => Some("student ID"),
            _ => None,
        })
    }

    /// Return the subset of `ids` that exist as members.
    pub async fn existing_ids(pool: &PgPool, ids: &[DbId]) -> Result<Vec<DbId>, sqlx::Error> {
        let rows: Vec<(DbId,)> = sqlx::query_as("SELECT id FROM members WHERE id = ANY($1)")
            .bind(ids)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    /// Update a member. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateMember,
    ) -> Result<Option<Member>, sqlx::Error> {
        let query = format!(
            "UPDATE members SET
                name = COALESCE($2, name),
                email = COALESCE($3, email),
                student_id = COALESCE($4, student_id),
                picture_url = COALESCE($5, picture_url),
                description = COALESCE($6, description),
                hobbies = COALESCE($7, hobbies),
                phone_number = COALESCE($8, phone_number),
                is_active = COALESCE($9, is_active),
                join_date = COALESCE($10, join_date)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Member>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.student_id)
            .bind(&input.picture_url)
            .bind(&input.description)
            .bind(&input.hobbies)
            .bind(&input.phone_number)
            .bind(input.is_active)
            .bind(input.join_date)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a member. Task assignments referencing the member
    /// are removed with it.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM members WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
