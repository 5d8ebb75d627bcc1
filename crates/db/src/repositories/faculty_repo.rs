//! Repository for the `faculty` table.

use sqlx::PgPool;
use clubhub_core::types::DbId;

use crate::models::faculty::{CreateFaculty, Faculty, UpdateFaculty};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, email, faculty_id, picture_url, description, specializations, \
                       phone_number, is_active, join_date, created_at, updated_at";

/// Provides CRUD operations for faculty profiles.
pub struct FacultyRepo;

impl FacultyRepo {
    /// Insert a new faculty profile, returning the created row.
    ///
    /// `is_active` defaults to `true` and `join_date` to today.
    pub async fn create(pool: &PgPool, input: &CreateFaculty) -> Result<Faculty, sqlx::Error> {
        let query = format!(
            "INSERT INTO faculty (name, email, faculty_id, picture_url, description, specializations,
                                  phone_number, is_active, join_date)
             VALUES ($1, $2, $3, $4, $5, $6, $7, COALESCE($8, true), COALESCE($9, CURRENT_DATE))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Faculty>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.faculty_id)
            .bind(&input.picture_url)
            .bind(&input.description)
            .bind(&input.specializations)
            .bind(&input.phone_number)
            .bind(input.is_active)
            .bind(input.join_date)
            .fetch_one(pool)
            .await
    }

    /// Find a faculty profile by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Faculty>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM faculty WHERE id = $1");
        sqlx::query_as::<_, Faculty>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all faculty, most recently joined first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Faculty>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM faculty ORDER BY join_date DESC, id DESC");
        sqlx::query_as::<_, Faculty>(&query).fetch_all(pool).await
    }

    /// Name the unique field (`email` or `faculty ID`) another faculty profile already
    /// uses, ignoring the profile `exclude_id` when updating.
    pub async fn find_conflict(
        pool: &PgPool,
        email: Option<&str>,
        faculty_id: Option<&str>,
        exclude_id: Option<DbId>,
    ) -> Result<Option<&'static str>, sqlx::Error> {
        let row: Option<(bool, bool)> = sqlx::query_as(
            "SELECT COALESCE(bool_or(lower(email) = lower($1)), false),
                    COALESCE(bool_or(faculty_id = $2), false)
             FROM faculty
             WHERE (lower(email) = lower($1) OR faculty_id = $2)
               AND ($3::BIGINT IS NULL OR id <> $3)
             HAVING COUNT(*) > 0",
        )
        .bind(email)
        .bind(faculty_id)
        .bind(exclude_id)
        .fetch_optional(pool)
        .await?;

        Ok(match row {
            Some((true, _)) => Some("email"),
            Some((_, true)) => Some("faculty ID"),
            _ => None,
        })
    }

    /// Update a faculty profile. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateFaculty,
    ) -> Result<Option<Faculty>, sqlx::Error> {
        let query = format!(
            "UPDATE faculty SET
                name = COALESCE($2, name),
                email = COALESCE($3, email),
                faculty_id = COALESCE($4, faculty_id),
                picture_url = COALESCE($5, picture_url),
                description = COALESCE($6, description),
                specializations = COALESCE($7, specializations),
                phone_number = COALESCE($8, phone_number),
                is_active = COALESCE($9, is_active),
                join_date = COALESCE($10, join_date)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Faculty>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.faculty_id)
            .bind(&input.picture_url)
            .bind(&input.description)
            .bind(&input.specializations)
            .bind(&input.phone_number)
            .bind(input.is_active)
            .bind(input.join_date)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a faculty profile.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM faculty WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
