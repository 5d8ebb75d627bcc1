//! Repository for the `events` table and its gallery.

use sqlx::PgPool;
use clubhub_core::types::DbId;

use crate::models::event::{CreateEvent, Event, UpdateEvent};
use crate::models::user::ParticipantSummary;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, event_date, event_time, location, \
                       registration_link, online_poster_url, offline_poster_url, is_live, \
                       created_at, updated_at";

/// Provides CRUD operations for events and their gallery images.
pub struct EventRepo;

impl EventRepo {
    /// Insert a new event, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateEvent) -> Result<Event, sqlx::Error> {
        let query = format!(
            "INSERT INTO events (title, description, event_date, event_time, location,
                                 registration_link, online_poster_url, offline_poster_url, is_live)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, COALESCE($9, false))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.event_date)
            .bind(&input.event_time)
            .bind(&input.location)
            .bind(&input.registration_link)
            .bind(&input.online_poster_url)
            .bind(&input.offline_poster_url)
            .bind(input.is_live)
            .fetch_one(pool)
            .await
    }

    /// Find an event by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Event>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM events WHERE id = $1");
        sqlx::query_as::<_, Event>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Whether an event with the given ID exists.
    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let row: (bool,) = sqlx::query_as("SELECT EXISTS (SELECT 1 FROM events WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }

    /// List all events, latest date first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Event>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM events ORDER BY event_date DESC, id DESC");
        sqlx::query_as::<_, Event>(&query).fetch_all(pool).await
    }

    /// Update an event. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateEvent,
    ) -> Result<Option<Event>, sqlx::Error> {
        let query = format!(
            "UPDATE events SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                event_date = COALESCE($4, event_date),
                event_time = COALESCE($5, event_time),
                location = COALESCE($6, location),
                registration_link = COALESCE($7, registration_link),
                online_poster_url = COALESCE($8, online_poster_url),
                offline_poster_url = COALESCE($9, offline_poster_url),
                is_live = COALESCE($10, is_live)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.event_date)
            .bind(&input.event_time)
            .bind(&input.location)
            .bind(&input.registration_link)
            .bind(&input.online_poster_url)
            .bind(&input.offline_poster_url)
            .bind(input.is_live)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete an event. Tasks, gallery rows and participation
    /// links on both sides are removed by cascade.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /* ----------------------------------------------------------------------
    Gallery
    ---------------------------------------------------------------------- */

    /// Gallery image URLs in insertion order.
    pub async fn gallery(pool: &PgPool, event_id: DbId) -> Result<Vec<String>, sqlx::Error> {
        let rows: Vec<(String,)> =
            sqlx::query_as("SELECT url FROM event_gallery WHERE event_id = $1 ORDER BY id")
                .bind(event_id)
                .fetch_all(pool)
                .await?;
        Ok(rows.into_iter().map(|(url,)| url).collect())
    }

    /// Append URLs to the gallery, skipping ones already present.
    ///
    /// Returns the number of URLs actually added.
    pub async fn add_gallery_urls(
        pool: &PgPool,
        event_id: DbId,
        urls: &[String],
    ) -> Result<u64, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let mut added = 0;
        for url in urls {
            let result = sqlx::query(
                "INSERT INTO event_gallery (event_id, url) VALUES ($1, $2) \
                 ON CONFLICT (event_id, url) DO NOTHING",
            )
            .bind(event_id)
            .bind(url)
            .execute(&mut *tx)
            .await?;
            added += result.rows_affected();
        }
        tx.commit().await?;
        Ok(added)
    }

    /// Remove a single URL from the gallery. Returns `true` if it was present.
    pub async fn remove_gallery_url(
        pool: &PgPool,
        event_id: DbId,
        url: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM event_gallery WHERE event_id = $1 AND url = $2")
            .bind(event_id)
            .bind(url)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /* ----------------------------------------------------------------------
    Participants (read side)
    ---------------------------------------------------------------------- */

    /// Participants of an event in the order they were added.
    pub async fn participants(
        pool: &PgPool,
        event_id: DbId,
    ) -> Result<Vec<ParticipantSummary>, sqlx::Error> {
        sqlx::query_as::<_, ParticipantSummary>(
            "SELECT u.id, u.name, u.student_id, u.email \
             FROM event_participants ep \
             JOIN users u ON u.id = ep.user_id \
             WHERE ep.event_id = $1 \
             ORDER BY ep.added_at, u.id",
        )
        .bind(event_id)
        .fetch_all(pool)
        .await
    }
}
