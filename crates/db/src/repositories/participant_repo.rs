//! Repository for the event <-> user participation relation.
//!
//! The relation is stored on both sides: `event_participants` (the event's
//! attendee set) and `user_participated_events` (the user's history). Every
//! write here touches both tables inside one transaction so the two sides
//! never drift apart.

use sqlx::PgPool;
use clubhub_core::types::DbId;

/// Provides the participation add/remove operations.
pub struct ParticipantRepo;

impl ParticipantRepo {
    /// Add users to an event and the event to each user's history.
    ///
    /// Set semantics on both sides: users already participating are left
    /// as they are. Returns how many users were newly added to the event.
    pub async fn add(pool: &PgPool, event_id: DbId, user_ids: &[DbId]) -> Result<u64, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let added = sqlx::query(
            "INSERT INTO event_participants (event_id, user_id) \
             SELECT $1, u FROM UNNEST($2::BIGINT[]) AS u \
             ON CONFLICT (event_id, user_id) DO NOTHING",
        )
        .bind(event_id)
        .bind(user_ids)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        sqlx::query(
            "INSERT INTO user_participated_events (user_id, event_id) \
             SELECT u, $1 FROM UNNEST($2::BIGINT[]) AS u \
             ON CONFLICT (user_id, event_id) DO NOTHING",
        )
        .bind(event_id)
        .bind(user_ids)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(added)
    }

    /// Remove users from an event and retract the event from their history.
    ///
    /// Returns how many users were removed from the event.
    pub async fn remove(
        pool: &PgPool,
        event_id: DbId,
        user_ids: &[DbId],
    ) -> Result<u64, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let removed = sqlx::query(
            "DELETE FROM event_participants WHERE event_id = $1 AND user_id = ANY($2)",
        )
        .bind(event_id)
        .bind(user_ids)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        sqlx::query("DELETE FROM user_participated_events WHERE event_id = $1 AND user_id = ANY($2)")
            .bind(event_id)
            .bind(user_ids)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(removed)
    }

    /// User ids currently participating in an event.
    pub async fn participant_ids(pool: &PgPool, event_id: DbId) -> Result<Vec<DbId>, sqlx::Error> {
        let rows: Vec<(DbId,)> = sqlx::query_as(
            "SELECT user_id FROM event_participants WHERE event_id = $1 ORDER BY added_at, user_id",
        )
        .bind(event_id)
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    /// Event ids in a user's participation history.
    pub async fn history_ids(pool: &PgPool, user_id: DbId) -> Result<Vec<DbId>, sqlx::Error> {
        let rows: Vec<(DbId,)> = sqlx::query_as(
            "SELECT event_id FROM user_participated_events WHERE user_id = $1 \
             ORDER BY added_at, event_id",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }
}
