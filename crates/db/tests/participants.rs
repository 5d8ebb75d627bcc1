//! Repository tests for the two-sided participation relation.

mod common;

use sqlx::PgPool;
use clubhub_db::repositories::{EventRepo, ParticipantRepo, UserRepo};

use common::{create_event, create_user};

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_add_writes_both_sides(pool: PgPool) {
    let event = create_event(&pool, "Fest").await;
    let a = create_user(&pool, "S100").await;
    let b = create_user(&pool, "S200").await;

    let added = ParticipantRepo::add(&pool, event.id, &[a.id, b.id]).await.unwrap();
    assert_eq!(added, 2);

    assert_eq!(
        ParticipantRepo::participant_ids(&pool, event.id).await.unwrap().len(),
        2
    );
    assert_eq!(ParticipantRepo::history_ids(&pool, a.id).await.unwrap(), vec![event.id]);
    assert_eq!(ParticipantRepo::history_ids(&pool, b.id).await.unwrap(), vec![event.id]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_add_is_idempotent(pool: PgPool) {
    let event = create_event(&pool, "Fest").await;
    let a = create_user(&pool, "S100").await;

    ParticipantRepo::add(&pool, event.id, &[a.id, a.id]).await.unwrap();
    let again = ParticipantRepo::add(&pool, event.id, &[a.id]).await.unwrap();
    assert_eq!(again, 0);

    assert_eq!(ParticipantRepo::participant_ids(&pool, event.id).await.unwrap(), vec![a.id]);
    assert_eq!(ParticipantRepo::history_ids(&pool, a.id).await.unwrap(), vec![event.id]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_remove_retracts_both_sides(pool: PgPool) {
    let event = create_event(&pool, "Fest").await;
    let a = create_user(&pool, "S100").await;
    let b = create_user(&pool, "S200").await;
    ParticipantRepo::add(&pool, event.id, &[a.id, b.id]).await.unwrap();

    let removed = ParticipantRepo::remove(&pool, event.id, &[a.id]).await.unwrap();
    assert_eq!(removed, 1);

    assert_eq!(ParticipantRepo::participant_ids(&pool, event.id).await.unwrap(), vec![b.id]);
    assert!(ParticipantRepo::history_ids(&pool, a.id).await.unwrap().is_empty());
    assert_eq!(
        UserRepo::participated_events(&pool, b.id).await.unwrap()[0].id,
        event.id
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_batch_lookup_by_student_id_skips_unknown(pool: PgPool) {
    let a = create_user(&pool, "S100").await;
    let found = UserRepo::find_by_student_ids(
        &pool,
        &["S100".to_string(), "doesNotExist".to_string()],
    )
    .await
    .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, a.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_event_delete_removes_history_links(pool: PgPool) {
    let event = create_event(&pool, "Fest").await;
    let a = create_user(&pool, "S100").await;
    ParticipantRepo::add(&pool, event.id, &[a.id]).await.unwrap();

    EventRepo::delete(&pool, event.id).await.unwrap();
    assert!(ParticipantRepo::history_ids(&pool, a.id).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_existing_user_ids_drops_unknown(pool: PgPool) {
    let a = create_user(&pool, "S100").await;
    let b = create_user(&pool, "S200").await;

    let found = UserRepo::existing_ids(&pool, &[b.id, 999_999, a.id]).await.unwrap();
    assert_eq!(found, vec![a.id, b.id]);
    assert!(UserRepo::existing_ids(&pool, &[999_999]).await.unwrap().is_empty());
}
