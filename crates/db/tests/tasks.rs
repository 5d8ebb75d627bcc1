//! Repository tests for event tasks and their category assignments.

mod common;

use sqlx::PgPool;
use clubhub_core::task::{Assignments, TaskCategory, TaskStatus};
use clubhub_db::models::task::{CreateTask, UpdateTask};
use clubhub_db::repositories::{EventRepo, TaskRepo};

use common::{create_event, create_member, date};

fn all_categories(member_id: i64) -> Assignments {
    TaskCategory::ALL.into_iter().map(|c| (c, vec![member_id])).collect()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_and_list_task(pool: PgPool) {
    let event = create_event(&pool, "Fest").await;
    let m1 = create_member(&pool, "Asha", "S1").await;

    let created = TaskRepo::create(
        &pool,
        &CreateTask {
            event_id: event.id,
            deadline: date("2025-02-25"),
            status: TaskStatus::Pending,
            assignments: all_categories(m1.id),
        },
    )
    .await
    .unwrap();

    assert_eq!(created.event_id, event.id);
    for category in TaskCategory::ALL {
        let assigned = &created.categories[&category].assigned_to;
        assert_eq!(assigned.len(), 1, "{category} should have one assignee");
        assert_eq!(assigned[0].name, "Asha");
    }

    let listed = TaskRepo::list_by_event(&pool, event.id).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, created.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_task_lookup_is_scoped_to_event(pool: PgPool) {
    let e1 = create_event(&pool, "One").await;
    let e2 = create_event(&pool, "Two").await;
    let task = TaskRepo::create(
        &pool,
        &CreateTask {
            event_id: e1.id,
            deadline: date("2025-02-25"),
            status: TaskStatus::Pending,
            assignments: Assignments::new(),
        },
    )
    .await
    .unwrap();

    assert!(TaskRepo::find_scoped(&pool, e2.id, task.id).await.unwrap().is_none());
    assert!(TaskRepo::update_scoped(&pool, e2.id, task.id, &UpdateTask::default())
        .await
        .unwrap()
        .is_none());
    assert!(!TaskRepo::delete_scoped(&pool, e2.id, task.id).await.unwrap());

    // Still intact under its own event.
    assert!(TaskRepo::find_scoped(&pool, e1.id, task.id).await.unwrap().is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_replaces_category_list(pool: PgPool) {
    let event = create_event(&pool, "Fest").await;
    let m1 = create_member(&pool, "Asha", "S1").await;
    let m2 = create_member(&pool, "Ben", "S2").await;

    let mut assignments = all_categories(m1.id);
    assignments.insert(TaskCategory::OnlinePoster, vec![m1.id, m2.id]);
    let task = TaskRepo::create(
        &pool,
        &CreateTask {
            event_id: event.id,
            deadline: date("2025-02-25"),
            status: TaskStatus::Pending,
            assignments,
        },
    )
    .await
    .unwrap();
    assert_eq!(task.assignments()[&TaskCategory::OnlinePoster], vec![m1.id, m2.id]);

    let mut patch = Assignments::new();
    patch.insert(TaskCategory::OnlinePoster, vec![m1.id]);
    let updated = TaskRepo::update_scoped(
        &pool,
        event.id,
        task.id,
        &UpdateTask {
            deadline: None,
            status: Some(TaskStatus::InProgress),
            assignments: patch,
        },
    )
    .await
    .unwrap()
    .unwrap();

    assert_eq!(updated.assignments()[&TaskCategory::OnlinePoster], vec![m1.id]);
    assert_eq!(updated.status, TaskStatus::InProgress);
    assert_eq!(updated.deadline, date("2025-02-25"));
    // Categories absent from the update keep their assignees.
    assert_eq!(updated.assignments()[&TaskCategory::Decoration], vec![m1.id]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_persists_empty_category(pool: PgPool) {
    let event = create_event(&pool, "Fest").await;
    let m1 = create_member(&pool, "Asha", "S1").await;
    let task = TaskRepo::create(
        &pool,
        &CreateTask {
            event_id: event.id,
            deadline: date("2025-02-25"),
            status: TaskStatus::Pending,
            assignments: all_categories(m1.id),
        },
    )
    .await
    .unwrap();

    let mut patch = Assignments::new();
    patch.insert(TaskCategory::Decoration, vec![]);
    let updated = TaskRepo::update_scoped(
        &pool,
        event.id,
        task.id,
        &UpdateTask {
            assignments: patch,
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();

    assert!(updated.categories[&TaskCategory::Decoration].assigned_to.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_concurrent_creates_both_succeed(pool: PgPool) {
    let event = create_event(&pool, "Fest").await;
    let input = CreateTask {
        event_id: event.id,
        deadline: date("2025-02-25"),
        status: TaskStatus::Pending,
        assignments: Assignments::new(),
    };

    let (a, b) = tokio::join!(TaskRepo::create(&pool, &input), TaskRepo::create(&pool, &input));
    assert!(a.is_ok() && b.is_ok());

    let tasks = TaskRepo::list_by_event(&pool, event.id).await.unwrap();
    assert_eq!(tasks.len(), 2, "no one-task-per-event constraint exists");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_deleting_member_or_event_cleans_up(pool: PgPool) {
    let event = create_event(&pool, "Fest").await;
    let m1 = create_member(&pool, "Asha", "S1").await;
    let task = TaskRepo::create(
        &pool,
        &CreateTask {
            event_id: event.id,
            deadline: date("2025-02-25"),
            status: TaskStatus::Completed,
            assignments: all_categories(m1.id),
        },
    )
    .await
    .unwrap();

    clubhub_db::repositories::MemberRepo::delete(&pool, m1.id).await.unwrap();
    let after = TaskRepo::find_scoped(&pool, event.id, task.id).await.unwrap().unwrap();
    assert!(after.categories[&TaskCategory::Anchoring].assigned_to.is_empty());

    EventRepo::delete(&pool, event.id).await.unwrap();
    assert!(TaskRepo::list_by_event(&pool, event.id).await.unwrap().is_empty());
}
