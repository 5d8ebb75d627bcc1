use sqlx::PgPool;

/// Full bootstrap test: connect, migrate, verify schema.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    clubhub_db::health_check(&pool).await.unwrap();

    let tables = [
        "users",
        "members",
        "faculty",
        "events",
        "event_gallery",
        "event_participants",
        "user_participated_events",
        "tasks",
        "task_assignments",
        "reviews",
    ];

    for table in tables {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap_or_else(|e| panic!("{table} query failed: {e}"));
        assert_eq!(count.0, 0, "{table} should start empty");
    }
}

/// The category check constraint rejects names outside the catalogue.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unknown_category_rejected_by_schema(pool: PgPool) {
    sqlx::query("INSERT INTO events (title, event_date) VALUES ('Fest', '2025-03-01')")
        .execute(&pool)
        .await
        .unwrap();
    sqlx::query(
        "INSERT INTO members (name, email, student_id, picture_url) VALUES ('M', 'm@x.edu', 'S1', '/p.png')",
    )
    .execute(&pool)
    .await
    .unwrap();
    sqlx::query("INSERT INTO tasks (event_id, deadline) VALUES (1, '2025-02-20')")
        .execute(&pool)
        .await
        .unwrap();

    let result = sqlx::query(
        "INSERT INTO task_assignments (task_id, category, member_id, position) VALUES (1, 'Catering', 1, 1)",
    )
    .execute(&pool)
    .await;
    assert!(result.is_err());
}
