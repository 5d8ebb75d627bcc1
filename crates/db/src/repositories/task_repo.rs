//! Repository for the `tasks` and `task_assignments` tables.
//!
//! Every task lookup is scoped by event: a task id that exists under another
//! event is treated as absent.

use sqlx::{PgPool, Postgres, Transaction};
use clubhub_core::task::TaskCategory;
use clubhub_core::types::DbId;

use crate::models::task::{CreateTask, Task, TaskAssignmentRow, TaskDetail, UpdateTask};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, event_id, deadline, status, created_date, updated_at";

/// Provides CRUD operations for event tasks.
pub struct TaskRepo;

impl TaskRepo {
    /// Insert a task and its category assignments, returning the resolved task.
    ///
    /// No uniqueness is enforced per event; a second create for the same
    /// event produces a second task.
    pub async fn create(pool: &PgPool, input: &CreateTask) -> Result<TaskDetail, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO tasks (event_id, deadline, status)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        let task = sqlx::query_as::<_, Task>(&query)
            .bind(input.event_id)
            .bind(input.deadline)
            .bind(input.status.as_str())
            .fetch_one(&mut *tx)
            .await?;

        for (category, member_ids) in &input.assignments {
            Self::insert_assignments(&mut tx, task.id, *category, member_ids).await?;
        }

        tx.commit().await?;
        Self::resolve_one(pool, task).await
    }

    /// All tasks of an event, oldest first, with assignments resolved.
    pub async fn list_by_event(
        pool: &PgPool,
        event_id: DbId,
    ) -> Result<Vec<TaskDetail>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM tasks WHERE event_id = $1 ORDER BY created_date, id");
        let tasks = sqlx::query_as::<_, Task>(&query)
            .bind(event_id)
            .fetch_all(pool)
            .await?;
        Self::resolve(pool, tasks).await
    }

    /// Whether a task with the given id exists under the given event.
    pub async fn exists_scoped(
        pool: &PgPool,
        event_id: DbId,
        task_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let row: (bool,) = sqlx::query_as(
            "SELECT EXISTS (SELECT 1 FROM tasks WHERE id = $1 AND event_id = $2)",
        )
        .bind(task_id)
        .bind(event_id)
        .fetch_one(pool)
        .await?;
        Ok(row.0)
    }

    /// Find a task by id under the given event.
    pub async fn find_scoped(
        pool: &PgPool,
        event_id: DbId,
        task_id: DbId,
    ) -> Result<Option<TaskDetail>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tasks WHERE id = $1 AND event_id = $2");
        let task = sqlx::query_as::<_, Task>(&query)
            .bind(task_id)
            .bind(event_id)
            .fetch_optional(pool)
            .await?;
        match task {
            Some(task) => Ok(Some(Self::resolve_one(pool, task).await?)),
            None => Ok(None),
        }
    }

    /// Update a task under the given event.
    ///
    /// Deadline and status are patched when present. Each category present
    /// in `input.assignments` has its member list replaced wholesale, so a
    /// member left out of the new list is unassigned. Returns `None` if the
    /// task does not exist under this event.
    pub async fn update_scoped(
        pool: &PgPool,
        event_id: DbId,
        task_id: DbId,
        input: &UpdateTask,
    ) -> Result<Option<TaskDetail>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE tasks SET
                deadline = COALESCE($3, deadline),
                status = COALESCE($4, status)
             WHERE id = $1 AND event_id = $2
             RETURNING {COLUMNS}"
        );
        let Some(task) = sqlx::query_as::<_, Task>(&query)
            .bind(task_id)
            .bind(event_id)
            .bind(input.deadline)
            .bind(input.status.map(|s| s.as_str()))
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        for (category, member_ids) in &input.assignments {
            sqlx::query("DELETE FROM task_assignments WHERE task_id = $1 AND category = $2")
                .bind(task.id)
                .bind(category.as_str())
                .execute(&mut *tx)
                .await?;
            Self::insert_assignments(&mut tx, task.id, *category, member_ids).await?;
        }

        tx.commit().await?;
        Ok(Some(Self::resolve_one(pool, task).await?))
    }

    /// Delete a task under the given event. Returns `true` if a row was removed.
    pub async fn delete_scoped(
        pool: &PgPool,
        event_id: DbId,
        task_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND event_id = $2")
            .bind(task_id)
            .bind(event_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Assignment rows for the given tasks, joined with member display fields.
    pub async fn assignments_for(
        pool: &PgPool,
        task_ids: &[DbId],
    ) -> Result<Vec<TaskAssignmentRow>, sqlx::Error> {
        sqlx::query_as::<_, TaskAssignmentRow>(
            "SELECT ta.task_id, ta.category, ta.member_id, m.name, m.phone_number \
             FROM task_assignments ta \
             JOIN members m ON m.id = ta.member_id \
             WHERE ta.task_id = ANY($1) \
             ORDER BY ta.task_id, ta.category, ta.position",
        )
        .bind(task_ids)
        .fetch_all(pool)
        .await
    }

    async fn insert_assignments(
        tx: &mut Transaction<'_, Postgres>,
        task_id: DbId,
        category: TaskCategory,
        member_ids: &[DbId],
    ) -> Result<(), sqlx::Error> {
        if member_ids.is_empty() {
            return Ok(());
        }
        sqlx::query(
            "INSERT INTO task_assignments (task_id, category, member_id, position) \
             SELECT $1, $2, m.id, m.ord::INTEGER \
             FROM UNNEST($3::BIGINT[]) WITH ORDINALITY AS m(id, ord) \
             ON CONFLICT (task_id, category, member_id) DO NOTHING",
        )
        .bind(task_id)
        .bind(category.as_str())
        .bind(member_ids)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }

    async fn resolve_one(pool: &PgPool, task: Task) -> Result<TaskDetail, sqlx::Error> {
        let rows = Self::assignments_for(pool, &[task.id]).await?;
        Ok(TaskDetail::assemble(task, &rows))
    }

    async fn resolve(pool: &PgPool, tasks: Vec<Task>) -> Result<Vec<TaskDetail>, sqlx::Error> {
        if tasks.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<DbId> = tasks.iter().map(|t| t.id).collect();
        let rows = Self::assignments_for(pool, &ids).await?;
        Ok(tasks
            .into_iter()
            .map(|task| TaskDetail::assemble(task, &rows))
            .collect())
    }
}
