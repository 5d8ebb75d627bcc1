//! Handlers for the `/tasks/{event_id}` resource.
//!
//! A task body carries `deadline`, `status` and one key per task category:
//!
//! ```text
//! { "deadline": "2025-02-25", "status": "Pending",
//!   "OnlinePoster": { "assignedTo": [1, 2] }, "Anchoring": { "assignedTo": [3] }, ... }
//! ```
//!
//! The server stores whatever assignment lists it is given, including empty
//! ones; the "every category assigned" rule belongs to the form.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use clubhub_core::dates::{parse_date, parse_optional_date};
use clubhub_core::error::CoreError;
use clubhub_core::task::{dedup_ids, parse_assignments, Assignments, TaskStatus};
use clubhub_core::types::DbId;
use clubhub_db::models::task::{CreateTask, TaskDetail, UpdateTask};
use clubhub_db::repositories::{EventRepo, MemberRepo, TaskRepo};
use serde_json::{Map, Value};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

type TaskBody = Map<String, Value>;

// ---------------------------------------------------------------------------
// Body parsing
// ---------------------------------------------------------------------------

fn string_field<'a>(body: &'a TaskBody, key: &str) -> Result<Option<&'a str>, CoreError> {
    match body.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(_) => Err(CoreError::Validation(format!("'{key}' must be a string"))),
    }
}

fn status_field(body: &TaskBody) -> Result<Option<TaskStatus>, CoreError> {
    string_field(body, "status")?
        .map(str::parse::<TaskStatus>)
        .transpose()
}

fn task_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Task", id })
}

async fn ensure_event(state: &AppState, event_id: DbId) -> AppResult<()> {
    if EventRepo::exists(&state.pool, event_id).await? {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Event",
            id: event_id,
        }))
    }
}

/// Reject assignments naming members that do not exist.
async fn ensure_members_exist(state: &AppState, assignments: &Assignments) -> AppResult<()> {
    let all: Vec<DbId> = assignments.values().flatten().copied().collect();
    let ids = dedup_ids(&all);
    if ids.is_empty() {
        return Ok(());
    }

    let existing = MemberRepo::existing_ids(&state.pool, &ids).await?;
    let missing: Vec<String> = ids
        .iter()
        .filter(|id| !existing.contains(id))
        .map(ToString::to_string)
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::Validation(format!(
            "Unknown member id(s): {}",
            missing.join(", ")
        ))))
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/tasks/{event_id}
pub async fn list_by_event(
    State(state): State<AppState>,
    Path(event_id): Path<DbId>,
) -> AppResult<Json<Vec<TaskDetail>>> {
    ensure_event(&state, event_id).await?;
    Ok(Json(TaskRepo::list_by_event(&state.pool, event_id).await?))
}

/// POST /api/v1/tasks/{event_id}
///
/// `deadline` is required; `status` defaults to `Pending`.
pub async fn create(
    State(state): State<AppState>,
    Path(event_id): Path<DbId>,
    Json(body): Json<TaskBody>,
) -> AppResult<(StatusCode, Json<TaskDetail>)> {
    ensure_event(&state, event_id).await?;

    let deadline = parse_date("deadline", string_field(&body, "deadline")?.unwrap_or_default())?;
    let status = status_field(&body)?.unwrap_or_default();
    let assignments = parse_assignments(&body)?;
    ensure_members_exist(&state, &assignments).await?;

    let task = TaskRepo::create(
        &state.pool,
        &CreateTask {
            event_id,
            deadline,
            status,
            assignments,
        },
    )
    .await?;

    tracing::info!(event_id, task_id = task.id, "Task created");
    Ok((StatusCode::CREATED, Json(task)))
}

/// GET /api/v1/tasks/{event_id}/{task_id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path((event_id, task_id)): Path<(DbId, DbId)>,
) -> AppResult<Json<TaskDetail>> {
    let task = TaskRepo::find_scoped(&state.pool, event_id, task_id)
        .await?
        .ok_or_else(|| task_not_found(task_id))?;
    Ok(Json(task))
}

/// PUT /api/v1/tasks/{event_id}/{task_id}
///
/// Each category present in the body has its assignee list replaced.
pub async fn update(
    State(state): State<AppState>,
    Path((event_id, task_id)): Path<(DbId, DbId)>,
    Json(body): Json<TaskBody>,
) -> AppResult<Json<TaskDetail>> {
    let deadline = parse_optional_date("deadline", string_field(&body, "deadline")?)?;
    let status = status_field(&body)?;
    let assignments = parse_assignments(&body)?;
    if !TaskRepo::exists_scoped(&state.pool, event_id, task_id).await? {
        return Err(task_not_found(task_id));
    }
    ensure_members_exist(&state, &assignments).await?;

    let task = TaskRepo::update_scoped(
        &state.pool,
        event_id,
        task_id,
        &UpdateTask {
            deadline,
            status,
            assignments,
        },
    )
    .await?
    .ok_or_else(|| task_not_found(task_id))?;

    tracing::info!(event_id, task_id, "Task updated");
    Ok(Json(task))
}

/// DELETE /api/v1/tasks/{event_id}/{task_id}
pub async fn delete(
    State(state): State<AppState>,
    Path((event_id, task_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    if TaskRepo::delete_scoped(&state.pool, event_id, task_id).await? {
        tracing::info!(event_id, task_id, "Task deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(task_not_found(task_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    fn body(value: Value) -> TaskBody {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_status_field_accepts_catalogue_values() {
        let b = body(json!({"status": "In Progress"}));
        assert_eq!(status_field(&b).unwrap(), Some(TaskStatus::InProgress));
        assert_eq!(status_field(&body(json!({}))).unwrap(), None);
        assert_eq!(status_field(&body(json!({"status": null}))).unwrap(), None);
    }

    #[test]
    fn test_status_field_rejects_unknown() {
        assert_matches!(
            status_field(&body(json!({"status": "Done"}))),
            Err(CoreError::Validation(_))
        );
        assert_matches!(
            status_field(&body(json!({"status": 3}))),
            Err(CoreError::Validation(_))
        );
    }
}
