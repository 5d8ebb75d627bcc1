//! Task entity model, DTOs and the resolved response shape.
//!
//! A task row carries the deadline and status; its category assignments live
//! in `task_assignments` and are folded back into a [`TaskDetail`] keyed by
//! [`TaskCategory`].

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use clubhub_core::task::{Assignments, TaskCategory, TaskStatus};
use clubhub_core::types::{DbId, Timestamp};

use crate::models::member::MemberSummary;

/// A row from the `tasks` table.
#[derive(Debug, Clone, FromRow)]
pub struct Task {
    pub id: DbId,
    pub event_id: DbId,
    pub deadline: NaiveDate,
    pub status: String,
    pub created_date: Timestamp,
    pub updated_at: Timestamp,
}

/// One assignment joined with the assigned member's display fields.
#[derive(Debug, Clone, FromRow)]
pub struct TaskAssignmentRow {
    pub task_id: DbId,
    pub category: String,
    pub member_id: DbId,
    pub name: String,
    pub phone_number: Option<String>,
}

/// DTO for creating a task.
#[derive(Debug, Clone)]
pub struct CreateTask {
    pub event_id: DbId,
    pub deadline: NaiveDate,
    pub status: TaskStatus,
    pub assignments: Assignments,
}

/// DTO for updating a task.
///
/// Every category present in `assignments` has its member list replaced;
/// absent categories keep their current assignees.
#[derive(Debug, Clone, Default)]
pub struct UpdateTask {
    pub deadline: Option<NaiveDate>,
    pub status: Option<TaskStatus>,
    pub assignments: Assignments,
}

/// Members assigned to one category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDetail {
    #[serde(rename = "assignedTo")]
    pub assigned_to: Vec<MemberSummary>,
}

/// A task with every category resolved to member summaries.
///
/// Serializes as `{id, event_id, deadline, status, created_date,
/// "OnlinePoster": {"assignedTo": [...]}, ...}` with all categories present.
#[derive(Debug, Clone, Serialize)]
pub struct TaskDetail {
    pub id: DbId,
    pub event_id: DbId,
    pub deadline: NaiveDate,
    pub status: TaskStatus,
    pub created_date: Timestamp,
    #[serde(flatten)]
    pub categories: BTreeMap<TaskCategory, CategoryDetail>,
}

impl TaskDetail {
    /// Fold a task row and its assignment rows into a [`TaskDetail`].
    ///
    /// `rows` may contain assignments of other tasks; they are skipped. Rows
    /// must already be in `position` order. Unknown stored values fall back to
    /// defaults rather than failing the whole read.
    pub fn assemble(task: Task, rows: &[TaskAssignmentRow]) -> Self {
        let mut categories: BTreeMap<TaskCategory, CategoryDetail> = TaskCategory::ALL
            .into_iter()
            .map(|c| (c, CategoryDetail::default()))
            .collect();

        for row in rows.iter().filter(|r| r.task_id == task.id) {
            match row.category.parse::<TaskCategory>() {
                Ok(category) => {
                    categories
                        .entry(category)
                        .or_default()
                        .assigned_to
                        .push(MemberSummary {
                            id: row.member_id,
                            name: row.name.clone(),
                            phone_number: row.phone_number.clone(),
                        });
                }
                Err(_) => {
                    tracing::warn!(task_id = task.id, category = %row.category, "Skipping unknown task category");
                }
            }
        }

        let status = task.status.parse().unwrap_or_else(|_| {
            tracing::warn!(task_id = task.id, status = %task.status, "Unknown task status, reporting Pending");
            TaskStatus::Pending
        });

        Self {
            id: task.id,
            event_id: task.event_id,
            deadline: task.deadline,
            status,
            created_date: task.created_date,
            categories,
        }
    }

    /// Member ids per category, in stored order.
    pub fn assignments(&self) -> Assignments {
        self.categories
            .iter()
            .map(|(c, d)| (*c, d.assigned_to.iter().map(|m| m.id).collect()))
            .collect()
    }
}
