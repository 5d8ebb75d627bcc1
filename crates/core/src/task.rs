//! Event task catalogue, task status, and assignment rules.
//!
//! A task is the per-event aggregate of [`TaskCategory::ALL`] assignments.
//! The catalogue is the single place categories are enumerated: request
//! parsing, the client-side completeness gate and response shaping all iterate
//! over it.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::CoreError;
use crate::types::DbId;

/// JSON key holding a category's member list, e.g. `{"assignedTo": [1, 2]}`.
pub const ASSIGNED_TO_KEY: &str = "assignedTo";

/* --------------------------------------------------------------------------
Categories
-------------------------------------------------------------------------- */

/// One of the fixed task aspects of an event.
///
/// Serialized with its catalogue name (`"OnlinePoster"`, `"CoCoordinators"`, ...),
/// which is also the JSON key used in task request and response bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TaskCategory {
    OnlinePoster,
    OfflinePoster,
    CaptionToBeShared,
    WhatsAppGroupHandling,
    Announcements,
    EventReport,
    StageHandling,
    ApplicationToBeSigned,
    PhotographyDuringEvent,
    Anchoring,
    BudgetManagement,
    Decoration,
    TechnicalSupport,
    Coordinators,
    CoCoordinators,
}

impl TaskCategory {
    /// Every category, in display order.
    pub const ALL: [TaskCategory; 15] = [
        TaskCategory::OnlinePoster,
        TaskCategory::OfflinePoster,
        TaskCategory::CaptionToBeShared,
        TaskCategory::WhatsAppGroupHandling,
        TaskCategory::Announcements,
        TaskCategory::EventReport,
        TaskCategory::StageHandling,
        TaskCategory::ApplicationToBeSigned,
        TaskCategory::PhotographyDuringEvent,
        TaskCategory::Anchoring,
        TaskCategory::BudgetManagement,
        TaskCategory::Decoration,
        TaskCategory::TechnicalSupport,
        TaskCategory::Coordinators,
        TaskCategory::CoCoordinators,
    ];

    /// Catalogue name, as stored in `task_assignments.category`.
    pub fn as_str(self) -> &'static str {
        match self {
            TaskCategory::OnlinePoster => "OnlinePoster",
            TaskCategory::OfflinePoster => "OfflinePoster",
            TaskCategory::CaptionToBeShared => "CaptionToBeShared",
            TaskCategory::WhatsAppGroupHandling => "WhatsAppGroupHandling",
            TaskCategory::Announcements => "Announcements",
            TaskCategory::EventReport => "EventReport",
            TaskCategory::StageHandling => "StageHandling",
            TaskCategory::ApplicationToBeSigned => "ApplicationToBeSigned",
            TaskCategory::PhotographyDuringEvent => "PhotographyDuringEvent",
            TaskCategory::Anchoring => "Anchoring",
            TaskCategory::BudgetManagement => "BudgetManagement",
            TaskCategory::Decoration => "Decoration",
            TaskCategory::TechnicalSupport => "TechnicalSupport",
            TaskCategory::Coordinators => "Coordinators",
            TaskCategory::CoCoordinators => "CoCoordinators",
        }
    }
}

impl fmt::Display for TaskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskCategory {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TaskCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| CoreError::Validation(format!("Unknown task category '{s}'")))
    }
}

/* --------------------------------------------------------------------------
Status
-------------------------------------------------------------------------- */

/// Lifecycle state of a task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskStatus {
    #[default]
    Pending,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 3] = [
        TaskStatus::Pending,
        TaskStatus::InProgress,
        TaskStatus::Completed,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Pending => "Pending",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Completed => "Completed",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TaskStatus::ALL
            .into_iter()
            .find(|st| st.as_str() == s)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid task status '{s}'. Must be one of: Pending, In Progress, Completed"
                ))
            })
    }
}

/* --------------------------------------------------------------------------
Assignments
-------------------------------------------------------------------------- */

/// Member ids assigned to each category.
///
/// A category missing from the map and a category mapped to an empty list
/// mean the same thing.
pub type Assignments = BTreeMap<TaskCategory, Vec<DbId>>;

/// Toggle `member_id` in a category's member list.
///
/// Turning a member on appends it only if absent; turning it off removes every
/// occurrence. Both directions are idempotent.
pub fn toggle_member(list: &mut Vec<DbId>, member_id: DbId, on: bool) {
    if on {
        if !list.contains(&member_id) {
            list.push(member_id);
        }
    } else {
        list.retain(|&id| id != member_id);
    }
}

/// Categories with no assignee, in catalogue order.
pub fn empty_categories(assignments: &Assignments) -> Vec<TaskCategory> {
    TaskCategory::ALL
        .into_iter()
        .filter(|c| assignments.get(c).map_or(true, |ids| ids.is_empty()))
        .collect()
}

/// Require at least one assignee in every category.
///
/// This is the form-level gate applied before a create or update request is
/// sent. The server accepts empty categories.
pub fn ensure_all_assigned(assignments: &Assignments) -> Result<(), CoreError> {
    let missing = empty_categories(assignments);
    if missing.is_empty() {
        return Ok(());
    }
    let names: Vec<&str> = missing.iter().map(|c| c.as_str()).collect();
    Err(CoreError::Validation(format!(
        "Please assign at least one member to every task. Unassigned: {}",
        names.join(", ")
    )))
}

/// Remove repeated ids, keeping the first occurrence of each.
pub fn dedup_ids(ids: &[DbId]) -> Vec<DbId> {
    let mut out = Vec::with_capacity(ids.len());
    for &id in ids {
        if !out.contains(&id) {
            out.push(id);
        }
    }
    out
}

/// Extract category assignments from the flattened keys of a task body.
///
/// Only keys naming a category are considered; anything else (`id`,
/// `createdDate`, ...) is ignored. A category value must be an object whose
/// optional `assignedTo` array holds member ids, given either as numbers,
/// numeric strings, or populated member objects carrying an `id`.
pub fn parse_assignments(body: &Map<String, Value>) -> Result<Assignments, CoreError> {
    let mut out = Assignments::new();
    for (key, value) in body {
        let Ok(category) = key.parse::<TaskCategory>() else {
            continue;
        };
        let obj = value.as_object().ok_or_else(|| {
            CoreError::Validation(format!("'{category}' must be an object with '{ASSIGNED_TO_KEY}'"))
        })?;
        let ids = match obj.get(ASSIGNED_TO_KEY) {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| member_id_from_value(category, item))
                .collect::<Result<Vec<_>, _>>()?,
            Some(_) => {
                return Err(CoreError::Validation(format!(
                    "'{category}.{ASSIGNED_TO_KEY}' must be an array of member ids"
                )))
            }
        };
        out.insert(category, dedup_ids(&ids));
    }
    Ok(out)
}

fn member_id_from_value(category: TaskCategory, value: &Value) -> Result<DbId, CoreError> {
    let id = match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        Value::Object(obj) => obj.get("id").and_then(|v| match v {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }),
        _ => None,
    };
    id.filter(|&id| id > 0).ok_or_else(|| {
        CoreError::Validation(format!(
            "Invalid member id {value} in '{category}.{ASSIGNED_TO_KEY}'"
        ))
    })
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */
