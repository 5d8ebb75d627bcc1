//! The task assignment form.
//!
//! Toggling a member edits the full member list of one category; the whole
//! list is what gets sent, so an update replaces each category rather than
//! merging into it.

use chrono::NaiveDate;
use clubhub_core::task::{
    empty_categories, toggle_member, Assignments, TaskCategory, TaskStatus, ASSIGNED_TO_KEY,
};
use clubhub_core::types::DbId;
use serde_json::{json, Map, Value};

use crate::error::ClientError;
use crate::models::TaskRecord;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskForm {
    pub deadline: Option<NaiveDate>,
    pub status: TaskStatus,
    assignments: Assignments,
}

impl TaskForm {
    /// Empty form: no deadline, status `Pending`, nobody assigned.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-fill the form from an existing task for editing.
    pub fn from_task(task: &TaskRecord) -> Self {
        Self {
            deadline: Some(task.deadline),
            status: task.status,
            assignments: task.assignments.clone(),
        }
    }

    /// Turn `member_id` on or off for `category`.
    pub fn toggle(&mut self, category: TaskCategory, member_id: DbId, on: bool) {
        toggle_member(self.assignments.entry(category).or_default(), member_id, on);
    }

    /// Replace a category's members outright.
    pub fn set_assigned(&mut self, category: TaskCategory, member_ids: Vec<DbId>) {
        self.assignments.insert(category, member_ids);
    }

    /// Assign one member to every category.
    pub fn assign_all(&mut self, member_id: DbId) {
        for category in TaskCategory::ALL {
            self.toggle(category, member_id, true);
        }
    }

    pub fn assigned(&self, category: TaskCategory) -> &[DbId] {
        self.assignments
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn is_assigned(&self, category: TaskCategory, member_id: DbId) -> bool {
        self.assigned(category).contains(&member_id)
    }

    pub fn empty_categories(&self) -> Vec<TaskCategory> {
        empty_categories(&self.assignments)
    }

    /// Gate applied before every create or update request.
    pub fn validate(&self) -> Result<(), ClientError> {
        if self.deadline.is_none() {
            return Err(ClientError::MissingDeadline);
        }
        let missing = self.empty_categories();
        if !missing.is_empty() {
            return Err(ClientError::Incomplete(missing));
        }
        Ok(())
    }

    /// Request body for `POST`/`PUT /tasks/...`, listing all categories.
    pub fn to_payload(&self) -> Value {
        let mut body = Map::new();
        if let Some(deadline) = self.deadline {
            body.insert(
                "deadline".into(),
                Value::String(deadline.format("%Y-%m-%d").to_string()),
            );
        }
        body.insert("status".into(), Value::String(self.status.as_str().into()));
        for category in TaskCategory::ALL {
            body.insert(
                category.as_str().into(),
                json!({ ASSIGNED_TO_KEY: self.assigned(category) }),
            );
        }
        Value::Object(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn complete_form() -> TaskForm {
        let mut form = TaskForm::new();
        form.deadline = NaiveDate::from_ymd_opt(2025, 2, 25);
        form.assign_all(1);
        form
    }

    #[test]
    fn test_toggle_is_idempotent() {
        let mut form = TaskForm::new();
        form.toggle(TaskCategory::Anchoring, 3, true);
        form.toggle(TaskCategory::Anchoring, 3, true);
        assert_eq!(form.assigned(TaskCategory::Anchoring), &[3]);

        form.toggle(TaskCategory::Anchoring, 9, false);
        assert_eq!(form.assigned(TaskCategory::Anchoring), &[3]);

        form.toggle(TaskCategory::Anchoring, 3, false);
        assert!(form.assigned(TaskCategory::Anchoring).is_empty());
        assert!(!form.is_assigned(TaskCategory::Anchoring, 3));
    }

    #[test]
    fn test_validate_requires_every_category() {
        let mut form = complete_form();
        assert!(form.validate().is_ok());

        form.toggle(TaskCategory::Decoration, 1, false);
        assert_matches!(
            form.validate(),
            Err(ClientError::Incomplete(missing)) if missing == vec![TaskCategory::Decoration]
        );
    }

    #[test]
    fn test_validate_requires_deadline() {
        let mut form = complete_form();
        form.deadline = None;
        assert_matches!(form.validate(), Err(ClientError::MissingDeadline));
    }

    #[test]
    fn test_new_form_lists_all_categories_as_empty() {
        assert_eq!(TaskForm::new().empty_categories().len(), TaskCategory::ALL.len());
    }

    #[test]
    fn test_payload_shape() {
        let mut form = complete_form();
        form.status = TaskStatus::InProgress;
        form.set_assigned(TaskCategory::OnlinePoster, vec![1, 2]);

        let payload = form.to_payload();
        assert_eq!(payload["deadline"], "2025-02-25");
        assert_eq!(payload["status"], "In Progress");
        assert_eq!(payload["OnlinePoster"]["assignedTo"], json!([1, 2]));
        assert_eq!(payload["CoCoordinators"]["assignedTo"], json!([1]));
        assert_eq!(payload.as_object().unwrap().len(), 2 + TaskCategory::ALL.len());
    }

    #[test]
    fn test_from_task_round_trips_assignments() {
        let form = complete_form();
        let task = TaskRecord {
            id: 5,
            event_id: 2,
            deadline: form.deadline.unwrap(),
            status: TaskStatus::Completed,
            assignments: form.assignments.clone(),
        };
        let edited = TaskForm::from_task(&task);
        assert_eq!(edited.status, TaskStatus::Completed);
        assert_eq!(edited.assigned(TaskCategory::Anchoring), &[1]);
        assert!(edited.validate().is_ok());
    }
}
