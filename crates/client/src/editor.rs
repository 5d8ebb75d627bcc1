//! Task editing session for one event.

use clubhub_core::types::DbId;

use crate::api::ClubClient;
use crate::error::ClientError;
use crate::form::TaskForm;
use crate::models::TaskRecord;
use crate::roster::RosterView;

/// Whether submitting creates the event's task or edits the existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    Add,
    Edit { task_id: DbId },
}

/// The task form of one event together with the roster to pick from.
///
/// An event is expected to carry a single task. When the server holds
/// several, the first one listed is edited.
#[derive(Debug)]
pub struct TaskEditor {
    client: ClubClient,
    event_id: DbId,
    mode: EditorMode,
    pub form: TaskForm,
    pub roster: RosterView,
    /// Set when the roster could not be fetched. The form stays usable with
    /// an empty roster.
    pub roster_error: Option<ClientError>,
}

impl TaskEditor {
    /// Fetch the event's task and the member roster.
    ///
    /// A failed task fetch is returned as an error; a failed roster fetch is
    /// not.
    pub async fn load(client: ClubClient, event_id: DbId) -> Result<Self, ClientError> {
        let (tasks, members) = tokio::join!(client.list_tasks(event_id), client.list_members());
        let tasks = tasks?;

        let (roster, roster_error) = match members {
            Ok(members) => (RosterView::new(members), None),
            Err(e) => {
                tracing::warn!(event_id, error = %e, "Failed to load member roster");
                (RosterView::default(), Some(e))
            }
        };

        let (mode, form) = match tasks.first() {
            Some(task) => (EditorMode::Edit { task_id: task.id }, TaskForm::from_task(task)),
            None => (EditorMode::Add, TaskForm::new()),
        };

        Ok(Self {
            client,
            event_id,
            mode,
            form,
            roster,
            roster_error,
        })
    }

    pub fn event_id(&self) -> DbId {
        self.event_id
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    /// Send the form. After a successful create the editor switches to
    /// editing the new task.
    pub async fn submit(&mut self) -> Result<TaskRecord, ClientError> {
        let task = match self.mode {
            EditorMode::Add => self.client.create_task(self.event_id, &self.form).await?,
            EditorMode::Edit { task_id } => {
                self.client
                    .update_task(self.event_id, task_id, &self.form)
                    .await?
            }
        };
        self.mode = EditorMode::Edit { task_id: task.id };
        self.form = TaskForm::from_task(&task);
        Ok(task)
    }
}
