//! Response shapes as the client sees them.
//!
//! Only the fields the admin tools read are declared; anything else the
//! server sends is ignored.

use chrono::NaiveDate;
use clubhub_core::error::CoreError;
use clubhub_core::participants::sort_by_code;
use clubhub_core::task::{parse_assignments, Assignments, TaskStatus};
use clubhub_core::types::DbId;
use serde::Deserialize;
use serde_json::{Map, Value};

/// A roster member, the target of task assignments.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Member {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub student_id: String,
    #[serde(default)]
    pub phone_number: Option<String>,
    pub join_date: NaiveDate,
}

/// A task with its assignments reduced to member ids.
///
/// Built from the populated server response, where each category holds
/// `{"assignedTo": [{"id": .., "name": ..}, ..]}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct TaskRecord {
    pub id: DbId,
    pub event_id: DbId,
    pub deadline: NaiveDate,
    pub status: TaskStatus,
    pub assignments: Assignments,
}

impl TryFrom<Map<String, Value>> for TaskRecord {
    type Error = CoreError;

    fn try_from(body: Map<String, Value>) -> Result<Self, Self::Error> {
        let field = |key: &str| {
            body.get(key)
                .ok_or_else(|| CoreError::Validation(format!("task is missing '{key}'")))
        };
        let id_of = |key: &str| {
            field(key)?
                .as_i64()
                .ok_or_else(|| CoreError::Validation(format!("task '{key}' is not an id")))
        };
        let text_of = |key: &str| {
            field(key)?
                .as_str()
                .ok_or_else(|| CoreError::Validation(format!("task '{key}' is not a string")))
        };

        let deadline = NaiveDate::parse_from_str(text_of("deadline")?, "%Y-%m-%d")
            .map_err(|e| CoreError::Validation(format!("task 'deadline': {e}")))?;

        Ok(Self {
            id: id_of("id")?,
            event_id: id_of("event_id")?,
            deadline,
            status: text_of("status")?.parse()?,
            assignments: parse_assignments(&body)?,
        })
    }
}

/// A participant as listed on an event.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Participant {
    pub id: DbId,
    pub name: String,
    pub student_id: String,
    pub email: String,
}

/// An event with its gallery and participants.
#[derive(Debug, Clone, Deserialize)]
pub struct Event {
    pub id: DbId,
    pub title: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub is_live: bool,
    #[serde(default)]
    pub gallery: Vec<String>,
    #[serde(default)]
    pub participants: Vec<Participant>,
}

impl Event {
    /// Participants ordered by the numeric value of their student code.
    pub fn sorted_participants(&self) -> Vec<Participant> {
        let mut participants = self.participants.clone();
        sort_by_code(&mut participants, |p| p.student_id.as_str());
        participants
    }
}
