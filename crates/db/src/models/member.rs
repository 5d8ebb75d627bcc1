//! Member (roster) entity model and DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use clubhub_core::types::{DbId, Timestamp};

/// A row from the `members` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Member {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub student_id: String,
    pub picture_url: String,
    pub description: Option<String>,
    pub hobbies: Vec<String>,
    pub phone_number: Option<String>,
    pub is_active: bool,
    pub join_date: NaiveDate,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// The member fields shown next to a task assignment.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct MemberSummary {
    pub id: DbId,
    pub name: String,
    pub phone_number: Option<String>,
}

/// DTO for creating a new member. `picture_url` comes from a prior upload.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMember {
    pub name: String,
    pub email: String,
    pub student_id: String,
    pub picture_url: String,
    pub description: Option<String>,
    #[serde(default)]
    pub hobbies: Vec<String>,
    pub phone_number: Option<String>,
    /// Defaults to `true` if omitted.
    pub is_active: Option<bool>,
    /// Defaults to today if omitted.
    pub join_date: Option<NaiveDate>,
}

/// DTO for updating an existing member. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateMember {
    pub name: Option<String>,
    pub email: Option<String>,
    pub student_id: Option<String>,
    pub picture_url: Option<String>,
    pub description: Option<String>,
    pub hobbies: Option<Vec<String>>,
    pub phone_number: Option<String>,
    pub is_active: Option<bool>,
    pub join_date: Option<NaiveDate>,
}
