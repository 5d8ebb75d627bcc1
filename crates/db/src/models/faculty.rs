//! Faculty (roster) entity model and DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use clubhub_core::types::{DbId, Timestamp};

/// A row from the `faculty` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Faculty {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub faculty_id: String,
    pub picture_url: String,
    pub description: Option<String>,
    pub specializations: Vec<String>,
    pub phone_number: Option<String>,
    pub is_active: bool,
    pub join_date: NaiveDate,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a faculty profile. `picture_url` comes from a prior upload.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateFaculty {
    pub name: String,
    pub email: String,
    pub faculty_id: String,
    pub picture_url: String,
    pub description: Option<String>,
    #[serde(default)]
    pub specializations: Vec<String>,
    pub phone_number: Option<String>,
    pub is_active: Option<bool>,
    pub join_date: Option<NaiveDate>,
}

/// DTO for updating a faculty profile. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateFaculty {
    pub name: Option<String>,
    pub email: Option<String>,
    pub faculty_id: Option<String>,
    pub picture_url: Option<String>,
    pub description: Option<String>,
    pub specializations: Option<Vec<String>>,
    pub phone_number: Option<String>,
    pub is_active: Option<bool>,
    pub join_date: Option<NaiveDate>,
}
