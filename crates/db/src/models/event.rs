//! Event entity model and DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use clubhub_core::types::{DbId, Timestamp};

use crate::models::user::ParticipantSummary;

/// A row from the `events` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Event {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    #[serde(rename = "date")]
    pub event_date: NaiveDate,
    #[serde(rename = "time")]
    pub event_time: Option<String>,
    pub location: Option<String>,
    pub registration_link: Option<String>,
    pub online_poster_url: Option<String>,
    pub offline_poster_url: Option<String>,
    pub is_live: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// An event together with its gallery and resolved participants.
#[derive(Debug, Clone, Serialize)]
pub struct EventDetail {
    #[serde(flatten)]
    pub event: Event,
    pub gallery: Vec<String>,
    pub participants: Vec<ParticipantSummary>,
}

/// DTO for creating a new event.
#[derive(Debug, Clone)]
pub struct CreateEvent {
    pub title: String,
    pub description: Option<String>,
    pub event_date: NaiveDate,
    pub event_time: Option<String>,
    pub location: Option<String>,
    pub registration_link: Option<String>,
    pub online_poster_url: Option<String>,
    pub offline_poster_url: Option<String>,
    /// Defaults to `false` if omitted.
    pub is_live: Option<bool>,
}

/// DTO for updating an existing event. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateEvent {
    pub title: Option<String>,
    pub description: Option<String>,
    pub event_date: Option<NaiveDate>,
    pub event_time: Option<String>,
    pub location: Option<String>,
    pub registration_link: Option<String>,
    pub online_poster_url: Option<String>,
    pub offline_poster_url: Option<String>,
    pub is_live: Option<bool>,
}
