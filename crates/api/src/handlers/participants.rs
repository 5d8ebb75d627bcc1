//! Handlers for `/events/{id}/participants`.
//!
//! Admins paste student codes; codes (and user ids) that match no user are
//! dropped quietly as long as at least one matches.

use axum::extract::{Path, State};
use axum::Json;
use clubhub_core::error::CoreError;
use clubhub_core::participants::IdentifierInput;
use clubhub_core::task::dedup_ids;
use clubhub_core::types::DbId;
use clubhub_db::models::event::EventDetail;
use clubhub_db::repositories::{EventRepo, ParticipantRepo, UserRepo};
use serde::Deserialize;

use super::event::load_detail;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

const NO_VALID_USERS: &str = "No valid users found";

/// Request body for `POST /events/{id}/participants`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddParticipantsRequest {
    /// `"S100, S200"` or `["S100", "S200"]`.
    pub student_ids: IdentifierInput,
}

/// Request body for `DELETE /events/{id}/participants`.
///
/// Participants may be named by student code, by user id, or both.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RemoveParticipantsRequest {
    pub student_ids: Option<IdentifierInput>,
    pub user_ids: Vec<DbId>,
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

/// Resolve student codes to user ids in one query.
async fn resolve_codes(state: &AppState, codes: &[String]) -> AppResult<Vec<DbId>> {
    let users = UserRepo::find_by_student_ids(&state.pool, codes).await?;
    if users.len() < codes.len() {
        tracing::debug!(
            requested = codes.len(),
            matched = users.len(),
            "Some student codes matched no user"
        );
    }
    Ok(users.into_iter().map(|u| u.id).collect())
}

/// POST /api/v1/events/{id}/participants
pub async fn add(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(event_id): Path<DbId>,
    Json(input): Json<AddParticipantsRequest>,
) -> AppResult<Json<EventDetail>> {
    ensure_event(&state, event_id).await?;
    let codes = input.student_ids.require_identifiers()?;

    let user_ids = resolve_codes(&state, &codes).await?;
    if user_ids.is_empty() {
        return Err(AppError::Core(CoreError::NoMatch(NO_VALID_USERS.into())));
    }

    let added = ParticipantRepo::add(&state.pool, event_id, &user_ids).await?;
    tracing::info!(event_id, matched = user_ids.len(), added, "Participants added");

    Ok(Json(load_detail(&state, event_id).await?))
}

/// DELETE /api/v1/events/{id}/participants
///
/// Removes the event from each user's history as well.
pub async fn remove(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(event_id): Path<DbId>,
    Json(input): Json<RemoveParticipantsRequest>,
) -> AppResult<Json<EventDetail>> {
    ensure_event(&state, event_id).await?;

    let codes = input
        .student_ids
        .as_ref()
        .map(IdentifierInput::identifiers)
        .unwrap_or_default();
    if codes.is_empty() && input.user_ids.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "At least one student ID is required".into(),
        )));
    }

    let mut user_ids = if input.user_ids.is_empty() {
        Vec::new()
    } else {
        UserRepo::existing_ids(&state.pool, &input.user_ids).await?
    };
    if !codes.is_empty() {
        user_ids.extend(resolve_codes(&state, &codes).await?);
    }
    let user_ids = dedup_ids(&user_ids);
    if user_ids.is_empty() {
        return Err(AppError::Core(CoreError::NoMatch(NO_VALID_USERS.into())));
    }

    let removed = ParticipantRepo::remove(&state.pool, event_id, &user_ids).await?;
    tracing::info!(event_id, removed, "Participants removed");

    Ok(Json(load_detail(&state, event_id).await?))
}
