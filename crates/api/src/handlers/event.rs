//! Handlers for the `/events` resource, including the event gallery.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use clubhub_core::dates::{parse_date, parse_optional_date};
use clubhub_core::error::CoreError;
use clubhub_core::participants::sort_by_code;
use clubhub_core::types::DbId;
use clubhub_db::models::event::{CreateEvent, Event, EventDetail, UpdateEvent};
use clubhub_db::repositories::EventRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /events`.
///
/// `title` and `date` are optional here only so their absence is reported as
/// a validation error rather than a deserialization failure.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateEventRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub location: Option<String>,
    pub registration_link: Option<String>,
    pub online_poster_url: Option<String>,
    pub offline_poster_url: Option<String>,
    pub is_live: Option<bool>,
}

/// Request body for `PUT /events/{id}`. Absent fields are left unchanged.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpdateEventRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub location: Option<String>,
    pub registration_link: Option<String>,
    pub online_poster_url: Option<String>,
    pub offline_poster_url: Option<String>,
    pub is_live: Option<bool>,
}

/// Request body for `POST /events/{id}/gallery`.
#[derive(Debug, Deserialize)]
pub struct AddGalleryRequest {
    pub urls: Vec<String>,
}

/// Request body for `DELETE /events/{id}/gallery`.
#[derive(Debug, Deserialize)]
pub struct RemoveGalleryRequest {
    pub url: String,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn event_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Event", id })
}

fn required_title(title: Option<&str>) -> Result<String, CoreError> {
    match title.map(str::trim) {
        Some(t) if !t.is_empty() => Ok(t.to_string()),
        _ => Err(CoreError::Validation("Event title is required".into())),
    }
}

/// Load an event with its gallery and participants.
///
/// Participants are ordered by the numeric value of their student code.
pub(crate) async fn load_detail(state: &AppState, id: DbId) -> AppResult<EventDetail> {
    let event = EventRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| event_not_found(id))?;
    let gallery = EventRepo::gallery(&state.pool, id).await?;
    let mut participants = EventRepo::participants(&state.pool, id).await?;
    sort_by_code(&mut participants, |p| p.student_id.as_str());

    Ok(EventDetail {
        event,
        gallery,
        participants,
    })
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/events
///
/// Most recent event date first.
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Event>>> {
    Ok(Json(EventRepo::list(&state.pool).await?))
}

/// GET /api/v1/events/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<EventDetail>> {
    Ok(Json(load_detail(&state, id).await?))
}

/// POST /api/v1/events
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<CreateEventRequest>,
) -> AppResult<(StatusCode, Json<Event>)> {
    let title = required_title(input.title.as_deref())?;
    let event_date = parse_date("date", input.date.as_deref().unwrap_or_default())?;

    let event = EventRepo::create(
        &state.pool,
        &CreateEvent {
            title,
            description: input.description,
            event_date,
            event_time: input.time,
            location: input.location,
            registration_link: input.registration_link,
            online_poster_url: input.online_poster_url,
            offline_poster_url: input.offline_poster_url,
            is_live: input.is_live,
        },
    )
    .await?;

    tracing::info!(event_id = event.id, "Event created");
    Ok((StatusCode::CREATED, Json(event)))
}

/// PUT /api/v1/events/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateEventRequest>,
) -> AppResult<Json<Event>> {
    let title = match input.title.as_deref() {
        Some(t) => Some(required_title(Some(t))?),
        None => None,
    };
    let event_date = parse_optional_date("date", input.date.as_deref())?;

    let event = EventRepo::update(
        &state.pool,
        id,
        &UpdateEvent {
            title,
            description: input.description,
            event_date,
            event_time: input.time,
            location: input.location,
            registration_link: input.registration_link,
            online_poster_url: input.online_poster_url,
            offline_poster_url: input.offline_poster_url,
            is_live: input.is_live,
        },
    )
    .await?
    .ok_or_else(|| event_not_found(id))?;
    Ok(Json(event))
}

/// DELETE /api/v1/events/{id}
///
/// Tasks, gallery and participation links go with the event.
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if EventRepo::delete(&state.pool, id).await? {
        tracing::info!(event_id = id, "Event deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(event_not_found(id))
    }
}

/// POST /api/v1/events/{id}/gallery
///
/// Adds image URLs to the gallery. URLs already present are skipped.
pub async fn add_gallery(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<AddGalleryRequest>,
) -> AppResult<Json<EventDetail>> {
    let urls: Vec<String> = input
        .urls
        .iter()
        .map(|u| u.trim())
        .filter(|u| !u.is_empty())
        .map(str::to_string)
        .collect();
    if urls.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "At least one image URL is required".into(),
        )));
    }
    if !EventRepo::exists(&state.pool, id).await? {
        return Err(event_not_found(id));
    }

    let added = EventRepo::add_gallery_urls(&state.pool, id, &urls).await?;
    tracing::info!(event_id = id, added, "Gallery images added");
    Ok(Json(load_detail(&state, id).await?))
}

/// DELETE /api/v1/events/{id}/gallery
pub async fn remove_gallery(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<RemoveGalleryRequest>,
) -> AppResult<Json<EventDetail>> {
    if !EventRepo::exists(&state.pool, id).await? {
        return Err(event_not_found(id));
    }
    if !EventRepo::remove_gallery_url(&state.pool, id, input.url.trim()).await? {
        return Err(AppError::Core(CoreError::NoMatch(
            "Image not found in gallery".into(),
        )));
    }
    Ok(Json(load_detail(&state, id).await?))
}
