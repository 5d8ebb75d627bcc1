//! Handlers for the `/members` resource.
//!
//! Reads are public (the roster doubles as the task assignment picker);
//! writes require an admin.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use clubhub_core::error::CoreError;
use clubhub_core::profile::{
    trim_in_place, validate_code, validate_email, validate_name, validate_phone,
    validate_picture_url, validate_tags,
};
use clubhub_core::types::DbId;
use clubhub_db::models::member::{CreateMember, Member, UpdateMember};
use clubhub_db::repositories::MemberRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

fn normalize_create(input: &mut CreateMember) {
    trim_in_place(&mut input.name);
    trim_in_place(&mut input.email);
    trim_in_place(&mut input.student_id);
}

fn normalize_update(input: &mut UpdateMember) {
    for field in [&mut input.name, &mut input.email, &mut input.student_id] {
        if let Some(value) = field.as_mut() {
            trim_in_place(value);
        }
    }
}

fn validate_create(input: &CreateMember) -> Result<(), CoreError> {
    validate_name(&input.name)?;
    validate_email(&input.email)?;
    validate_code("Student ID", &input.student_id)?;
    validate_picture_url(&input.picture_url)?;
    if let Some(phone) = &input.phone_number {
        validate_phone(phone)?;
    }
    validate_tags("hobbies", &input.hobbies)
}

fn validate_update(input: &UpdateMember) -> Result<(), CoreError> {
    if let Some(name) = &input.name {
        validate_name(name)?;
    }
    if let Some(email) = &input.email {
        validate_email(email)?;
    }
    if let Some(code) = &input.student_id {
        validate_code("Student ID", code)?;
    }
    if let Some(url) = &input.picture_url {
        validate_picture_url(url)?;
    }
    if let Some(phone) = &input.phone_number {
        validate_phone(phone)?;
    }
    if let Some(hobbies) = &input.hobbies {
        validate_tags("hobbies", hobbies)?;
    }
    Ok(())
}

async fn ensure_unique(
    state: &AppState,
    email: Option<&str>,
    student_id: Option<&str>,
    exclude_id: Option<DbId>,
) -> AppResult<()> {
    if email.is_none() && student_id.is_none() {
        return Ok(());
    }
    match MemberRepo::find_conflict(&state.pool, email, student_id, exclude_id).await? {
        Some(field) => Err(AppError::Core(CoreError::Conflict(format!(
            "A member with this {field} already exists"
        )))),
        None => Ok(()),
    }
}

/// GET /api/v1/members
///
/// Newest joiners first.
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Member>>> {
    let members = MemberRepo::list(&state.pool).await?;
    Ok(Json(members))
}

/// GET /api/v1/members/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Member>> {
    let member = MemberRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Member",
            id,
        }))?;
    Ok(Json(member))
}

/// POST /api/v1/members
///
/// `picture_url` must come from a prior `POST /uploads`.
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(mut input): Json<CreateMember>,
) -> AppResult<(StatusCode, Json<Member>)> {
    normalize_create(&mut input);
    validate_create(&input)?;
    ensure_unique(
        &state,
        Some(input.email.as_str()),
        Some(input.student_id.as_str()),
        None,
    )
    .await?;

    let member = MemberRepo::create(&state.pool, &input).await?;
    tracing::info!(member_id = member.id, "Member created");
    Ok((StatusCode::CREATED, Json(member)))
}

/// PUT /api/v1/members/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateMember>,
) -> AppResult<Json<Member>> {
    normalize_update(&mut input);
    validate_update(&input)?;
    ensure_unique(
        &state,
        input.email.as_deref(),
        input.student_id.as_deref(),
        Some(id),
    )
    .await?;

    let member = MemberRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Member",
            id,
        }))?;
    Ok(Json(member))
}

/// DELETE /api/v1/members/{id}
///
/// The member also disappears from every task assignment.
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if MemberRepo::delete(&state.pool, id).await? {
        tracing::info!(member_id = id, "Member deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Member",
            id,
        }))
    }
}
