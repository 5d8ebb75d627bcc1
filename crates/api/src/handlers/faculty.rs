//! Handlers for the `/faculty` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use clubhub_core::error::CoreError;
use clubhub_core::profile::{
    trim_in_place, validate_code, validate_email, validate_name, validate_phone,
    validate_picture_url, validate_tags,
};
use clubhub_core::types::DbId;
use clubhub_db::models::faculty::{CreateFaculty, Faculty, UpdateFaculty};
use clubhub_db::repositories::FacultyRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Faculty",
        id,
    })
}

/// GET /api/v1/faculty
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Faculty>>> {
    Ok(Json(FacultyRepo::list(&state.pool).await?))
}

/// GET /api/v1/faculty/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Faculty>> {
    let faculty = FacultyRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(faculty))
}

/// POST /api/v1/faculty
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(mut input): Json<CreateFaculty>,
) -> AppResult<(StatusCode, Json<Faculty>)> {
    trim_in_place(&mut input.name);
    trim_in_place(&mut input.email);
    trim_in_place(&mut input.faculty_id);

    validate_name(&input.name)?;
    validate_email(&input.email)?;
    validate_code("Faculty ID", &input.faculty_id)?;
    validate_picture_url(&input.picture_url)?;
    if let Some(phone) = &input.phone_number {
        validate_phone(phone)?;
    }
    validate_tags("specializations", &input.specializations)?;

    if let Some(field) = FacultyRepo::find_conflict(
        &state.pool,
        Some(input.email.as_str()),
        Some(input.faculty_id.as_str()),
        None,
    )
    .await?
    {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "A faculty member with this {field} already exists"
        ))));
    }

    let faculty = FacultyRepo::create(&state.pool, &input).await?;
    tracing::info!(faculty_id = faculty.id, "Faculty created");
    Ok((StatusCode::CREATED, Json(faculty)))
}

/// PUT /api/v1/faculty/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateFaculty>,
) -> AppResult<Json<Faculty>> {
    for field in [&mut input.name, &mut input.email, &mut input.faculty_id] {
        if let Some(value) = field.as_mut() {
            trim_in_place(value);
        }
    }

    if let Some(name) = &input.name {
        validate_name(name)?;
    }
    if let Some(email) = &input.email {
        validate_email(email)?;
    }
    if let Some(code) = &input.faculty_id {
        validate_code("Faculty ID", code)?;
    }
    if let Some(url) = &input.picture_url {
        validate_picture_url(url)?;
    }
    if let Some(phone) = &input.phone_number {
        validate_phone(phone)?;
    }
    if let Some(specializations) = &input.specializations {
        validate_tags("specializations", specializations)?;
    }

    if input.email.is_some() || input.faculty_id.is_some() {
        if let Some(field) = FacultyRepo::find_conflict(
            &state.pool,
            input.email.as_deref(),
            input.faculty_id.as_deref(),
            Some(id),
        )
        .await?
        {
            return Err(AppError::Core(CoreError::Conflict(format!(
                "A faculty member with this {field} already exists"
            ))));
        }
    }

    let faculty = FacultyRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(faculty))
}

/// DELETE /api/v1/faculty/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if FacultyRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
