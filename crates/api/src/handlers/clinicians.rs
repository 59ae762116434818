//! Handlers for `/admin/clinicians`.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use telecare_core::admin::CLINICIAN_ADMIN;
use telecare_core::error::CoreError;
use telecare_core::types::DbId;
use telecare_core::validation::validate_specialty;
use telecare_db::models::clinician::{
    Clinician, ClinicianListRow, CreateClinician, UpdateClinician,
};
use telecare_db::repositories::ClinicianRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::query::ListParams;
use crate::response::{DataResponse, ListResponse};
use crate::state::AppState;

/// GET /api/v1/admin/clinicians
pub async fn list_clinicians(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(params): Query<ListParams>,
) -> AppResult<Json<ListResponse<ClinicianListRow>>> {
    let query = params.resolve(&CLINICIAN_ADMIN)?;
    let page = ClinicianRepo::list(&state.pool, &query).await?;
    Ok(Json(ListResponse::from_page(page, &query)))
}

/// POST /api/v1/admin/clinicians
///
/// A second profile for the same user is rejected with 409.
pub async fn create_clinician(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<CreateClinician>,
) -> AppResult<(StatusCode, Json<DataResponse<Clinician>>)> {
    if let Some(specialty) = &input.specialty {
        validate_specialty(specialty)?;
    }
    let clinician = ClinicianRepo::create(&state.pool, &input).await?;
    tracing::info!(clinician_id = clinician.id, user_id = clinician.user_id, "Clinician profile created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: clinician })))
}

/// GET /api/v1/admin/clinicians/{id}
pub async fn get_clinician(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Clinician>>> {
    let clinician = ClinicianRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Clinician",
            id,
        }))?;
    Ok(Json(DataResponse { data: clinician }))
}

/// PUT /api/v1/admin/clinicians/{id}
pub async fn update_clinician(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateClinician>,
) -> AppResult<Json<DataResponse<Clinician>>> {
    if let Some(specialty) = &input.specialty {
        validate_specialty(specialty)?;
    }
    let clinician = ClinicianRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Clinician",
            id,
        }))?;
    Ok(Json(DataResponse { data: clinician }))
}

/// DELETE /api/v1/admin/clinicians/{id}
///
/// Removes the profile only; the user account remains.
pub async fn delete_clinician(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if ClinicianRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Clinician",
            id,
        }))
    }
}
