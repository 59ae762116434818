//! Handlers for `/admin/patients`.
//!
//! The assigned clinician must be a user holding the `clinician` role. The
//! database does not enforce this; it is checked here, and the eligible
//! users are served by `clinician-choices`.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;
use telecare_core::admin::PATIENT_ADMIN;
use telecare_core::error::CoreError;
use telecare_core::risk::RiskCategory;
use telecare_core::roles::{Role, ROLE_CLINICIAN};
use telecare_core::types::DbId;
use telecare_db::models::patient::{
    CreatePatient, Patient, PatientFilter, PatientListRow, UpdatePatient,
};
use telecare_db::models::user::UserResponse;
use telecare_db::repositories::{PatientRepo, UserRepo};

use super::present;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::query::ListParams;
use crate::response::{DataResponse, ListResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /admin/patients`.
#[derive(Debug, Deserialize)]
pub struct CreatePatientRequest {
    pub user_id: DbId,
    pub assigned_clinician_id: Option<DbId>,
    pub date_of_birth: Option<NaiveDate>,
    pub medical_notes: Option<String>,
    pub risk_category: Option<String>,
}

/// Request body for `PUT /admin/patients/{id}`.
///
/// Every field distinguishes absent (unchanged) from `null` (cleared;
/// unassign for the clinician).
#[derive(Debug, Deserialize)]
pub struct UpdatePatientRequest {
    #[serde(default, deserialize_with = "present")]
    pub assigned_clinician_id: Option<Option<DbId>>,
    #[serde(default, deserialize_with = "present")]
    pub date_of_birth: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "present")]
    pub medical_notes: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub risk_category: Option<Option<String>>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/patients
///
/// Filters: `assigned_clinician` (user id) and `risk_category`.
pub async fn list_patients(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(params): Query<ListParams>,
    Query(filter): Query<PatientFilter>,
) -> AppResult<Json<ListResponse<PatientListRow>>> {
    if let Some(risk) = &filter.risk_category {
        parse_risk(risk)?;
    }
    let query = params.resolve(&PATIENT_ADMIN)?;
    let page = PatientRepo::list(&state.pool, &filter, &query).await?;
    Ok(Json(ListResponse::from_page(page, &query)))
}

/// GET /api/v1/admin/patients/clinician-choices
///
/// Active users eligible to be assigned as a patient's clinician.
pub async fn clinician_choices(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<DataResponse<Vec<UserResponse>>>> {
    let users = UserRepo::list_by_role(&state.pool, ROLE_CLINICIAN).await?;
    Ok(Json(DataResponse {
        data: users.iter().map(UserResponse::from).collect(),
    }))
}

/// POST /api/v1/admin/patients
pub async fn create_patient(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<CreatePatientRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Patient>>)> {
    let risk_category = input.risk_category.as_deref().map(parse_risk).transpose()?;
    if let Some(clinician_id) = input.assigned_clinician_id {
        ensure_clinician(&state, clinician_id).await?;
    }

    let dto = CreatePatient {
        user_id: input.user_id,
        assigned_clinician_id: input.assigned_clinician_id,
        date_of_birth: input.date_of_birth,
        medical_notes: input.medical_notes,
        risk_category: risk_category.map(|r| r.as_str().to_string()),
    };
    let patient = PatientRepo::create(&state.pool, &dto).await?;

    tracing::info!(patient_id = patient.id, user_id = patient.user_id, "Patient profile created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: patient })))
}

/// GET /api/v1/admin/patients/{id}
pub async fn get_patient(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Patient>>> {
    let patient = PatientRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Patient",
            id,
        }))?;
    Ok(Json(DataResponse { data: patient }))
}

/// PUT /api/v1/admin/patients/{id}
pub async fn update_patient(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePatientRequest>,
) -> AppResult<Json<DataResponse<Patient>>> {
    let risk_category = match input.risk_category {
        Some(Some(raw)) => Some(Some(parse_risk(&raw)?.as_str().to_string())),
        Some(None) => Some(None),
        None => None,
    };
    if let Some(Some(clinician_id)) = input.assigned_clinician_id {
        ensure_clinician(&state, clinician_id).await?;
    }

    let dto = UpdatePatient {
        date_of_birth: input.date_of_birth,
        medical_notes: input.medical_notes,
        risk_category,
    };
    let mut patient = PatientRepo::update(&state.pool, id, &dto)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Patient",
            id,
        }))?;

    if let Some(clinician_id) = input.assigned_clinician_id {
        patient = PatientRepo::set_assigned_clinician(&state.pool, id, clinician_id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Patient",
                id,
            }))?;
    }

    Ok(Json(DataResponse { data: patient }))
}

/// DELETE /api/v1/admin/patients/{id}
///
/// Cascades to the patient's sensor frames, alerts and comments.
pub async fn delete_patient(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if PatientRepo::delete(&state.pool, id).await? {
        tracing::info!(patient_id = id, admin_id = admin.user_id, "Patient profile deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Patient",
            id,
        }))
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_risk(raw: &str) -> AppResult<RiskCategory> {
    raw.parse::<RiskCategory>()
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))
}

/// Reject an assigned clinician that does not exist or lacks the role.
async fn ensure_clinician(state: &AppState, user_id: DbId) -> AppResult<()> {
    let user = UserRepo::find_by_id(&state.pool, user_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Validation(format!(
                "Assigned clinician {user_id} does not exist"
            )))
        })?;

    let eligible = user
        .role
        .parse::<Role>()
        .is_ok_and(Role::can_be_assigned_clinician);
    if !eligible {
        return Err(AppError::Core(CoreError::Validation(format!(
            "User {} ({}) cannot be assigned as clinician",
            user.id, user.role
        ))));
    }
    Ok(())
}
