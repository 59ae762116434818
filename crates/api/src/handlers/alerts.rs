//! Handlers for `/admin/alerts`.
//!
//! Alerts are stored as given; nothing here derives them from telemetry.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use telecare_core::admin::ALERT_ADMIN;
use telecare_core::error::CoreError;
use telecare_core::types::DbId;
use telecare_core::validation::{validate_alert_type, validate_severity};
use telecare_db::models::alert::{Alert, AlertFilter, AlertListRow, CreateAlert};
use telecare_db::repositories::{AlertRepo, SensorFrameRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::query::ListParams;
use crate::response::{DataResponse, ListResponse};
use crate::state::AppState;

/// Request body for `POST /admin/alerts`.
#[derive(Debug, Deserialize)]
pub struct CreateAlertRequest {
    pub patient_id: DbId,
    pub sensor_frame_id: DbId,
    pub alert_type: String,
    pub severity: String,
}

/// GET /api/v1/admin/alerts
///
/// Filters: `severity`, `alert_type` (exact match).
pub async fn list_alerts(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(params): Query<ListParams>,
    Query(filter): Query<AlertFilter>,
) -> AppResult<Json<ListResponse<AlertListRow>>> {
    let query = params.resolve(&ALERT_ADMIN)?;
    let page = AlertRepo::list(&state.pool, &filter, &query).await?;
    Ok(Json(ListResponse::from_page(page, &query)))
}

/// POST /api/v1/admin/alerts
///
/// The referenced frame must exist and belong to `patient_id`.
pub async fn create_alert(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<CreateAlertRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Alert>>)> {
    let alert_type = input.alert_type.trim().to_string();
    let severity = input.severity.trim().to_string();
    validate_alert_type(&alert_type)?;
    validate_severity(&severity)?;

    let frame = SensorFrameRepo::find_by_id(&state.pool, input.sensor_frame_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Validation(format!(
                "Sensor frame {} does not exist",
                input.sensor_frame_id
            )))
        })?;
    if frame.patient_id != input.patient_id {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Sensor frame {} belongs to patient {}, not {}",
            frame.id, frame.patient_id, input.patient_id
        ))));
    }

    let dto = CreateAlert {
        patient_id: input.patient_id,
        sensor_frame_id: input.sensor_frame_id,
        alert_type,
        severity,
    };
    let alert = AlertRepo::create(&state.pool, &dto).await?;

    tracing::info!(
        alert_id = alert.id,
        patient_id = alert.patient_id,
        severity = %alert.severity,
        "Alert recorded"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: alert })))
}

/// GET /api/v1/admin/alerts/{id}
pub async fn get_alert(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Alert>>> {
    let alert = AlertRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Alert", id }))?;
    Ok(Json(DataResponse { data: alert }))
}

/// DELETE /api/v1/admin/alerts/{id}
pub async fn delete_alert(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if AlertRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "Alert", id }))
    }
}
