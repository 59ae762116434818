//! Handlers for `/admin/sensor-frames`.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use telecare_core::admin::SENSOR_FRAME_ADMIN;
use telecare_core::error::CoreError;
use telecare_core::telemetry::validate_frame_payload;
use telecare_core::types::DbId;
use telecare_db::models::sensor_frame::{
    CreateSensorFrame, SensorFrame, SensorFrameFilter, SensorFrameListRow, UpdateSensorFrame,
};
use telecare_db::repositories::SensorFrameRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::query::ListParams;
use crate::response::{DataResponse, ListResponse};
use crate::state::AppState;

/// GET /api/v1/admin/sensor-frames
///
/// Newest reading first by default; payloads are omitted from the list.
pub async fn list_sensor_frames(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(params): Query<ListParams>,
    Query(filter): Query<SensorFrameFilter>,
) -> AppResult<Json<ListResponse<SensorFrameListRow>>> {
    let query = params.resolve(&SENSOR_FRAME_ADMIN)?;
    let page = SensorFrameRepo::list(&state.pool, &filter, &query).await?;
    Ok(Json(ListResponse::from_page(page, &query)))
}

/// POST /api/v1/admin/sensor-frames
pub async fn create_sensor_frame(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<CreateSensorFrame>,
) -> AppResult<(StatusCode, Json<DataResponse<SensorFrame>>)> {
    validate_frame_payload(&input.data)?;
    let frame = SensorFrameRepo::create(&state.pool, &input).await?;
    tracing::debug!(frame_id = frame.id, patient_id = frame.patient_id, "Sensor frame stored");
    Ok((StatusCode::CREATED, Json(DataResponse { data: frame })))
}

/// GET /api/v1/admin/sensor-frames/{id}
pub async fn get_sensor_frame(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<SensorFrame>>> {
    let frame = SensorFrameRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "SensorFrame",
            id,
        }))?;
    Ok(Json(DataResponse { data: frame }))
}

/// PUT /api/v1/admin/sensor-frames/{id}
pub async fn update_sensor_frame(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateSensorFrame>,
) -> AppResult<Json<DataResponse<SensorFrame>>> {
    if let Some(data) = &input.data {
        validate_frame_payload(data)?;
    }
    let frame = SensorFrameRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "SensorFrame",
            id,
        }))?;
    Ok(Json(DataResponse { data: frame }))
}

/// DELETE /api/v1/admin/sensor-frames/{id}
///
/// Cascades to the frame's alerts and comments.
pub async fn delete_sensor_frame(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if SensorFrameRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "SensorFrame",
            id,
        }))
    }
}
