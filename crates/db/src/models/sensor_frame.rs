//! Sensor frame (telemetry) model and DTOs.

use std::fmt;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use telecare_core::types::{DbId, Timestamp};

/// A telemetry row from the `sensor_frames` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SensorFrame {
    pub id: DbId,
    pub patient_id: DbId,
    /// When the readings were taken (not when the row was written).
    pub timestamp: Timestamp,
    /// Opaque sensor payload.
    pub data: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl fmt::Display for SensorFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SensorFrame(patient_id={}, ts={})",
            self.patient_id, self.timestamp
        )
    }
}

/// Sensor frame joined with the patient's user, as shown in the admin list.
/// The payload is omitted.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SensorFrameListRow {
    pub id: DbId,
    pub patient_id: DbId,
    pub patient_username: String,
    pub timestamp: Timestamp,
    pub created_at: Timestamp,
}

#[derive(Debug, Deserialize)]
pub struct CreateSensorFrame {
    pub patient_id: DbId,
    pub timestamp: Timestamp,
    pub data: serde_json::Value,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateSensorFrame {
    pub timestamp: Option<Timestamp>,
    pub data: Option<serde_json::Value>,
}

/// Filters offered by the sensor frames list view (`?patient=`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SensorFrameFilter {
    #[serde(rename = "patient")]
    pub patient_id: Option<DbId>,
}
