//! Alert model and DTOs.

use std::fmt;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use telecare_core::types::{DbId, Timestamp};

/// An alert row from the `alerts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Alert {
    pub id: DbId,
    pub patient_id: DbId,
    pub sensor_frame_id: DbId,
    pub alert_type: String,
    pub severity: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Alert(patient_id={}, type={}, severity={})",
            self.patient_id, self.alert_type, self.severity
        )
    }
}

/// Alert joined with the patient's user, as shown in the admin list.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AlertListRow {
    pub id: DbId,
    pub patient_id: DbId,
    pub patient_username: String,
    pub sensor_frame_id: DbId,
    pub alert_type: String,
    pub severity: String,
    pub created_at: Timestamp,
}

#[derive(Debug, Deserialize)]
pub struct CreateAlert {
    pub patient_id: DbId,
    pub sensor_frame_id: DbId,
    pub alert_type: String,
    pub severity: String,
}

/// Filters offered by the alerts list view.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AlertFilter {
    pub severity: Option<String>,
    pub alert_type: Option<String>,
}
