//! Patient profile model and DTOs.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use telecare_core::types::{DbId, Timestamp};

/// A patient profile row from the `patients` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Patient {
    pub id: DbId,
    pub user_id: DbId,
    /// A user with the `clinician` role; cleared when that user is deleted.
    pub assigned_clinician_id: Option<DbId>,
    pub date_of_birth: Option<NaiveDate>,
    pub medical_notes: Option<String>,
    pub risk_category: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Patient row joined with its user and assigned clinician, as shown in the
/// admin list.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PatientListRow {
    pub id: DbId,
    pub user_id: DbId,
    pub username: String,
    pub email: String,
    pub assigned_clinician_id: Option<DbId>,
    pub assigned_clinician_username: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub risk_category: Option<String>,
    pub created_at: Timestamp,
}

impl fmt::Display for PatientListRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Patient({})", self.username)
    }
}

#[derive(Debug, Deserialize)]
pub struct CreatePatient {
    pub user_id: DbId,
    pub assigned_clinician_id: Option<DbId>,
    pub date_of_birth: Option<NaiveDate>,
    pub medical_notes: Option<String>,
    pub risk_category: Option<String>,
}

/// DTO for partially updating a patient.
///
/// The outer `Option` selects whether a field is written; `Some(None)`
/// clears it. The clinician goes through `PatientRepo::set_assigned_clinician`.
#[derive(Debug, Default, Deserialize)]
pub struct UpdatePatient {
    pub date_of_birth: Option<Option<NaiveDate>>,
    pub medical_notes: Option<Option<String>>,
    pub risk_category: Option<Option<String>>,
}

/// Filters offered by the patients list view. Query keys are the registered
/// filter names.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PatientFilter {
    #[serde(rename = "assigned_clinician")]
    pub assigned_clinician_id: Option<DbId>,
    pub risk_category: Option<String>,
}
