//! Clinician profile model and DTOs.

use std::fmt;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use telecare_core::types::{DbId, Timestamp};

/// A clinician profile row from the `clinicians` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Clinician {
    pub id: DbId,
    pub user_id: DbId,
    pub specialty: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Clinician row joined with its user, as shown in the admin list.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ClinicianListRow {
    pub id: DbId,
    pub user_id: DbId,
    pub username: String,
    pub email: String,
    pub specialty: String,
    pub created_at: Timestamp,
}

impl fmt::Display for ClinicianListRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Clinician({})", self.username)
    }
}

/// DTO for creating a clinician profile. Blank specialty when `None`.
#[derive(Debug, Deserialize)]
pub struct CreateClinician {
    pub user_id: DbId,
    pub specialty: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateClinician {
    pub specialty: Option<String>,
}
