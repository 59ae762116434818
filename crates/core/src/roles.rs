//! User roles.
//!
//! These must match the CHECK constraint on `users.role` in
//! `20260301000002_create_users_table.sql`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_CLINICIAN: &str = "clinician";
pub const ROLE_PATIENT: &str = "patient";

/// All accepted role names, in display order.
pub const VALID_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_CLINICIAN, ROLE_PATIENT];

/// Role assigned to every user. New accounts default to [`Role::Patient`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Clinician,
    #[default]
    Patient,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => ROLE_ADMIN,
            Role::Clinician => ROLE_CLINICIAN,
            Role::Patient => ROLE_PATIENT,
        }
    }

    /// Human-readable label shown in the admin console choice list.
    pub fn label(self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Clinician => "Clinician",
            Role::Patient => "Patient",
        }
    }

    /// Whether a user with this role may be picked as a patient's assigned clinician.
    pub fn can_be_assigned_clinician(self) -> bool {
        self == Role::Clinician
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ROLE_ADMIN => Ok(Role::Admin),
            ROLE_CLINICIAN => Ok(Role::Clinician),
            ROLE_PATIENT => Ok(Role::Patient),
            other => Err(format!(
                "Invalid role '{other}'. Must be one of: {}",
                VALID_ROLES.join(", ")
            )),
        }
    }
}
