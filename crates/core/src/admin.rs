//! Admin console registry.
//!
//! Static per-entity configuration for the back-office list views: which
//! columns are displayed, which fields the `?q=` search spans, which filters
//! are offered, and the default ordering. List endpoints validate their
//! `?ordering=` parameter against this registry and the registry itself is
//! served to the console so it can build its tables.

use serde::Serialize;

use crate::error::CoreError;

/// List/search/filter configuration for one entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ModelAdmin {
    /// Route segment and registry key (e.g. `"sensor-frames"`).
    pub entity: &'static str,
    /// Singular display name.
    pub label: &'static str,
    pub list_display: &'static [&'static str],
    /// Search spans these fields; `__` traverses a relation.
    pub search_fields: &'static [&'static str],
    pub list_filter: &'static [&'static str],
    /// Default ordering; a leading `-` means descending.
    pub ordering: &'static [&'static str],
}

pub const USER_ADMIN: ModelAdmin = ModelAdmin {
    entity: "users",
    label: "User",
    list_display: &["id", "email", "username", "role", "is_active", "created_at"],
    search_fields: &["username", "email", "full_name"],
    list_filter: &["role", "is_active"],
    ordering: &["-created_at"],
};

pub const CLINICIAN_ADMIN: ModelAdmin = ModelAdmin {
    entity: "clinicians",
    label: "Clinician",
    list_display: &["id", "user", "specialty"],
    search_fields: &["user__username", "user__email", "specialty"],
    list_filter: &[],
    ordering: &["id"],
};

pub const PATIENT_ADMIN: ModelAdmin = ModelAdmin {
    entity: "patients",
    label: "Patient",
    list_display: &["id", "user", "assigned_clinician", "date_of_birth"],
    search_fields: &["user__username", "user__email"],
    list_filter: &["assigned_clinician", "risk_category"],
    ordering: &["id"],
};

pub const SENSOR_FRAME_ADMIN: ModelAdmin = ModelAdmin {
    entity: "sensor-frames",
    label: "Sensor frame",
    list_display: &["id", "patient", "timestamp", "created_at"],
    search_fields: &["patient__user__username", "patient__user__email"],
    list_filter: &["patient"],
    ordering: &["-timestamp"],
};

pub const ALERT_ADMIN: ModelAdmin = ModelAdmin {
    entity: "alerts",
    label: "Alert",
    list_display: &["id", "patient", "alert_type", "severity", "created_at"],
    search_fields: &["patient__user__username", "patient__user__email"],
    list_filter: &["severity", "alert_type"],
    ordering: &["-created_at"],
};

pub const COMMENT_ADMIN: ModelAdmin = ModelAdmin {
    entity: "comments",
    label: "Comment",
    list_display: &["id", "user", "sensor_frame", "created_at"],
    search_fields: &["user__username", "user__email", "body"],
    list_filter: &[],
    ordering: &["-created_at"],
};

/// Every registered entity, in console menu order.
pub const REGISTRY: &[ModelAdmin] = &[
    USER_ADMIN,
    CLINICIAN_ADMIN,
    PATIENT_ADMIN,
    SENSOR_FRAME_ADMIN,
    ALERT_ADMIN,
    COMMENT_ADMIN,
];

/// Look up a registration by its entity key.
pub fn find(entity: &str) -> Option<&'static ModelAdmin> {
    REGISTRY.iter().find(|m| m.entity == entity)
}

/// A resolved sort key: one of the entity's `list_display` columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ordering {
    pub field: &'static str,
    pub descending: bool,
}

impl Ordering {
    /// SQL direction keyword.
    pub fn direction(&self) -> &'static str {
        if self.descending {
            "DESC"
        } else {
            "ASC"
        }
    }
}

impl ModelAdmin {
    /// Resolve a requested `?ordering=` value (e.g. `-created_at`).
    ///
    /// `None` or blank yields the registered default ordering. Only
    /// `list_display` columns are sortable.
    pub fn resolve_ordering(&self, requested: Option<&str>) -> Result<Ordering, CoreError> {
        let raw = match requested.map(str::trim) {
            Some(r) if !r.is_empty() => r,
            _ => self.ordering.first().copied().unwrap_or("id"),
        };
        let (name, descending) = match raw.strip_prefix('-') {
            Some(rest) => (rest, true),
            None => (raw, false),
        };
        let field = self
            .list_display
            .iter()
            .copied()
            .find(|f| *f == name)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Cannot order {} by '{name}'. Sortable fields: {}",
                    self.entity,
                    self.list_display.join(", ")
                ))
            })?;
        Ok(Ordering { field, descending })
    }

    pub fn has_filter(&self, name: &str) -> bool {
        self.list_filter.contains(&name)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
