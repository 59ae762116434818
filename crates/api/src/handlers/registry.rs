//! Handler for the admin console registry.

use axum::Json;
use telecare_core::admin::{ModelAdmin, REGISTRY};

use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;

/// GET /api/v1/admin/registry
///
/// Per-entity list/search/filter/ordering configuration for the console.
pub async fn get_registry(
    RequireAdmin(_admin): RequireAdmin,
) -> Json<DataResponse<&'static [ModelAdmin]>> {
    Json(DataResponse { data: REGISTRY })
}
