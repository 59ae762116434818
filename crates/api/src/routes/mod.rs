pub mod admin;
pub mod auth;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /auth/login                               login (public)
/// /auth/refresh                             refresh (public)
/// /auth/logout                              logout (requires auth)
/// /auth/me                                  current user (requires auth)
///
/// /admin/registry                           console registry
/// /admin/users                              list, create
/// /admin/users/{id}                         get, update, delete
/// /admin/users/{id}/reset-password          reset password
/// /admin/clinicians                         list, create
/// /admin/clinicians/{id}                    get, update, delete
/// /admin/patients                           list, create
/// /admin/patients/clinician-choices         eligible clinicians
/// /admin/patients/{id}                      get, update, delete
/// /admin/sensor-frames                      list, create
/// /admin/sensor-frames/{id}                 get, update, delete
/// /admin/alerts                             list, create
/// /admin/alerts/{id}                        get, delete
/// /admin/comments                           list, create
/// /admin/comments/{id}                      get, delete
/// ```
///
/// Every `/admin` route requires the `admin` role.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/admin", admin::router())
}
