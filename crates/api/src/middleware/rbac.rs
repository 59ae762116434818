//! Role-based access control extractors.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use telecare_core::error::CoreError;
use telecare_core::roles::Role;
use telecare_db::repositories::UserRepo;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the `admin` role: 401 without a valid token, 403 for any other
/// role.
///
/// The role and active flag are re-read from `users`, so a demoted or
/// deactivated admin loses access before their access token expires.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(admin): RequireAdmin) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth = AuthUser::from_request_parts(parts, state).await?;
        let user = UserRepo::find_by_id(&state.pool, auth.user_id)
            .await?
            .filter(|u| u.is_active)
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized("Account is no longer active".into()))
            })?;

        let role = user.role.parse::<Role>().ok();
        if role != Some(Role::Admin) {
            tracing::debug!(user_id = user.id, role = %user.role, "Admin access denied");
            return Err(AppError::Core(CoreError::Forbidden(
                "Admin role required".into(),
            )));
        }
        Ok(RequireAdmin(AuthUser {
            user_id: user.id,
            role: Role::Admin,
        }))
    }
}
