//! Handlers for `/admin/users`.
//!
//! All handlers require the `admin` role via [`RequireAdmin`].

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use telecare_core::admin::USER_ADMIN;
use telecare_core::error::CoreError;
use telecare_core::roles::Role;
use telecare_core::types::DbId;
use telecare_core::validation::{
    normalize_email, validate_email, validate_full_name, validate_username,
};
use telecare_db::models::session::RevokeReason;
use telecare_db::models::user::{CreateUser, UpdateUser, UserFilter, UserResponse};
use telecare_db::repositories::{SessionRepo, UserRepo};

use super::present;
use crate::auth::password::{hash_password, validate_password_strength, MIN_PASSWORD_LENGTH};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::query::ListParams;
use crate::response::{DataResponse, ListResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /admin/users`.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub full_name: Option<String>,
    /// Defaults to `patient`.
    pub role: Option<String>,
}

/// Request body for `PUT /admin/users/{id}`. `full_name: null` clears the
/// name.
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub full_name: Option<Option<String>>,
    pub role: Option<String>,
    pub is_active: Option<bool>,
}

/// Request body for `POST /admin/users/{id}/reset-password`.
#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub new_password: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/users
///
/// Search over username, email and full name; filter by `role` and
/// `is_active`.
pub async fn list_users(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(params): Query<ListParams>,
    Query(filter): Query<UserFilter>,
) -> AppResult<Json<ListResponse<UserResponse>>> {
    if let Some(role) = &filter.role {
        parse_role(role)?;
    }
    let query = params.resolve(&USER_ADMIN)?;
    let page = UserRepo::list(&state.pool, &filter, &query).await?;

    Ok(Json(ListResponse {
        data: page.items.iter().map(UserResponse::from).collect(),
        total: page.total,
        limit: query.limit,
        offset: query.offset,
    }))
}

/// POST /api/v1/admin/users
pub async fn create_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<UserResponse>>)> {
    let username = input.username.trim().to_string();
    validate_username(&username)?;
    let email = normalize_email(&input.email);
    validate_email(&email)?;
    if let Some(full_name) = &input.full_name {
        validate_full_name(full_name)?;
    }
    validate_password_strength(&input.password, MIN_PASSWORD_LENGTH)?;
    let role = input.role.as_deref().map(parse_role).transpose()?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let dto = CreateUser {
        username,
        email,
        full_name: input.full_name,
        password_hash,
        role: Some(role.unwrap_or_default().as_str().to_string()),
    };
    let user = UserRepo::create(&state.pool, &dto).await?;

    tracing::info!(user_id = user.id, role = %user.role, admin_id = admin.user_id, "User created");
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: UserResponse::from(&user),
        }),
    ))
}

/// GET /api/v1/admin/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;
    Ok(Json(DataResponse {
        data: UserResponse::from(&user),
    }))
}

/// PUT /api/v1/admin/users/{id}
///
/// Partial update of profile fields, role and active flag (not password).
/// Deactivating a user revokes their refresh sessions.
pub async fn update_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUserRequest>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let username = input.username.map(|u| u.trim().to_string());
    if let Some(username) = &username {
        validate_username(username)?;
    }
    let email = input.email.as_deref().map(normalize_email);
    if let Some(email) = &email {
        validate_email(email)?;
    }
    if let Some(Some(full_name)) = &input.full_name {
        validate_full_name(full_name)?;
    }
    let role = input.role.as_deref().map(parse_role).transpose()?;

    let dto = UpdateUser {
        username,
        email,
        full_name: input.full_name,
        role: role.map(|r| r.as_str().to_string()),
        is_active: input.is_active,
    };
    let user = UserRepo::update(&state.pool, id, &dto)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;

    if input.is_active == Some(false) {
        let revoked =
            SessionRepo::revoke_all_for_user(&state.pool, id, RevokeReason::Deactivated).await?;
        tracing::info!(user_id = id, admin_id = admin.user_id, revoked, "User deactivated");
    }

    Ok(Json(DataResponse {
        data: UserResponse::from(&user),
    }))
}

/// DELETE /api/v1/admin/users/{id}
///
/// Hard delete. Cascades to the user's profiles, sessions and comments.
pub async fn delete_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if id == admin.user_id {
        return Err(AppError::BadRequest(
            "Admins cannot delete their own account".into(),
        ));
    }
    if UserRepo::delete(&state.pool, id).await? {
        tracing::info!(user_id = id, admin_id = admin.user_id, "User deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "User", id }))
    }
}

/// POST /api/v1/admin/users/{id}/reset-password
///
/// Refresh tokens issued under the old password stop working.
pub async fn reset_password(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<ResetPasswordRequest>,
) -> AppResult<StatusCode> {
    validate_password_strength(&input.new_password, MIN_PASSWORD_LENGTH)?;

    let hashed = hash_password(&input.new_password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    if !UserRepo::update_password(&state.pool, id, &hashed).await? {
        return Err(AppError::Core(CoreError::NotFound { entity: "User", id }));
    }
    let revoked =
        SessionRepo::revoke_all_for_user(&state.pool, id, RevokeReason::PasswordReset).await?;
    tracing::info!(user_id = id, admin_id = admin.user_id, revoked, "Password reset");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse a role name, rejecting unknown values with 400.
fn parse_role(raw: &str) -> AppResult<Role> {
    raw.parse::<Role>()
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))
}
