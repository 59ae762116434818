//! Handlers for `/admin/comments`.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use telecare_core::admin::COMMENT_ADMIN;
use telecare_core::error::CoreError;
use telecare_core::types::DbId;
use telecare_core::validation::validate_comment_body;
use telecare_db::models::comment::{Comment, CommentListRow, CreateComment};
use telecare_db::repositories::CommentRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::query::ListParams;
use crate::response::{DataResponse, ListResponse};
use crate::state::AppState;

/// Request body for `POST /admin/comments`.
#[derive(Debug, Deserialize)]
pub struct CreateCommentRequest {
    pub sensor_frame_id: DbId,
    /// Author; defaults to the calling admin.
    pub user_id: Option<DbId>,
    pub body: String,
}

/// GET /api/v1/admin/comments
pub async fn list_comments(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(params): Query<ListParams>,
) -> AppResult<Json<ListResponse<CommentListRow>>> {
    let query = params.resolve(&COMMENT_ADMIN)?;
    let page = CommentRepo::list(&state.pool, &query).await?;
    Ok(Json(ListResponse::from_page(page, &query)))
}

/// POST /api/v1/admin/comments
pub async fn create_comment(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<CreateCommentRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Comment>>)> {
    validate_comment_body(&input.body)?;

    let dto = CreateComment {
        sensor_frame_id: input.sensor_frame_id,
        user_id: input.user_id.unwrap_or(admin.user_id),
        body: input.body,
    };
    let comment = CommentRepo::create(&state.pool, &dto).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: comment })))
}

/// GET /api/v1/admin/comments/{id}
pub async fn get_comment(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Comment>>> {
    let comment = CommentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Comment",
            id,
        }))?;
    Ok(Json(DataResponse { data: comment }))
}

/// DELETE /api/v1/admin/comments/{id}
pub async fn delete_comment(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if CommentRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Comment",
            id,
        }))
    }
}
