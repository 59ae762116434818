//! Repository for the `comments` table.

use sqlx::PgPool;
use telecare_core::admin::Ordering;
use telecare_core::types::DbId;

use crate::models::comment::{Comment, CommentListRow, CreateComment};
use crate::models::list::{ListQuery, Page};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, sensor_frame_id, user_id, body, created_at, updated_at";

const LIST_COLUMNS: &str = "c.id, c.user_id, u.username, c.sensor_frame_id, c.body, c.created_at";

/// `$1` search pattern.
const LIST_WHERE: &str = "($1::TEXT IS NULL
                             OR u.username ILIKE $1
                             OR u.email ILIKE $1
                             OR c.body ILIKE $1)";

/// Provides CRUD operations for comments on sensor frames.
pub struct CommentRepo;

impl CommentRepo {
    pub async fn create(pool: &PgPool, input: &CreateComment) -> Result<Comment, sqlx::Error> {
        let query = format!(
            "INSERT INTO comments (sensor_frame_id, user_id, body)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(input.sensor_frame_id)
            .bind(input.user_id)
            .bind(&input.body)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Comment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM comments WHERE id = $1");
        sqlx::query_as::<_, Comment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Admin list: search over author username/email and the comment body.
    pub async fn list(
        pool: &PgPool,
        params: &ListQuery,
    ) -> Result<Page<CommentListRow>, sqlx::Error> {
        let order = order_column(&params.ordering);
        let dir = params.ordering.direction();
        let query = format!(
            "SELECT {LIST_COLUMNS}
             FROM comments c
             JOIN users u ON u.id = c.user_id
             WHERE {LIST_WHERE}
             ORDER BY {order} {dir}, c.id DESC
             LIMIT $2 OFFSET $3"
        );
        let items = sqlx::query_as::<_, CommentListRow>(&query)
            .bind(&params.search)
            .bind(params.limit)
            .bind(params.offset)
            .fetch_all(pool)
            .await?;

        let count_query = format!(
            "SELECT COUNT(*) FROM comments c
             JOIN users u ON u.id = c.user_id
             WHERE {LIST_WHERE}"
        );
        let total = sqlx::query_scalar::<_, i64>(&count_query)
            .bind(&params.search)
            .fetch_one(pool)
            .await?;

        Ok(Page { items, total })
    }

    /// Comments on one frame, newest first.
    pub async fn list_by_sensor_frame(
        pool: &PgPool,
        sensor_frame_id: DbId,
    ) -> Result<Vec<Comment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM comments
             WHERE sensor_frame_id = $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(sensor_frame_id)
            .fetch_all(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

fn order_column(ordering: &Ordering) -> &'static str {
    match ordering.field {
        "user" => "u.username",
        "sensor_frame" => "c.sensor_frame_id",
        "created_at" => "c.created_at",
        _ => "c.id",
    }
}
