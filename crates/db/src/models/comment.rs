//! Comment model and DTOs.

use std::fmt;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use telecare_core::types::{DbId, Timestamp};

/// A comment row from the `comments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Comment {
    pub id: DbId,
    pub sensor_frame_id: DbId,
    pub user_id: DbId,
    pub body: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl fmt::Display for Comment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Comment(user_id={}, sensor_frame_id={})",
            self.user_id, self.sensor_frame_id
        )
    }
}

/// Comment joined with its author, as shown in the admin list.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CommentListRow {
    pub id: DbId,
    pub user_id: DbId,
    pub username: String,
    pub sensor_frame_id: DbId,
    pub body: String,
    pub created_at: Timestamp,
}

#[derive(Debug, Deserialize)]
pub struct CreateComment {
    pub sensor_frame_id: DbId,
    pub user_id: DbId,
    pub body: String,
}
