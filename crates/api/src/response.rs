//! Shared response envelope types for API handlers.
//!
//! Single-item responses use a `{ "data": ... }` envelope; admin list
//! responses add the unpaginated total and the effective page window.

use serde::Serialize;
use telecare_db::models::list::{ListQuery, Page};

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// `{ "data": [...], "total": n, "limit": l, "offset": o }` list envelope.
#[derive(Debug, Serialize)]
pub struct ListResponse<T: Serialize> {
    pub data: Vec<T>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}

impl<T: Serialize> ListResponse<T> {
    /// Wrap a repository page, echoing the clamped limit/offset actually used.
    pub fn from_page(page: Page<T>, params: &ListQuery) -> Self {
        Self {
            data: page.items,
            total: page.total,
            limit: params.limit,
            offset: params.offset,
        }
    }
}
