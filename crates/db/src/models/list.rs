//! Shared admin list query parameters and result page.

use serde::Serialize;
use telecare_core::admin::Ordering;
use telecare_core::search::{clamp_limit, clamp_offset, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};

/// Search, ordering, and pagination for an admin list query.
///
/// Build with [`ListQuery::new`] so that the limit and offset are clamped and
/// the search term is already an escaped `ILIKE` pattern.
#[derive(Debug, Clone)]
pub struct ListQuery {
    /// `ILIKE` pattern (`%term%`), or `None` to skip searching.
    pub search: Option<String>,
    pub ordering: Ordering,
    pub limit: i64,
    pub offset: i64,
}

impl ListQuery {
    pub fn new(q: Option<&str>, ordering: Ordering, limit: Option<i64>, offset: Option<i64>) -> Self {
        Self {
            search: telecare_core::search::ilike_pattern(q),
            ordering,
            limit: clamp_limit(limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT),
            offset: clamp_offset(offset),
        }
    }
}

/// One page of admin list results plus the unpaginated match count.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
}
