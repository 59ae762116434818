//! Shared query parameter types for API handlers.

use serde::Deserialize;
use telecare_core::admin::ModelAdmin;
use telecare_db::models::list::ListQuery;

use crate::error::AppResult;

/// Generic admin list parameters (`?q=&ordering=&limit=&offset=`).
///
/// Entity-specific filters are deserialized separately from the same query
/// string; unknown keys are ignored by both.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub q: Option<String>,
    pub ordering: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl ListParams {
    /// Validate `ordering` against the entity's registration and clamp the
    /// page window.
    pub fn resolve(&self, admin: &ModelAdmin) -> AppResult<ListQuery> {
        let ordering = admin.resolve_ordering(self.ordering.as_deref())?;
        Ok(ListQuery::new(
            self.q.as_deref(),
            ordering,
            self.limit,
            self.offset,
        ))
    }
}
