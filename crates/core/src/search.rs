//! Pagination and free-text search helpers for admin list queries.

/// Default number of rows per admin list page.
pub const DEFAULT_LIST_LIMIT: i64 = 50;

/// Maximum number of rows per admin list page.
pub const MAX_LIST_LIMIT: i64 = 500;

/// Clamp a user-provided limit to `[1, max]`, falling back to `default`.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

/// Clamp a user-provided offset to non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}

/// Turn a raw `?q=` value into an `ILIKE` substring pattern.
///
/// Returns `None` for a missing or blank term so the caller can skip the
/// search predicate entirely. `%`, `_` and `\` in the term are escaped so they
/// match literally (PostgreSQL's default `ILIKE` escape character is `\`).
pub fn ilike_pattern(term: Option<&str>) -> Option<String> {
    let term = term?.trim();
    if term.is_empty() {
        return None;
    }
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    Some(escaped)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_defaults_and_clamps() {
        assert_eq!(clamp_limit(None, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT), 50);
        assert_eq!(clamp_limit(Some(0), DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT), 1);
        assert_eq!(clamp_limit(Some(-5), DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT), 1);
        assert_eq!(clamp_limit(Some(10_000), DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT), 500);
        assert_eq!(clamp_limit(Some(25), DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT), 25);
    }

    #[test]
    fn offset_never_negative() {
        assert_eq!(clamp_offset(None), 0);
        assert_eq!(clamp_offset(Some(-1)), 0);
        assert_eq!(clamp_offset(Some(40)), 40);
    }

    #[test]
    fn blank_terms_produce_no_pattern() {
        assert_eq!(ilike_pattern(None), None);
        assert_eq!(ilike_pattern(Some("")), None);
        assert_eq!(ilike_pattern(Some("   ")), None);
    }

    #[test]
    fn pattern_wraps_trimmed_term() {
        assert_eq!(ilike_pattern(Some("  demo ")).as_deref(), Some("%demo%"));
    }

    #[test]
    fn wildcards_are_escaped() {
        assert_eq!(
            ilike_pattern(Some("50%_a\\b")).as_deref(),
            Some("%50\\%\\_a\\\\b%")
        );
    }
}
