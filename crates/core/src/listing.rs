//! Free-text and status filters for list views.
//!
//! Both inputs are trimmed and an empty value means "no filter". Filters are
//! AND-combined by the repositories on top of the caller's scope; the text
//! term is OR-ed across each entity's fixed search columns.

use serde::Deserialize;

use crate::workflow::WorkflowStatus;

/// Raw list query-string parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ListParams {
    /// Free-text search term.
    pub q: Option<String>,
    /// Exact status filter.
    pub status: Option<String>,
}

/// Status filter outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter<S> {
    /// No status given.
    Any,
    /// Exactly this status.
    Is(S),
    /// A value no status is stored as; the list is empty.
    Unmatched,
}

impl<S> Default for StatusFilter<S> {
    fn default() -> Self {
        Self::Any
    }
}

/// Parsed list filters for a transactional record type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery<S> {
    /// Search term, trimmed and non-empty.
    pub term: Option<String>,
    /// Exact status match.
    pub status: StatusFilter<S>,
}

impl<S> Default for ListQuery<S> {
    fn default() -> Self {
        Self {
            term: None,
            status: StatusFilter::Any,
        }
    }
}

impl<S: WorkflowStatus> ListQuery<S> {
    /// Parses raw `q` and `status` values.
    ///
    /// The status is compared exactly against the stored names, so `pending`
    /// or an unknown value yields [`StatusFilter::Unmatched`].
    #[must_use]
    pub fn parse(q: Option<&str>, status: Option<&str>) -> Self {
        let status = match normalize_term(status) {
            None => StatusFilter::Any,
            Some(raw) => S::ALL
                .iter()
                .copied()
                .find(|s| s.as_str() == raw)
                .map_or(StatusFilter::Unmatched, StatusFilter::Is),
        };
        Self {
            term: normalize_term(q),
            status,
        }
    }

    /// Parses query-string parameters.
    #[must_use]
    pub fn from_params(params: &ListParams) -> Self {
        Self::parse(params.q.as_deref(), params.status.as_deref())
    }

    /// Returns the lower-cased, escaped `LIKE` pattern for the search term.
    #[must_use]
    pub fn term_pattern(&self) -> Option<String> {
        self.term.as_deref().map(like_pattern)
    }
}

/// Trims a raw filter value, mapping blank input to `None`.
#[must_use]
pub fn normalize_term(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|value| !value.is_empty())
        .map(ToString::to_string)
}

/// Escape character used in every `LIKE` pattern.
pub const LIKE_ESCAPE: char = '\\';

/// Builds a case-insensitive substring pattern, to be matched against
/// `lower(column)` with [`LIKE_ESCAPE`]. `%` and `_` in the term match
/// literally.
#[must_use]
pub fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.to_lowercase().chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::{InquiryStatus, RequestStatus};
    use rstest::rstest;

    #[rstest]
    #[case(None, None)]
    #[case(Some(""), None)]
    #[case(Some("   "), None)]
    #[case(Some(" TOR "), Some("TOR"))]
    fn test_normalize_term(#[case] raw: Option<&str>, #[case] expected: Option<&str>) {
        assert_eq!(normalize_term(raw).as_deref(), expected);
    }

    #[rstest]
    #[case("Transcript", "%transcript%")]
    #[case("%", "%\\%%")]
    #[case("j_b", "%j\\_b%")]
    #[case("a\\b", "%a\\\\b%")]
    fn test_like_pattern_escapes_wildcards(#[case] term: &str, #[case] expected: &str) {
        assert_eq!(like_pattern(term), expected);
    }

    #[test]
    fn test_parse_both_filters() {
        let query = ListQuery::<RequestStatus>::parse(Some(" Transcript "), Some(" APPROVED "));
        assert_eq!(query.term.as_deref(), Some("Transcript"));
        assert_eq!(query.status, StatusFilter::Is(RequestStatus::Approved));
        assert_eq!(query.term_pattern().as_deref(), Some("%transcript%"));
    }

    #[test]
    fn test_blank_filters_are_absent() {
        let query = ListQuery::<InquiryStatus>::parse(Some(""), Some("  "));
        assert_eq!(query.term_pattern(), None);
        assert_eq!(query, ListQuery::default());
    }

    #[rstest]
    #[case::other_kind("PENDING")]
    #[case::lower_case("open")]
    #[case::unknown("LOST")]
    fn test_status_must_match_exactly(#[case] raw: &str) {
        let query = ListQuery::<InquiryStatus>::parse(None, Some(raw));
        assert_eq!(query.status, StatusFilter::Unmatched);
    }

    #[test]
    fn test_from_params() {
        let params = ListParams {
            q: Some("dr2603".to_string()),
            status: None,
        };
        let query = ListQuery::<RequestStatus>::from_params(&params);
        assert_eq!(query.term.as_deref(), Some("dr2603"));
        assert_eq!(query.status, StatusFilter::Any);
    }
}
