//! Search filters applied to a paging session.

use serde::{Deserialize, Serialize};

/// Query parameters narrowing the remote result set.
///
/// A session serves exactly one query for its whole lifetime.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Free-text search term.
    pub search_term: Option<String>,

    /// Category to restrict results to.
    pub category_id: Option<String>,
}

impl SearchQuery {
    /// The unfiltered query (every episode).
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_search_term(mut self, term: impl Into<String>) -> Self {
        self.search_term = Some(term.into());
        self
    }

    pub fn with_category(mut self, category_id: impl Into<String>) -> Self {
        self.category_id = Some(category_id.into());
        self
    }

    /// Whether the query restricts results to a category.
    pub fn has_category(&self) -> bool {
        !is_blank(self.category_id.as_deref())
    }
}

/// True for `None`, `""`, or whitespace-only strings.
pub fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}
