//! Page requests and the cacheability rule.

use std::num::NonZeroUsize;

use crate::model::search::is_blank;
use crate::model::SearchQuery;

/// One page load: where to start and how much to fetch.
///
/// Only built through [`initial`](Self::initial) and [`after`](Self::after),
/// so an initial request never carries a cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// Date of the last episode already loaded; `None` starts from the newest.
    cursor: Option<String>,

    /// Maximum episodes to fetch.
    page_size: NonZeroUsize,

    /// Whether this is the session's first page (drives the refresh channel).
    is_initial: bool,
}

impl PageRequest {
    /// The first page of a session.
    pub fn initial(page_size: NonZeroUsize) -> Self {
        Self {
            cursor: None,
            page_size,
            is_initial: true,
        }
    }

    /// The page following the episode keyed `key`.
    pub fn after(key: impl Into<String>, page_size: NonZeroUsize) -> Self {
        Self {
            cursor: Some(key.into()),
            page_size,
            is_initial: false,
        }
    }

    pub fn cursor(&self) -> Option<&str> {
        self.cursor.as_deref()
    }

    pub fn page_size(&self) -> NonZeroUsize {
        self.page_size
    }

    pub fn is_initial(&self) -> bool {
        self.is_initial
    }

    /// Whether the fetched page may be written to the cache.
    ///
    /// Only the first page of an uncategorized query is cached. The search
    /// term is deliberately not consulted, and neither is `is_initial`: a
    /// continuation with a blank cursor counts as a first page.
    pub fn is_cacheable(&self, query: &SearchQuery) -> bool {
        is_blank(self.cursor.as_deref()) && !query.has_category()
    }
}
