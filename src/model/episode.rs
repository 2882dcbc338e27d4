//! Episode records as served by the remote feed and stored in the cache.
//!
//! Episodes are ordered newest-first by their `date` field. The date doubles
//! as the pagination cursor: the next page is requested "created before" the
//! date of the last episode seen.

use serde::{Deserialize, Serialize};

/// A single podcast episode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Episode {
    /// Remote identifier.
    #[serde(alias = "_id")]
    pub id: String,

    /// Publication timestamp (ISO-8601). Absent on some legacy records.
    pub date: Option<String>,

    /// Display title.
    pub title: Option<String>,

    /// Short summary shown in list rows.
    pub excerpt: Option<String>,

    /// Full show notes.
    pub content: Option<String>,

    /// Canonical web page for the episode.
    pub link: Option<String>,

    /// Audio file URL.
    pub mp3: Option<String>,

    /// Cover art URL.
    pub thumbnail_url: Option<String>,

    /// Category IDs the episode is filed under.
    pub categories: Vec<String>,
}

impl Episode {
    /// Create an episode with just an ID and a date.
    pub fn new(id: impl Into<String>, date: Option<&str>) -> Self {
        Self {
            id: id.into(),
            date: date.map(str::to_string),
            ..Default::default()
        }
    }

    /// Pagination key for this episode: its date, or `""` when it has none.
    pub fn key(&self) -> &str {
        self.date.as_deref().unwrap_or("")
    }
}
