//! The remote-feed contract used by the paging controller.

use async_trait::async_trait;
use thiserror::Error;

use crate::model::Episode;

/// Message published when a failure carries no usable text.
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// Why a page could not be fetched from the remote feed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchFailure {
    /// The server answered with a non-success status.
    #[error("HTTP {status}: {}", or_unknown(.message))]
    Status { status: u16, message: String },

    /// Connection refused, DNS failure, timeout.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The response body was not a list of episodes.
    #[error("Invalid response body: {0}")]
    Decode(String),
}

impl FetchFailure {
    /// Human-readable message surfaced through `LoadState::Error`.
    ///
    /// For status failures this is the response body as-is, falling back to
    /// [`UNKNOWN_ERROR`] when the body is empty.
    pub fn message(&self) -> String {
        let message = match self {
            FetchFailure::Status { message, .. } => message,
            FetchFailure::Transport(message) | FetchFailure::Decode(message) => message,
        };
        or_unknown(message).to_string()
    }
}

fn or_unknown(message: &str) -> &str {
    if message.trim().is_empty() {
        UNKNOWN_ERROR
    } else {
        message
    }
}

/// A source of episode pages.
///
/// Implementations are stateless request/response clients: each call fetches
/// one page, newest first, of at most `page_size` episodes dated strictly
/// before `cursor` (or the newest page when `cursor` is `None`).
#[async_trait]
pub trait RemoteSource: Send + Sync {
    async fn fetch(
        &self,
        search_term: Option<&str>,
        category_id: Option<&str>,
        cursor: Option<&str>,
        page_size: usize,
    ) -> Result<Vec<Episode>, FetchFailure>;
}
