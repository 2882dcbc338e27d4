//! Observable load status.
//!
//! Each paging session exposes two [`StateChannel`]s. The controller is the
//! only writer; any number of readers can look at the current value or wait
//! for changes. Readers only ever see the latest value, so intermediate states
//! published while nobody was looking are skipped.

use std::fmt;

use serde::Serialize;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

/// Status of the most recent load on a channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "detail", rename_all = "snake_case")]
pub enum LoadState {
    /// No load attempted yet.
    Idle,
    /// A fetch is outstanding.
    Loading,
    /// A page was delivered; carries its item count.
    Loaded(usize),
    /// The load failed and nothing was delivered.
    Error(String),
}

impl LoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    /// Whether the state is terminal for a load cycle.
    pub fn is_settled(&self) -> bool {
        matches!(self, LoadState::Loaded(_) | LoadState::Error(_))
    }
}

impl fmt::Display for LoadState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadState::Idle => write!(f, "idle"),
            LoadState::Loading => write!(f, "loading"),
            LoadState::Loaded(count) => write!(f, "loaded ({count})"),
            LoadState::Error(message) => write!(f, "error: {message}"),
        }
    }
}

/// Single-writer, multi-reader, last-value-wins [`LoadState`] holder.
#[derive(Debug)]
pub struct StateChannel {
    tx: watch::Sender<LoadState>,
}

impl Default for StateChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl StateChannel {
    /// Create a channel starting at [`LoadState::Idle`].
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(LoadState::Idle);
        Self { tx }
    }

    /// Snapshot of the current state.
    pub fn current(&self) -> LoadState {
        self.tx.borrow().clone()
    }

    /// Receiver that is notified on every publish.
    pub fn subscribe(&self) -> watch::Receiver<LoadState> {
        self.tx.subscribe()
    }

    /// Stream of states, starting with the current one.
    pub fn stream(&self) -> WatchStream<LoadState> {
        WatchStream::new(self.subscribe())
    }

    /// Replace the current state and wake subscribers.
    ///
    /// Succeeds even with no subscribers, so late readers still see it.
    pub(crate) fn publish(&self, state: LoadState) {
        self.tx.send_replace(state);
    }
}
