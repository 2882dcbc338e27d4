//! Paging controller: loads one page at a time, reconciling the cache.
//!
//! The controller is the central coordinator of a paging session. For every
//! load it:
//! 1. Publishes `Loading` (page channel, plus refresh channel on initial loads)
//! 2. Decides whether the page is cacheable
//! 3. Fetches the page from the remote source
//! 4. On success, clears the cache and stores the page if cacheable
//! 5. On failure, serves the cached first page when eligible, or publishes `Error`
//!
//! Failures never escape the load entry points; they return an empty page and
//! the outcome is reported through the state channels.

use std::num::NonZeroUsize;
use std::sync::Arc;

use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::cache::store::CacheStore;
use crate::model::{Episode, SearchQuery};
use crate::paging::metrics::{LoadOutcome, PagingMetrics};
use crate::paging::request::PageRequest;
use crate::paging::state::{LoadState, StateChannel};
use crate::remote::source::{FetchFailure, RemoteSource};

/// Error message published when a session closes under an outstanding fetch.
pub const LOAD_CANCELLED: &str = "load cancelled";

/// One paging session: a fixed query, page size, and pair of collaborators.
pub struct PagingController {
    /// Correlates log events of one session.
    session_id: Uuid,

    query: SearchQuery,
    page_size: NonZeroUsize,

    remote: Arc<dyn RemoteSource>,
    cache: Arc<dyn CacheStore>,

    /// Updated on every load.
    page_state: StateChannel,

    /// Updated on initial loads only.
    refresh_state: StateChannel,

    /// Held for the whole of a load so cache clear/insert never interleave.
    in_flight: Mutex<()>,

    /// Flips to `true` on [`close`](Self::close).
    shutdown: watch::Sender<bool>,

    metrics: Option<Arc<PagingMetrics>>,
}

impl PagingController {
    /// Create a session serving `query`.
    pub fn new(
        query: SearchQuery,
        page_size: NonZeroUsize,
        remote: Arc<dyn RemoteSource>,
        cache: Arc<dyn CacheStore>,
    ) -> Self {
        let (shutdown, _) = watch::channel(false);
        Self {
            session_id: Uuid::new_v4(),
            query,
            page_size,
            remote,
            cache,
            page_state: StateChannel::new(),
            refresh_state: StateChannel::new(),
            in_flight: Mutex::new(()),
            shutdown,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<PagingMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn query(&self) -> &SearchQuery {
        &self.query
    }

    pub fn page_size(&self) -> NonZeroUsize {
        self.page_size
    }

    /// Status of the latest load of any page.
    pub fn page_state(&self) -> &StateChannel {
        &self.page_state
    }

    /// Status of the latest first-page load.
    pub fn refresh_state(&self) -> &StateChannel {
        &self.refresh_state
    }

    /// Pagination key of an episode, used as the cursor for [`load_after`](Self::load_after).
    pub fn key_of(episode: &Episode) -> String {
        episode.key().to_string()
    }

    /// Load the first page.
    ///
    /// The first page always starts from the newest episode, so
    /// `requested_key` is accepted for symmetry with list frameworks but not
    /// used as a cursor.
    pub async fn load_initial(&self, requested_key: Option<&str>) -> Vec<Episode> {
        if let Some(key) = requested_key {
            debug!(
                session_id = %self.session_id,
                requested_key = key,
                "Ignoring requested key for initial load"
            );
        }
        self.load(PageRequest::initial(self.page_size)).await
    }

    /// Load the page following the episode keyed `key`.
    pub async fn load_after(&self, key: &str) -> Vec<Episode> {
        self.load(PageRequest::after(key, self.page_size)).await
    }

    /// Backward paging is not supported: always empty, no I/O, no state change.
    pub fn load_before(&self, _key: &str) -> Vec<Episode> {
        Vec::new()
    }

    /// Run [`load_initial`](Self::load_initial) as a task owned by the caller.
    pub fn spawn_initial(self: &Arc<Self>) -> JoinHandle<Vec<Episode>> {
        let this = Arc::clone(self);
        tokio::spawn(async move { this.load_initial(None).await })
    }

    /// Run [`load_after`](Self::load_after) as a task owned by the caller.
    pub fn spawn_after(self: &Arc<Self>, key: String) -> JoinHandle<Vec<Episode>> {
        let this = Arc::clone(self);
        tokio::spawn(async move { this.load_after(&key).await })
    }

    /// Tear the session down.
    ///
    /// An outstanding fetch is abandoned and reported as
    /// `Error("load cancelled")`; later loads return empty without publishing.
    pub fn close(&self) {
        if !self.shutdown.send_replace(true) {
            debug!(session_id = %self.session_id, "Paging session closed");
        }
    }

    pub fn is_closed(&self) -> bool {
        *self.shutdown.borrow()
    }

    /// Load one page. Requests are always built from the session's own page
    /// size by [`load_initial`](Self::load_initial) and [`load_after`](Self::load_after).
    async fn load(&self, request: PageRequest) -> Vec<Episode> {
        if self.is_closed() {
            debug!(session_id = %self.session_id, "Load on closed session ignored");
            return Vec::new();
        }

        let _flight = self.in_flight.lock().await;
        if self.is_closed() {
            return Vec::new();
        }

        self.publish(&request, LoadState::Loading);

        let cacheable = request.is_cacheable(&self.query);
        debug!(
            session_id = %self.session_id,
            cursor = ?request.cursor(),
            initial = request.is_initial(),
            cacheable,
            "Loading page"
        );

        let fetch = self.remote.fetch(
            self.query.search_term.as_deref(),
            self.query.category_id.as_deref(),
            request.cursor(),
            self.page_size.get(),
        );

        let mut shutdown = self.shutdown.subscribe();
        let result = tokio::select! {
            result = fetch => Some(result),
            _ = async {
                let _ = shutdown.wait_for(|closed| *closed).await;
            } => None,
        };

        match result {
            Some(Ok(episodes)) => {
                self.reconcile(&episodes, cacheable).await;
                self.publish(&request, LoadState::Loaded(episodes.len()));
                self.record(LoadOutcome::Fresh);
                info!(
                    session_id = %self.session_id,
                    count = episodes.len(),
                    initial = request.is_initial(),
                    "Page loaded"
                );
                episodes
            }
            Some(Err(failure)) => self.fall_back(&request, cacheable, failure).await,
            None => {
                self.publish(&request, LoadState::Error(LOAD_CANCELLED.to_string()));
                self.record(LoadOutcome::Cancelled);
                debug!(session_id = %self.session_id, "Load abandoned on close");
                Vec::new()
            }
        }
    }

    /// Replace the cache contents after a successful fetch.
    ///
    /// The cache is cleared on every successful fetch, cacheable or not.
    async fn reconcile(&self, episodes: &[Episode], cacheable: bool) {
        if let Err(e) = self.cache.clear().await {
            warn!(session_id = %self.session_id, "Failed to clear episode cache: {e}");
            return;
        }

        if !cacheable {
            return;
        }

        match self.cache.insert(episodes).await {
            Ok(()) => {
                if let Some(metrics) = &self.metrics {
                    metrics.record_cache_write();
                }
                debug!(
                    session_id = %self.session_id,
                    count = episodes.len(),
                    "Cached first page"
                );
            }
            Err(e) => {
                warn!(session_id = %self.session_id, "Failed to cache first page: {e}");
            }
        }
    }

    /// Serve the cached first page after a remote failure, if allowed.
    async fn fall_back(
        &self,
        request: &PageRequest,
        cacheable: bool,
        failure: FetchFailure,
    ) -> Vec<Episode> {
        let cached = match self.cache.read_all().await {
            Ok(cached) => cached,
            Err(e) => {
                warn!(session_id = %self.session_id, "Failed to read episode cache: {e}");
                Vec::new()
            }
        };

        if cacheable && !cached.is_empty() {
            warn!(
                session_id = %self.session_id,
                count = cached.len(),
                error = %failure,
                "Remote fetch failed, serving cached page"
            );
            self.publish(request, LoadState::Loaded(cached.len()));
            self.record(LoadOutcome::Fallback);
            return cached;
        }

        warn!(
            session_id = %self.session_id,
            cacheable,
            error = %failure,
            "Remote fetch failed"
        );
        self.publish(request, LoadState::Error(failure.message()));
        self.record(LoadOutcome::Error);
        Vec::new()
    }

    fn publish(&self, request: &PageRequest, state: LoadState) {
        if request.is_initial() {
            self.refresh_state.publish(state.clone());
        }
        self.page_state.publish(state);
    }

    fn record(&self, outcome: LoadOutcome) {
        if let Some(metrics) = &self.metrics {
            metrics.record(outcome);
        }
    }
}
