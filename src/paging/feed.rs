//! Forward-only pagination driver.
//!
//! [`EpisodeFeed`] stands in for a list widget: it asks its session for the
//! first page, then for the page after the last episode it holds, until a
//! page comes back empty. [`SessionFactory`] builds a fresh session per query
//! (and per refresh) from one shared pair of collaborators.

use std::num::NonZeroUsize;
use std::sync::Arc;

use tracing::debug;

use crate::cache::store::CacheStore;
use crate::model::{Episode, SearchQuery};
use crate::paging::controller::PagingController;
use crate::paging::metrics::PagingMetrics;
use crate::remote::source::RemoteSource;

/// Creates paging sessions that share a remote source and cache.
#[derive(Clone)]
pub struct SessionFactory {
    remote: Arc<dyn RemoteSource>,
    cache: Arc<dyn CacheStore>,
    page_size: NonZeroUsize,
    metrics: Option<Arc<PagingMetrics>>,
}

impl SessionFactory {
    pub fn new(
        remote: Arc<dyn RemoteSource>,
        cache: Arc<dyn CacheStore>,
        page_size: NonZeroUsize,
    ) -> Self {
        Self {
            remote,
            cache,
            page_size,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<PagingMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Start a new session serving `query`.
    pub fn create(&self, query: SearchQuery) -> Arc<PagingController> {
        let mut controller = PagingController::new(
            query,
            self.page_size,
            Arc::clone(&self.remote),
            Arc::clone(&self.cache),
        );
        if let Some(metrics) = &self.metrics {
            controller = controller.with_metrics(Arc::clone(metrics));
        }
        Arc::new(controller)
    }
}

/// Accumulated episodes of one query, loaded page by page.
pub struct EpisodeFeed {
    factory: SessionFactory,
    session: Arc<PagingController>,
    episodes: Vec<Episode>,
    exhausted: bool,
}

impl EpisodeFeed {
    pub fn new(factory: SessionFactory, query: SearchQuery) -> Self {
        let session = factory.create(query);
        Self {
            factory,
            session,
            episodes: Vec::new(),
            exhausted: false,
        }
    }

    /// The session currently backing the feed.
    pub fn session(&self) -> &Arc<PagingController> {
        &self.session
    }

    pub fn episodes(&self) -> &[Episode] {
        &self.episodes
    }

    /// Whether the last load came back empty.
    ///
    /// Set both at the true end of the feed and after a failed load; call
    /// [`retry`](Self::retry) to try again after a failure.
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Cursor for the next page, if any episode is loaded.
    pub fn next_key(&self) -> Option<String> {
        self.episodes.last().map(PagingController::key_of)
    }

    /// Discard loaded episodes and fetch the first page. Returns its size.
    pub async fn load_first(&mut self) -> usize {
        self.episodes.clear();
        self.exhausted = false;
        let page = self.session.load_initial(None).await;
        self.append(page)
    }

    /// Fetch the next page. Returns its size; `0` once exhausted.
    pub async fn load_more(&mut self) -> usize {
        if self.exhausted {
            return 0;
        }
        match self.next_key() {
            None => self.load_first().await,
            Some(key) => {
                let page = self.session.load_after(&key).await;
                self.append(page)
            }
        }
    }

    /// Allow loading again after a load came back empty.
    pub fn retry(&mut self) {
        self.exhausted = false;
    }

    /// Close the current session and reload from a fresh one.
    pub async fn refresh(&mut self) -> usize {
        let query = self.session.query().clone();
        self.session.close();
        self.session = self.factory.create(query);
        debug!(session_id = %self.session.session_id(), "Feed refreshed");
        self.load_first().await
    }

    fn append(&mut self, page: Vec<Episode>) -> usize {
        let count = page.len();
        if count == 0 {
            self.exhausted = true;
        }
        self.episodes.extend(page);
        count
    }
}
