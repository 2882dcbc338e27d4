//! Scripted collaborators shared by the integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Notify;

use episode_pager::cache::{CacheError, CacheStore};
use episode_pager::model::Episode;
use episode_pager::remote::{FetchFailure, RemoteSource};

pub type FetchResult = Result<Vec<Episode>, FetchFailure>;

/// Arguments of one `fetch` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub search_term: Option<String>,
    pub category_id: Option<String>,
    pub cursor: Option<String>,
    pub page_size: usize,
}

/// Replays queued responses in order; an empty script yields empty pages.
#[derive(Default)]
pub struct ScriptedRemote {
    responses: Mutex<VecDeque<FetchResult>>,
    calls: Mutex<Vec<Call>>,
}

impl ScriptedRemote {
    pub fn new(responses: Vec<FetchResult>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl RemoteSource for ScriptedRemote {
    async fn fetch(
        &self,
        search_term: Option<&str>,
        category_id: Option<&str>,
        cursor: Option<&str>,
        page_size: usize,
    ) -> FetchResult {
        self.calls.lock().unwrap().push(Call {
            search_term: search_term.map(str::to_string),
            category_id: category_id.map(str::to_string),
            cursor: cursor.map(str::to_string),
            page_size,
        });
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

/// Never answers.
pub struct HangingRemote;

#[async_trait]
impl RemoteSource for HangingRemote {
    async fn fetch(
        &self,
        _search_term: Option<&str>,
        _category_id: Option<&str>,
        _cursor: Option<&str>,
        _page_size: usize,
    ) -> FetchResult {
        std::future::pending().await
    }
}

/// Answers with `page` once `release` is notified.
pub struct GatedRemote {
    pub release: Notify,
    pub page: Vec<Episode>,
}

#[async_trait]
impl RemoteSource for GatedRemote {
    async fn fetch(
        &self,
        _search_term: Option<&str>,
        _category_id: Option<&str>,
        _cursor: Option<&str>,
        _page_size: usize,
    ) -> FetchResult {
        self.release.notified().await;
        Ok(self.page.clone())
    }
}

/// Takes a while to answer and records the peak number of overlapping calls.
#[derive(Default)]
pub struct SlowRemote {
    active: AtomicUsize,
    pub peak: AtomicUsize,
}

#[async_trait]
impl RemoteSource for SlowRemote {
    async fn fetch(
        &self,
        _search_term: Option<&str>,
        _category_id: Option<&str>,
        cursor: Option<&str>,
        page_size: usize,
    ) -> FetchResult {
        let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(20)).await;
        self.active.fetch_sub(1, Ordering::SeqCst);

        let prefix = if cursor.is_some() { "after" } else { "first" };
        Ok(page(prefix, page_size, 28))
    }
}

/// Cache whose every operation fails.
pub struct BrokenCache;

#[async_trait]
impl CacheStore for BrokenCache {
    async fn clear(&self) -> Result<(), CacheError> {
        Err(std::io::Error::other("disk full").into())
    }

    async fn insert(&self, _episodes: &[Episode]) -> Result<(), CacheError> {
        Err(std::io::Error::other("disk full").into())
    }

    async fn read_all(&self) -> Result<Vec<Episode>, CacheError> {
        Err(std::io::Error::other("disk full").into())
    }
}

/// `n` episodes dated on consecutive days counting down from `first_day`.
pub fn page(prefix: &str, n: usize, first_day: usize) -> Vec<Episode> {
    assert!(
        n <= first_day,
        "{n} episodes counting down from day {first_day} run past January 1st"
    );
    (0..n)
        .map(|i| {
            let date = format!("2020-01-{:02}T00:00:00", first_day - i);
            Episode::new(format!("{prefix}-{i}"), Some(date.as_str()))
        })
        .collect()
}

pub fn unavailable() -> FetchFailure {
    FetchFailure::Status {
        status: 503,
        message: "Service Unavailable".to_string(),
    }
}

pub fn size(n: usize) -> NonZeroUsize {
    NonZeroUsize::new(n).unwrap()
}
