//! Prometheus counters for page loads.

use prometheus::{IntCounter, IntCounterVec, Opts, Registry};

/// How a single load call ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Served from the remote feed.
    Fresh,
    /// Remote failed; served from the cache.
    Fallback,
    /// Nothing delivered.
    Error,
    /// Abandoned because the session closed.
    Cancelled,
}

impl LoadOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoadOutcome::Fresh => "fresh",
            LoadOutcome::Fallback => "fallback",
            LoadOutcome::Error => "error",
            LoadOutcome::Cancelled => "cancelled",
        }
    }
}

/// Counters shared by every session created from one factory.
#[derive(Debug, Clone)]
pub struct PagingMetrics {
    loads: IntCounterVec,
    cache_writes: IntCounter,
}

impl PagingMetrics {
    /// Create the counters and register them in `registry`.
    pub fn new(registry: &Registry) -> prometheus::Result<Self> {
        let metrics = Self::unregistered()?;
        registry.register(Box::new(metrics.loads.clone()))?;
        registry.register(Box::new(metrics.cache_writes.clone()))?;
        Ok(metrics)
    }

    /// Create the counters without exposing them anywhere.
    pub fn unregistered() -> prometheus::Result<Self> {
        let loads = IntCounterVec::new(
            Opts::new("episode_pager_loads_total", "Page loads by outcome"),
            &["outcome"],
        )?;
        let cache_writes = IntCounter::new(
            "episode_pager_cache_writes_total",
            "First pages written to the episode cache",
        )?;

        Ok(Self {
            loads,
            cache_writes,
        })
    }

    pub fn record(&self, outcome: LoadOutcome) {
        self.loads.with_label_values(&[outcome.as_str()]).inc();
    }

    pub fn record_cache_write(&self) {
        self.cache_writes.inc();
    }

    /// Loads recorded so far with the given outcome.
    pub fn loads(&self, outcome: LoadOutcome) -> u64 {
        self.loads.with_label_values(&[outcome.as_str()]).get()
    }

    pub fn cache_writes(&self) -> u64 {
        self.cache_writes.get()
    }
}
