//! Cache store contract and the in-memory implementation.
//!
//! The paging controller treats the store as a single slot holding the first
//! page of the unfiltered feed. It only ever clears the store, bulk-inserts a
//! page, or reads everything back; there are no keyed or ranged reads.

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::model::Episode;

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Whole-table episode storage.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Remove every cached episode.
    async fn clear(&self) -> Result<(), CacheError>;

    /// Append episodes, preserving their order.
    async fn insert(&self, episodes: &[Episode]) -> Result<(), CacheError>;

    /// Read back every cached episode in insertion order.
    async fn read_all(&self) -> Result<Vec<Episode>, CacheError>;
}

/// Volatile store used when persistence is disabled, and in tests.
#[derive(Debug, Default)]
pub struct MemoryCacheStore {
    episodes: RwLock<Vec<Episode>>,
}

impl MemoryCacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `episodes`.
    pub fn with_episodes(episodes: Vec<Episode>) -> Self {
        Self {
            episodes: RwLock::new(episodes),
        }
    }
}

#[async_trait]
impl CacheStore for MemoryCacheStore {
    async fn clear(&self) -> Result<(), CacheError> {
        self.episodes.write().await.clear();
        Ok(())
    }

    async fn insert(&self, episodes: &[Episode]) -> Result<(), CacheError> {
        self.episodes.write().await.extend_from_slice(episodes);
        Ok(())
    }

    async fn read_all(&self) -> Result<Vec<Episode>, CacheError> {
        Ok(self.episodes.read().await.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_appends_in_order() {
        let store = MemoryCacheStore::new();
        store.insert(&[Episode::new("a", Some("3"))]).await.unwrap();
        store
            .insert(&[Episode::new("b", Some("2")), Episode::new("c", Some("1"))])
            .await
            .unwrap();

        let ids: Vec<_> = store
            .read_all()
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_clear_empties_store() {
        let store = MemoryCacheStore::with_episodes(vec![Episode::new("a", None)]);
        store.clear().await.unwrap();
        assert!(store.read_all().await.unwrap().is_empty());
    }
}
