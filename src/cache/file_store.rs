//! File-backed episode cache.
//!
//! The cached page lives in a single JSON document, `episodes.json`, inside
//! the configured cache directory. Writes go to a uniquely named temporary
//! sibling file that is then renamed over the document, so a crash mid-write leaves either the
//! old page or the new one on disk, never a torn file.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::cache::store::{CacheError, CacheStore};
use crate::model::Episode;

const CACHE_FILE: &str = "episodes.json";

/// Persistent [`CacheStore`] backed by a JSON file.
pub struct FileCacheStore {
    /// Directory holding the cache document.
    dir: PathBuf,

    /// Serializes read-modify-write cycles on the document.
    write_lock: Mutex<()>,
}

impl FileCacheStore {
    /// Open (creating if needed) a cache rooted at `dir`.
    pub async fn new(dir: impl Into<PathBuf>) -> Result<Self, CacheError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).await?;

        Ok(Self {
            dir,
            write_lock: Mutex::new(()),
        })
    }

    /// Path of the cache document.
    pub fn path(&self) -> PathBuf {
        self.dir.join(CACHE_FILE)
    }

    fn temp_path(&self) -> PathBuf {
        self.dir.join(format!("{CACHE_FILE}.{}.tmp", Uuid::new_v4()))
    }

    async fn load(path: &Path) -> Result<Vec<Episode>, CacheError> {
        match fs::read(path).await {
            Ok(data) => Ok(serde_json::from_slice(&data)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn store(&self, episodes: &[Episode]) -> Result<(), CacheError> {
        let data = serde_json::to_vec(episodes)?;
        let tmp = self.temp_path();

        let written = match fs::write(&tmp, &data).await {
            Ok(()) => fs::rename(&tmp, self.path()).await,
            Err(e) => Err(e),
        };
        if let Err(e) = written {
            if let Err(cleanup) = fs::remove_file(&tmp).await {
                if cleanup.kind() != ErrorKind::NotFound {
                    warn!(path = %tmp.display(), "Failed to remove temp cache file: {cleanup}");
                }
            }
            return Err(e.into());
        }

        debug!(
            path = %self.path().display(),
            count = episodes.len(),
            size = data.len(),
            "Wrote episode cache"
        );
        Ok(())
    }
}

#[async_trait]
impl CacheStore for FileCacheStore {
    async fn clear(&self) -> Result<(), CacheError> {
        let _guard = self.write_lock.lock().await;
        match fs::remove_file(self.path()).await {
            Ok(()) => {
                debug!(path = %self.path().display(), "Cleared episode cache");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    async fn insert(&self, episodes: &[Episode]) -> Result<(), CacheError> {
        let _guard = self.write_lock.lock().await;
        let mut cached = Self::load(&self.path()).await?;
        cached.extend_from_slice(episodes);
        self.store(&cached).await
    }

    async fn read_all(&self) -> Result<Vec<Episode>, CacheError> {
        Self::load(&self.path()).await
    }
}
