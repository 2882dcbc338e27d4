//! Runtime configuration for episode-pager.
//!
//! Configuration is loaded from a JSON file or constructed programmatically.
//! Every section has defaults, so a partial file (or none at all) is valid.

use std::num::NonZeroUsize;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use serde::{Deserialize, Serialize};

use crate::model::SearchQuery;

/// Command-line arguments.
#[derive(Parser, Debug, Clone)]
#[command(name = "episode-pager", about = "Page through the episode feed with offline fallback")]
pub struct Cli {
    /// Path to configuration file (JSON).
    #[arg(short, long, default_value = "config.json")]
    pub config: PathBuf,

    /// Free-text search term.
    #[arg(short, long)]
    pub search: Option<String>,

    /// Category ID filter.
    #[arg(long)]
    pub category: Option<String>,

    /// Number of pages to load (overrides the config file).
    #[arg(short, long)]
    pub pages: Option<usize>,

    /// Print a Prometheus snapshot after loading.
    #[arg(long)]
    pub metrics: bool,

    /// Enable verbose logging.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// The search query described by the flags.
    pub fn query(&self) -> SearchQuery {
        SearchQuery {
            search_term: self.search.clone(),
            category_id: self.category.clone(),
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Remote feed settings.
    pub remote: RemoteConfig,

    /// Episode cache settings.
    pub cache: CacheConfig,

    /// Pagination settings.
    pub paging: PagingConfig,
}

/// Remote feed endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    /// API root; pages are fetched from `{base_url}/posts`.
    pub base_url: String,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://software-engineering-daily-api.herokuapp.com/api".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Where the first-page cache lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Directory for the cache file.
    pub dir: PathBuf,

    /// Persist to disk; when false the cache lives in memory only.
    pub persistent: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("/tmp/episode-pager"),
            persistent: true,
        }
    }
}

/// Page sizing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PagingConfig {
    /// Episodes per page.
    pub page_size: usize,

    /// Pages the CLI loads before stopping.
    pub max_pages: usize,
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self {
            page_size: 20,
            max_pages: 3,
        }
    }
}

impl Config {
    /// Load configuration from a JSON file, falling back to defaults if it is missing.
    pub fn load(path: &std::path::Path) -> anyhow::Result<Self> {
        if path.exists() {
            let data = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            let config: Config = serde_json::from_str(&data)
                .with_context(|| format!("parsing {}", path.display()))?;
            Ok(config)
        } else {
            tracing::warn!("Config file not found at {:?}, using defaults", path);
            Ok(Config::default())
        }
    }

    /// Apply command-line overrides.
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(pages) = cli.pages {
            self.paging.max_pages = pages;
        }
    }

    /// Page size as a validated non-zero count.
    pub fn page_size(&self) -> anyhow::Result<NonZeroUsize> {
        NonZeroUsize::new(self.paging.page_size).context("paging.page_size must be positive")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = Config::default();
        assert_eq!(cfg.paging.page_size, 20);
        assert!(cfg.cache.persistent);
        assert_eq!(cfg.page_size().unwrap().get(), 20);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let cfg: Config = serde_json::from_str(r#"{"paging": {"page_size": 5}}"#).unwrap();
        assert_eq!(cfg.paging.page_size, 5);
        assert_eq!(cfg.paging.max_pages, 3);
        assert_eq!(cfg.remote.timeout_secs, 30);
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let mut cfg = Config::default();
        cfg.paging.page_size = 0;
        assert!(cfg.page_size().is_err());
    }

    #[test]
    fn test_missing_file_is_default() {
        let cfg = Config::load(std::path::Path::new("/nonexistent/episode-pager.json")).unwrap();
        assert_eq!(cfg.paging.page_size, 20);
    }

    #[test]
    fn test_cli_overrides() {
        let cli = Cli::parse_from(["episode-pager", "--pages", "7", "--category", "devops"]);
        let mut cfg = Config::default();
        cfg.apply_cli(&cli);

        assert_eq!(cfg.paging.max_pages, 7);
        assert_eq!(cli.query().category_id.as_deref(), Some("devops"));
        assert!(cli.query().search_term.is_none());
    }
}
