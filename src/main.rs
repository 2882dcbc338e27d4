//! episode-pager CLI: loads a few pages of the feed and prints them.

use std::sync::Arc;

use clap::Parser;
use prometheus::{Registry, TextEncoder};
use tokio_stream::StreamExt;
use tracing::{debug, info, warn};

use episode_pager::cache::{CacheStore, FileCacheStore, MemoryCacheStore};
use episode_pager::config::{Cli, Config};
use episode_pager::paging::{EpisodeFeed, LoadState, PagingMetrics, SessionFactory};
use episode_pager::remote::{HttpRemoteSource, RemoteSource};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments.
    let cli = Cli::parse();

    // Initialize tracing/logging.
    let filter = if cli.verbose {
        "episode_pager=debug"
    } else {
        "episode_pager=info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with_target(true)
        .init();

    info!("episode-pager v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration.
    let mut config = Config::load(&cli.config)?;
    config.apply_cli(&cli);
    let page_size = config.page_size()?;

    info!(
        base_url = %config.remote.base_url,
        page_size = page_size.get(),
        max_pages = config.paging.max_pages,
        persistent_cache = config.cache.persistent,
        "Configuration loaded"
    );

    // Collaborators.
    let remote: Arc<dyn RemoteSource> = Arc::new(HttpRemoteSource::new(&config.remote)?);
    let cache: Arc<dyn CacheStore> = if config.cache.persistent {
        Arc::new(FileCacheStore::new(config.cache.dir.clone()).await?)
    } else {
        Arc::new(MemoryCacheStore::new())
    };

    let registry = Registry::new();
    let metrics = Arc::new(PagingMetrics::new(&registry)?);
    let factory = SessionFactory::new(remote, cache, page_size).with_metrics(metrics);
    let mut feed = EpisodeFeed::new(factory, cli.query());

    // Log state transitions as the session publishes them.
    let mut states = feed.session().page_state().stream();
    let watcher = tokio::spawn(async move {
        while let Some(state) = states.next().await {
            debug!(%state, "Page state");
        }
    });

    for page in 0..config.paging.max_pages {
        let count = feed.load_more().await;
        if let LoadState::Error(message) = feed.session().page_state().current() {
            warn!(page, "Load failed: {message}");
            break;
        }
        if count == 0 {
            info!(page, "Reached the end of the feed");
            break;
        }
    }

    for episode in feed.episodes() {
        println!(
            "{:<25} {}",
            episode.key(),
            episode.title.as_deref().unwrap_or("(untitled)")
        );
    }

    feed.session().close();
    watcher.abort();

    if cli.metrics {
        let text = TextEncoder::new().encode_to_string(&registry.gather())?;
        print!("{text}");
    }

    Ok(())
}
