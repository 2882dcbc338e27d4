//! HTTP client for the episodes REST API.
//!
//! Pages are requested with `GET {base_url}/posts`:
//!
//! | Param             | Meaning                                 |
//! |-------------------|-----------------------------------------|
//! | `search`          | free-text search term                   |
//! | `categories`      | category ID filter                      |
//! | `createdAtBefore` | cursor, the date of the last seen item  |
//! | `limit`           | page size                               |
//!
//! Blank parameters are omitted rather than sent empty.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::config::RemoteConfig;
use crate::model::search::is_blank;
use crate::model::Episode;
use crate::remote::source::{FetchFailure, RemoteSource};

/// reqwest-backed [`RemoteSource`].
pub struct HttpRemoteSource {
    base_url: String,
    client: Client,
}

impl HttpRemoteSource {
    /// Build a client with the configured per-request timeout.
    pub fn new(config: &RemoteConfig) -> reqwest::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn posts_url(&self) -> String {
        format!("{}/posts", self.base_url)
    }
}

fn query_params(
    search_term: Option<&str>,
    category_id: Option<&str>,
    cursor: Option<&str>,
    page_size: usize,
) -> Vec<(&'static str, String)> {
    let mut params = Vec::with_capacity(4);
    for (name, value) in [
        ("search", search_term),
        ("categories", category_id),
        ("createdAtBefore", cursor),
    ] {
        if let Some(value) = value.filter(|v| !is_blank(Some(*v))) {
            params.push((name, value.to_string()));
        }
    }
    params.push(("limit", page_size.to_string()));
    params
}

#[async_trait]
impl RemoteSource for HttpRemoteSource {
    async fn fetch(
        &self,
        search_term: Option<&str>,
        category_id: Option<&str>,
        cursor: Option<&str>,
        page_size: usize,
    ) -> Result<Vec<Episode>, FetchFailure> {
        let params = query_params(search_term, category_id, cursor, page_size);

        let response = self
            .client
            .get(self.posts_url())
            .query(&params)
            .send()
            .await
            .map_err(|e| FetchFailure::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| FetchFailure::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(FetchFailure::Status {
                status: status.as_u16(),
                message: body,
            });
        }

        // A successful response with no body is an empty page.
        if body.trim().is_empty() {
            return Ok(Vec::new());
        }

        let episodes: Vec<Episode> =
            serde_json::from_str(&body).map_err(|e| FetchFailure::Decode(e.to_string()))?;

        debug!(
            url = %self.posts_url(),
            count = episodes.len(),
            "Fetched episode page"
        );

        Ok(episodes)
    }
}
