///! Web-search provider client

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;

use linkdex_common::SearchResult;

use super::parser::parse_search_response;

/// Seam between the handlers and the external search provider.
///
/// Handlers only ever see this trait; the production implementation talks
/// to the configured HTTP endpoint, tests substitute a recording stub.
/// Callers are expected to hand in a trimmed, non-empty query.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn run_query(&self, query: &str) -> Result<Vec<SearchResult>>;
}

pub struct WebSearchClient {
    client:      Client,
    endpoint:    String,
    api_key:     Option<String>,
    max_results: usize,
}

impl WebSearchClient {
    pub fn new(endpoint: impl Into<String>, api_key: Option<String>, max_results: usize) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(10))
                .user_agent("linkdex-backend/0.1")
                .build()
                .expect("Failed to build reqwest client"),
            endpoint: endpoint.into(),
            api_key,
            max_results,
        }
    }
}

#[async_trait]
impl SearchProvider for WebSearchClient {
    /// One synchronous round trip: no retry, no local fallback. Failures
    /// propagate to the handler layer's provider-failure surface.
    async fn run_query(&self, query: &str) -> Result<Vec<SearchResult>> {
        tracing::debug!("Querying search provider for '{}'", query);

        let mut request = self.client.get(&self.endpoint).query(&[("q", query)]);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let body = request
            .send()
            .await
            .context("Failed to reach search provider")?
            .error_for_status()
            .context("Search provider returned an error status")?
            .text()
            .await
            .context("Failed to read search provider response body")?;

        parse_search_response(&body, self.max_results)
    }
}
