///! Search provider response parser

use anyhow::{Context, Result};
use serde::Deserialize;

use linkdex_common::SearchResult;

/// Raw result entry as returned by the provider
#[derive(Debug, Deserialize)]
struct RawResult {
    title: String,
    url: String,
    #[allow(dead_code)]
    snippet: Option<String>,
}

/// Wrapper for the JSON response
#[derive(Debug, Deserialize)]
struct ProviderResponse {
    results: Vec<RawResult>,
}

/// Parse the provider JSON into ordered results, keeping provider order
/// and at most `max_results` entries.
pub fn parse_search_response(json: &str, max_results: usize) -> Result<Vec<SearchResult>> {
    let resp: ProviderResponse =
        serde_json::from_str(json).context("Failed to deserialize search provider JSON")?;

    Ok(resp
        .results
        .into_iter()
        .take(max_results)
        .map(|raw| SearchResult {
            title: raw.title,
            url: raw.url,
        })
        .collect())
}
