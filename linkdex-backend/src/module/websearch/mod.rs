///! External web-search provider
///!
///! Queries the configured HTTP search endpoint and maps its JSON payload
///! into the `{title, url}` result list handlers attach to responses.

pub mod client;
pub mod parser;

pub use client::{SearchProvider, WebSearchClient};
