///! Category browsing and tracked-link flows

use tracing::{debug, warn};

use linkdex_common::{Page, PageId, SearchResult, Slug};

use crate::error::AppError;
use crate::module::catalog::{CatalogStore, CategoryEntry};
use crate::module::websearch::SearchProvider;

/// Where a tracked link forwards when the page cannot be resolved
pub const DEFAULT_LANDING_URL: &str = "/";

/// Renderable outcome of a category browse. `category` and `pages` are
/// absent together when the slug matched nothing; `result_list` is present
/// exactly when a query was run.
#[derive(Debug)]
pub struct BrowseOutcome {
    pub category_name: String,
    pub category_name_url: Slug,
    pub category: Option<CategoryEntry>,
    pub pages: Option<Vec<Page>>,
    pub result_list: Option<Vec<SearchResult>>,
}

/// Decode `slug`, look the category up (ASCII case-insensitive) and
/// gather its pages, most viewed first. An unknown category degrades to
/// an empty-state outcome rather than an error. A query that is non-empty
/// after trimming goes to the search provider; provider failures are the
/// only error this flow surfaces.
pub async fn browse(
    store: &CatalogStore,
    provider: &dyn SearchProvider,
    slug: &Slug,
    query: Option<&str>,
) -> Result<BrowseOutcome, AppError> {
    let category_name = slug.to_name();

    let category = store.category_by_name_ci(&category_name).await;
    let pages = match &category {
        Some(category) => Some(store.pages_for_category(&category.name).await),
        None => {
            debug!("No category matching '{}'", category_name);
            None
        }
    };

    let result_list = match query.map(str::trim).filter(|q| !q.is_empty()) {
        Some(query) => Some(
            provider
                .run_query(query)
                .await
                .map_err(AppError::SearchProvider)?,
        ),
        None => None,
    };

    Ok(BrowseOutcome {
        category_name,
        category_name_url: slug.clone(),
        category: category.map(CategoryEntry::from),
        pages,
        result_list,
    })
}

/// Where a tracked link should forward the client.
#[derive(Debug, PartialEq, Eq)]
pub enum TrackOutcome {
    /// The page exists and its view counter was bumped.
    Found(String),
    /// Missing id, unknown id, or a store failure. Falling back to the
    /// landing page is the documented policy for this endpoint, not an
    /// accident of error handling.
    NotFound,
}

impl TrackOutcome {
    pub fn into_redirect_url(self) -> String {
        match self {
            TrackOutcome::Found(url) => url,
            TrackOutcome::NotFound => DEFAULT_LANDING_URL.to_string(),
        }
    }
}

/// Bump the view counter for `page_id` and resolve the redirect target.
/// At-least-once: rapid repeat clicks each count.
pub async fn track(store: &CatalogStore, page_id: Option<PageId>) -> TrackOutcome {
    let Some(id) = page_id else {
        return TrackOutcome::NotFound;
    };

    match store.bump_views(id).await {
        Ok(Some(url)) => TrackOutcome::Found(url),
        Ok(None) => {
            debug!("Tracked link for unknown page id {}", id);
            TrackOutcome::NotFound
        }
        Err(e) => {
            warn!("Failed to persist view count for page {}: {:#}", id, e);
            TrackOutcome::NotFound
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// Records queries and replays canned results.
    struct RecordingProvider {
        queries: Mutex<Vec<String>>,
        results: Vec<SearchResult>,
    }

    impl RecordingProvider {
        fn new(results: Vec<SearchResult>) -> Self {
            Self {
                queries: Mutex::new(Vec::new()),
                results,
            }
        }

        fn queries(&self) -> Vec<String> {
            self.queries.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl SearchProvider for RecordingProvider {
        async fn run_query(&self, query: &str) -> Result<Vec<SearchResult>> {
            self.queries.lock().unwrap().push(query.to_string());
            Ok(self.results.clone())
        }
    }

    async fn seeded_store(temp_dir: &TempDir) -> CatalogStore {
        let store = CatalogStore::open(temp_dir.path()).await.unwrap();
        store.insert_category("Other Frameworks").await.unwrap().unwrap();
        store
            .insert_page("Other Frameworks", "Flask", "https://flask.palletsprojects.com/")
            .await
            .unwrap()
            .unwrap();
        store
    }

    #[tokio::test]
    async fn test_browse_known_category() {
        let temp_dir = TempDir::new().unwrap();
        let store = seeded_store(&temp_dir).await;
        let provider = RecordingProvider::new(Vec::new());

        let outcome = browse(&store, &provider, &Slug::from_raw("Other_Frameworks"), None)
            .await
            .unwrap();

        assert_eq!(outcome.category_name, "Other Frameworks");
        assert_eq!(outcome.category.as_ref().unwrap().name, "Other Frameworks");
        assert_eq!(outcome.pages.as_ref().unwrap().len(), 1);
        assert!(outcome.result_list.is_none());
    }

    #[tokio::test]
    async fn test_browse_lookup_ignores_case() {
        let temp_dir = TempDir::new().unwrap();
        let store = seeded_store(&temp_dir).await;
        let provider = RecordingProvider::new(Vec::new());

        let outcome = browse(&store, &provider, &Slug::from_raw("other_frameworks"), None)
            .await
            .unwrap();

        assert!(outcome.category.is_some());
        assert_eq!(outcome.category_name, "other frameworks");
    }

    #[tokio::test]
    async fn test_browse_unknown_category_degrades() {
        let temp_dir = TempDir::new().unwrap();
        let store = seeded_store(&temp_dir).await;
        let provider = RecordingProvider::new(Vec::new());

        let outcome = browse(&store, &provider, &Slug::from_raw("No_Such"), None)
            .await
            .unwrap();

        assert!(outcome.category.is_none());
        assert!(outcome.pages.is_none());
        assert!(outcome.result_list.is_none());
    }

    #[tokio::test]
    async fn test_browse_trims_query_before_provider_call() {
        let temp_dir = TempDir::new().unwrap();
        let store = seeded_store(&temp_dir).await;
        let provider = RecordingProvider::new(vec![SearchResult {
            title: "Django Project".to_string(),
            url: "https://www.djangoproject.com/".to_string(),
        }]);

        let outcome = browse(
            &store,
            &provider,
            &Slug::from_raw("Other_Frameworks"),
            Some("  django  "),
        )
        .await
        .unwrap();

        assert_eq!(provider.queries(), ["django"]);
        assert_eq!(outcome.result_list.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_browse_skips_provider_for_blank_query() {
        let temp_dir = TempDir::new().unwrap();
        let store = seeded_store(&temp_dir).await;
        let provider = RecordingProvider::new(Vec::new());

        let outcome = browse(
            &store,
            &provider,
            &Slug::from_raw("Other_Frameworks"),
            Some("   "),
        )
        .await
        .unwrap();

        assert!(provider.queries().is_empty());
        assert!(outcome.result_list.is_none());
    }

    #[tokio::test]
    async fn test_track_bumps_views_and_returns_destination() {
        let temp_dir = TempDir::new().unwrap();
        let store = seeded_store(&temp_dir).await;

        let outcome = track(&store, Some(1)).await;
        assert_eq!(
            outcome,
            TrackOutcome::Found("https://flask.palletsprojects.com/".to_string())
        );
        assert_eq!(store.page(1).await.unwrap().views, 1);
    }

    #[tokio::test]
    async fn test_track_unknown_page_falls_back_without_mutation() {
        let temp_dir = TempDir::new().unwrap();
        let store = seeded_store(&temp_dir).await;

        let outcome = track(&store, Some(42)).await;
        assert_eq!(outcome, TrackOutcome::NotFound);
        assert_eq!(outcome.into_redirect_url(), DEFAULT_LANDING_URL);
        assert_eq!(store.page(1).await.unwrap().views, 0);
    }

    #[tokio::test]
    async fn test_track_missing_id_falls_back() {
        let temp_dir = TempDir::new().unwrap();
        let store = seeded_store(&temp_dir).await;

        assert_eq!(track(&store, None).await, TrackOutcome::NotFound);
    }
}
