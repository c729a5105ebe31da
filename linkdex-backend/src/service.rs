///! HTTP surface: shared state, router and request handlers
///!
///! Every browse-style response is a plain context payload for an
///! external rendering surface. The field names (`cat_list`, `categories`,
///! `pages`, `category`, `result_list`, `visit_count`, ...) are a contract
///! and must not be renamed without coordinated change.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header::CONTENT_TYPE, header::SET_COOKIE, HeaderMap, Method, StatusCode},
    response::{AppendHeaders, IntoResponse, Redirect},
    routing::{get, post},
    Json, Router,
};
use chrono::Local;
use serde::{Deserialize, Serialize};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};

use linkdex_common::{Page, SearchResult, Slug};

use crate::config::AppConfig;
use crate::error::AppError;
use crate::module::browse::{browse, track};
use crate::module::catalog::{category_list, top_category_list, CatalogStore, CategoryEntry};
use crate::module::visits;
use crate::module::websearch::SearchProvider;
use crate::session::{session_cookie, session_id_from_headers, SessionStore};

/// How many entries each index panel shows
const INDEX_PANEL_SIZE: usize = 5;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub store: Arc<CatalogStore>,
    pub sessions: SessionStore,
    pub search: Arc<dyn SearchProvider>,
}

impl AppState {
    pub fn new(config: AppConfig, store: CatalogStore, search: Arc<dyn SearchProvider>) -> Self {
        Self {
            config,
            store: Arc::new(store),
            sessions: SessionStore::new(),
            search,
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE]);

    Router::new()
        .route("/", get(index_handler))
        .route("/about", get(about_handler))
        .route("/categories", post(add_category_handler))
        .route("/categories/{slug}", get(category_handler))
        .route("/categories/{slug}/pages", post(add_page_handler))
        .route("/search", get(search_handler))
        .route("/goto", get(track_handler))
        .route("/health", get(health_check))
        .route("/stats", get(stats_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Debug, Serialize)]
pub struct IndexContext {
    /// Top categories by likes
    pub categories: Vec<CategoryEntry>,
    /// Top pages by views
    pub pages: Vec<Page>,
    /// Sidebar listing of every category
    pub cat_list: Vec<CategoryEntry>,
}

#[derive(Debug, Serialize)]
pub struct AboutContext {
    pub cat_list: Vec<CategoryEntry>,
    pub visit_count: u32,
}

#[derive(Debug, Serialize)]
pub struct CategoryContext {
    pub category_name: String,
    pub category_name_url: Slug,
    pub cat_list: Vec<CategoryEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pages: Option<Vec<Page>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result_list: Option<Vec<SearchResult>>,
}

#[derive(Debug, Serialize)]
pub struct SearchContext {
    pub cat_list: Vec<CategoryEntry>,
    pub result_list: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    query: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TrackParams {
    /// Kept as a raw string: an unparsable id falls back to the landing
    /// page like an unknown one, it does not fail the request.
    page_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NewCategory {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct NewPage {
    pub title: String,
    pub url: String,
}

async fn index_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let session_id = session_id_from_headers(&headers).unwrap_or_else(SessionStore::mint_id);

    let now = Local::now().naive_local();
    state
        .sessions
        .with_session(&session_id, |data| visits::record_visit(data, now))
        .await
        .map_err(|e| {
            warn!("Rejecting request with bad visit state: {:#}", e);
            AppError::MalformedInput(format!("session visit state: {}", e))
        })?;

    let context = index_context(&state).await;
    Ok((
        AppendHeaders([(SET_COOKIE, session_cookie(&session_id))]),
        Json(context),
    ))
}

async fn index_context(state: &AppState) -> IndexContext {
    IndexContext {
        categories: top_category_list(&state.store, INDEX_PANEL_SIZE).await,
        pages: state.store.top_pages_by_views(INDEX_PANEL_SIZE).await,
        cat_list: category_list(&state.store, 0, "").await,
    }
}

/// Reads the visit counter without applying a tracker transition.
async fn about_handler(State(state): State<AppState>, headers: HeaderMap) -> Json<AboutContext> {
    let visit_count = match session_id_from_headers(&headers) {
        Some(id) => state
            .sessions
            .with_session(&id, |data| visits::visit_count(data))
            .await,
        None => 0,
    };

    Json(AboutContext {
        cat_list: category_list(&state.store, 0, "").await,
        visit_count,
    })
}

async fn category_handler(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(params): Query<SearchParams>,
) -> Result<Json<CategoryContext>, AppError> {
    let slug = Slug::from_raw(slug);
    let outcome = browse(
        &state.store,
        state.search.as_ref(),
        &slug,
        params.query.as_deref(),
    )
    .await?;

    Ok(Json(CategoryContext {
        category_name: outcome.category_name,
        category_name_url: outcome.category_name_url,
        cat_list: category_list(&state.store, 0, "").await,
        category: outcome.category,
        pages: outcome.pages,
        result_list: outcome.result_list,
    }))
}

async fn search_handler(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchContext>, AppError> {
    let result_list = match params.query.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
        Some(query) => state
            .search
            .run_query(query)
            .await
            .map_err(AppError::SearchProvider)?,
        None => Vec::new(),
    };

    Ok(Json(SearchContext {
        cat_list: category_list(&state.store, 0, "").await,
        result_list,
    }))
}

async fn track_handler(
    State(state): State<AppState>,
    Query(params): Query<TrackParams>,
) -> Redirect {
    let page_id = params.page_id.as_deref().and_then(|raw| raw.parse().ok());
    let target = track(&state.store, page_id).await.into_redirect_url();
    Redirect::to(&target)
}

async fn add_category_handler(
    State(state): State<AppState>,
    Json(payload): Json<NewCategory>,
) -> Result<(StatusCode, Json<CategoryEntry>), AppError> {
    let name = payload.name.trim();
    if name.is_empty() {
        return Err(AppError::MalformedInput(
            "category name must not be blank".to_string(),
        ));
    }

    let category = state
        .store
        .insert_category(name)
        .await
        .map_err(AppError::Store)?
        .ok_or_else(|| AppError::MalformedInput(format!("category '{}' already exists", name)))?;

    info!("Created category '{}'", category.name);
    Ok((StatusCode::CREATED, Json(CategoryEntry::from(category))))
}

async fn add_page_handler(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(payload): Json<NewPage>,
) -> Result<(StatusCode, Json<Page>), AppError> {
    let title = payload.title.trim();
    let url = payload.url.trim();
    if title.is_empty() || url.is_empty() {
        return Err(AppError::MalformedInput(
            "page title and url must not be blank".to_string(),
        ));
    }

    // Creation resolves the category by exact decoded name.
    let category_name = Slug::from_raw(slug).to_name();
    let page = state
        .store
        .insert_page(&category_name, title, url)
        .await
        .map_err(AppError::Store)?
        .ok_or_else(|| AppError::NotFound(format!("category '{}'", category_name)))?;

    info!("Created page '{}' in '{}'", page.title, page.category);
    Ok((StatusCode::CREATED, Json(page)))
}

async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

async fn stats_handler(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "running",
        "service": "linkdex-backend",
        "version": env!("CARGO_PKG_VERSION"),
        "categories": state.store.category_count().await,
        "pages": state.store.page_count().await,
        "sessions": state.sessions.session_count().await,
    }))
}
