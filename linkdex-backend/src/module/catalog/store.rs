///! Catalog snapshot store
///!
///! Categories and pages live in memory behind a RwLock and are mirrored
///! to a pretty-printed JSON file after every mutation. An absent snapshot
///! file means an empty catalog. The view-counter read-modify-write holds
///! the write lock, so in-process racing clicks serialise; no stronger
///! cross-process guarantee is made.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::sync::RwLock;
use tracing::{debug, info};

use linkdex_common::{Category, Page, PageId};

const SNAPSHOT_FILE: &str = "catalog.json";

#[derive(Debug, Default, Serialize, Deserialize)]
struct CatalogSnapshot {
    categories: Vec<Category>,
    pages: Vec<Page>,
    /// Highest page id handed out so far
    next_page_id: PageId,
}

pub struct CatalogStore {
    data_dir: PathBuf,
    snapshot: RwLock<CatalogSnapshot>,
}

impl CatalogStore {
    /// Open the store rooted at `data_dir`, loading the snapshot if one
    /// exists.
    pub async fn open<P: AsRef<Path>>(data_dir: P) -> Result<Self> {
        let data_dir = data_dir.as_ref().to_path_buf();
        let path = data_dir.join(SNAPSHOT_FILE);

        let snapshot = if path.exists() {
            let content = fs::read_to_string(&path)
                .await
                .context("Failed to read catalog snapshot")?;

            let snapshot: CatalogSnapshot =
                serde_json::from_str(&content).context("Failed to parse catalog snapshot")?;

            info!(
                "Loaded catalog: {} categories, {} pages",
                snapshot.categories.len(),
                snapshot.pages.len()
            );
            snapshot
        } else {
            debug!("Catalog snapshot does not exist: {:?}", path);
            CatalogSnapshot::default()
        };

        Ok(Self {
            data_dir,
            snapshot: RwLock::new(snapshot),
        })
    }

    async fn persist(&self, snapshot: &CatalogSnapshot) -> Result<()> {
        if !self.data_dir.exists() {
            fs::create_dir_all(&self.data_dir)
                .await
                .context("Failed to create data directory")?;
        }

        let content =
            serde_json::to_string_pretty(snapshot).context("Failed to serialize catalog")?;

        fs::write(self.data_dir.join(SNAPSHOT_FILE), content)
            .await
            .context("Failed to write catalog snapshot")?;

        Ok(())
    }

    /// All categories in insertion order.
    pub async fn categories(&self) -> Vec<Category> {
        self.snapshot.read().await.categories.clone()
    }

    /// Categories whose name starts with `prefix` (case-sensitive).
    pub async fn categories_with_prefix(&self, prefix: &str) -> Vec<Category> {
        let snapshot = self.snapshot.read().await;
        snapshot
            .categories
            .iter()
            .filter(|c| c.name.starts_with(prefix))
            .cloned()
            .collect()
    }

    /// Most liked categories first, cut to `limit`.
    pub async fn top_categories_by_likes(&self, limit: usize) -> Vec<Category> {
        let snapshot = self.snapshot.read().await;
        let mut categories = snapshot.categories.clone();
        categories.sort_by(|a, b| b.likes.cmp(&a.likes));
        categories.truncate(limit);
        categories
    }

    /// ASCII case-insensitive exact name lookup.
    pub async fn category_by_name_ci(&self, name: &str) -> Option<Category> {
        let snapshot = self.snapshot.read().await;
        snapshot
            .categories
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
            .cloned()
    }

    /// Create a category with zero likes. Returns None when the name is
    /// already taken (case-insensitive).
    pub async fn insert_category(&self, name: &str) -> Result<Option<Category>> {
        let mut snapshot = self.snapshot.write().await;

        if snapshot
            .categories
            .iter()
            .any(|c| c.name.eq_ignore_ascii_case(name))
        {
            return Ok(None);
        }

        let category = Category::new(name);
        snapshot.categories.push(category.clone());
        self.persist(&snapshot).await?;

        Ok(Some(category))
    }

    /// Pages filed under `category_name` (exact match), most viewed first.
    /// Orphaned pages simply never match any listing.
    pub async fn pages_for_category(&self, category_name: &str) -> Vec<Page> {
        let snapshot = self.snapshot.read().await;
        let mut pages: Vec<Page> = snapshot
            .pages
            .iter()
            .filter(|p| p.category == category_name)
            .cloned()
            .collect();
        pages.sort_by(|a, b| b.views.cmp(&a.views));
        pages
    }

    /// Most viewed pages across the whole catalog, cut to `limit`.
    pub async fn top_pages_by_views(&self, limit: usize) -> Vec<Page> {
        let snapshot = self.snapshot.read().await;
        let mut pages = snapshot.pages.clone();
        pages.sort_by(|a, b| b.views.cmp(&a.views));
        pages.truncate(limit);
        pages
    }

    pub async fn page(&self, id: PageId) -> Option<Page> {
        let snapshot = self.snapshot.read().await;
        snapshot.pages.iter().find(|p| p.id == id).cloned()
    }

    /// File a page under `category_name` (exact match) with zero views and
    /// the next id. Returns None when the category does not exist.
    pub async fn insert_page(
        &self,
        category_name: &str,
        title: &str,
        url: &str,
    ) -> Result<Option<Page>> {
        let mut snapshot = self.snapshot.write().await;

        if !snapshot.categories.iter().any(|c| c.name == category_name) {
            return Ok(None);
        }

        snapshot.next_page_id += 1;
        let page = Page {
            id: snapshot.next_page_id,
            title: title.to_string(),
            url: url.to_string(),
            views: 0,
            category: category_name.to_string(),
        };
        snapshot.pages.push(page.clone());
        self.persist(&snapshot).await?;

        Ok(Some(page))
    }

    /// Increment a page's view counter by one and return its destination
    /// URL. Returns None for an unknown id; nothing is written in that
    /// case.
    pub async fn bump_views(&self, id: PageId) -> Result<Option<String>> {
        let mut snapshot = self.snapshot.write().await;

        let Some(page) = snapshot.pages.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };

        page.views += 1;
        let url = page.url.clone();
        self.persist(&snapshot).await?;

        Ok(Some(url))
    }

    pub async fn category_count(&self) -> usize {
        self.snapshot.read().await.categories.len()
    }

    pub async fn page_count(&self) -> usize {
        self.snapshot.read().await.pages.len()
    }
}
