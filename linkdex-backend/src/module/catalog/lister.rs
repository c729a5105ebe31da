///! Category listing for navigation widgets

use serde::Serialize;

use linkdex_common::{Category, Slug};

use super::store::CatalogStore;

/// One listing entry: a category plus its computed link slug.
///
/// Identity fields come straight from the store; callers read the
/// attached `url`, they do not write back through this type.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryEntry {
    pub name: String,
    pub likes: u32,
    pub url: Slug,
}

impl From<Category> for CategoryEntry {
    fn from(category: Category) -> Self {
        let url = category.slug();
        Self {
            name: category.name,
            likes: category.likes,
            url,
        }
    }
}

/// Ordered, optionally filtered, optionally truncated category view.
///
/// A non-empty `prefix` keeps only names starting with it, case
/// sensitively. A `max_results` of 0 means unbounded; otherwise the list
/// is cut to the first `max_results` entries in store order. An empty
/// catalog yields an empty vector, never an error.
pub async fn category_list(
    store: &CatalogStore,
    max_results: usize,
    prefix: &str,
) -> Vec<CategoryEntry> {
    let categories = if prefix.is_empty() {
        store.categories().await
    } else {
        store.categories_with_prefix(prefix).await
    };

    let mut entries: Vec<CategoryEntry> = categories.into_iter().map(CategoryEntry::from).collect();
    if max_results > 0 && entries.len() > max_results {
        entries.truncate(max_results);
    }

    entries
}

/// Most liked categories first, for the index page panels.
pub async fn top_category_list(store: &CatalogStore, limit: usize) -> Vec<CategoryEntry> {
    store
        .top_categories_by_likes(limit)
        .await
        .into_iter()
        .map(CategoryEntry::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn store_with(names: &[&str], temp_dir: &TempDir) -> CatalogStore {
        let store = CatalogStore::open(temp_dir.path()).await.unwrap();
        for name in names {
            store.insert_category(name).await.unwrap().unwrap();
        }
        store
    }

    #[tokio::test]
    async fn test_empty_catalog_yields_empty_list() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_with(&[], &temp_dir).await;

        assert!(category_list(&store, 0, "").await.is_empty());
    }

    #[tokio::test]
    async fn test_max_results_truncates() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_with(
            &["Python", "Django", "Perl", "Prolog", "Erlang"],
            &temp_dir,
        )
        .await;

        assert_eq!(category_list(&store, 2, "").await.len(), 2);
        assert_eq!(category_list(&store, 0, "").await.len(), 5);
        // A cap above the catalog size changes nothing.
        assert_eq!(category_list(&store, 10, "").await.len(), 5);
    }

    #[tokio::test]
    async fn test_prefix_filter_is_case_sensitive() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_with(&["Python", "Prolog", "python weekly", "Django"], &temp_dir).await;

        let names: Vec<String> = category_list(&store, 0, "Py")
            .await
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, ["Python"]);
    }

    #[tokio::test]
    async fn test_entries_carry_slugs() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_with(&["Other Frameworks"], &temp_dir).await;

        let entries = category_list(&store, 0, "").await;
        assert_eq!(entries[0].url.as_str(), "Other_Frameworks");
    }
}
