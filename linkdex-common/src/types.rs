///! Core catalog entity types

use serde::{Deserialize, Serialize};

use crate::slug::Slug;

/// Stable numeric identifier assigned to a page when it is created
pub type PageId = u64;

/// A browsable category of pages
///
/// The name is the category's identity: lookups from decoded URL slugs are
/// case-insensitive, creation rejects case-insensitive duplicates. The URL
/// slug is derived from the name on demand, never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    /// Display name, e.g. "Other Frameworks"
    pub name: String,
    /// Popularity counter shown on listings
    pub likes: u32,
}

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            likes: 0,
        }
    }

    /// Slug for links pointing at this category
    pub fn slug(&self) -> Slug {
        Slug::from_name(&self.name)
    }
}

/// A link filed under exactly one category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    pub id: PageId,
    /// Title shown in listings
    pub title: String,
    /// External destination the tracked link forwards to
    pub url: String,
    /// How many times the tracked link was followed
    pub views: u64,
    /// Name of the owning category
    pub category: String,
}

/// One result returned by the external web-search provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub url: String,
}
