///! Shared domain types for the linkdex workspace

pub mod slug;
pub mod types;

pub use slug::Slug;
pub use types::{Category, Page, PageId, SearchResult};
