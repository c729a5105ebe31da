///! Category/page catalog
///!
///! The snapshot store keeps the catalog in memory and mirrors it to a
///! JSON file; the lister builds the slug-annotated category views every
///! page payload embeds.

pub mod lister;
pub mod store;

pub use lister::{category_list, top_category_list, CategoryEntry};
pub use store::CatalogStore;
