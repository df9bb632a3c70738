//! Project catalog: the ordered list of selectable items for a workspace.

pub mod builder;
pub mod types;

pub use builder::{CatalogSources, build_catalog, list_local_entries, status_summary};
pub use types::{Catalog, CatalogItem, ItemKind};
