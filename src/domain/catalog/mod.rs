// ============================================================
// CATALOG DOMAIN LAYER
// ============================================================
// Normalized deck items, facet filters and category labels

mod catalog_item;
mod category_labels;
mod filters;

pub use catalog_item::{CatalogItem, DEFAULT_CATEGORY};
pub use category_labels::CategoryLabels;
pub use filters::{CatalogFilters, CategoryMatch};
