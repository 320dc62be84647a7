// ============================================================
// CATALOG STORE
// ============================================================
// Owns the derived deck items and answers facet/search queries

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{info, warn};

use crate::domain::catalog::{CatalogFilters, CatalogItem, CategoryMatch};
use crate::domain::csv::RawRecord;
use crate::domain::deck_config::DeckConfig;
use crate::domain::error::{AppError, Result};
use crate::infrastructure::markdown::strip_markdown_markup;

/// Store shared between the loader and the request handlers
pub type SharedCatalog = Arc<RwLock<CatalogStore>>;

pub fn read_catalog(catalog: &SharedCatalog) -> RwLockReadGuard<'_, CatalogStore> {
    catalog.read().unwrap_or_else(PoisonError::into_inner)
}

pub fn write_catalog(catalog: &SharedCatalog) -> RwLockWriteGuard<'_, CatalogStore> {
    catalog.write().unwrap_or_else(PoisonError::into_inner)
}

/// Holds one complete, immutable item set.
///
/// A load derives every item first and only then swaps the whole set in,
/// so readers see either the previous set or the new one.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    items: Arc<Vec<CatalogItem>>,
    category_match: CategoryMatch,
    fallback_title: String,
}

impl Default for CatalogStore {
    fn default() -> Self {
        let config = DeckConfig::default();
        Self::new(config.category_match, config.fallback_title)
    }
}

impl CatalogStore {
    pub fn new(category_match: CategoryMatch, fallback_title: impl Into<String>) -> Self {
        Self {
            items: Arc::new(Vec::new()),
            category_match,
            fallback_title: fallback_title.into(),
        }
    }

    pub fn from_config(config: &DeckConfig) -> Self {
        Self::new(config.category_match, config.fallback_title.clone())
    }

    pub fn shared(self) -> SharedCatalog {
        Arc::new(RwLock::new(self))
    }

    /// Replace the stored set with items derived from `records`.
    ///
    /// On error the previous set is kept untouched.
    pub fn load(&mut self, records: Vec<RawRecord>) -> Result<usize> {
        let items = self.prepare(records)?;
        Ok(self.replace(items))
    }

    /// Derive a full item set without touching the store
    pub fn prepare(&self, records: Vec<RawRecord>) -> Result<Vec<CatalogItem>> {
        if let Some(first) = records.first() {
            if let Some(pos) = records.iter().position(|r| !r.same_keys(first)) {
                warn!(row = pos, "Record header set differs from the first record");
                return Err(AppError::MalformedDocument(format!(
                    "Record {} does not share the document header set",
                    pos
                )));
            }
        }

        Ok(records
            .into_iter()
            .map(|record| self.derive_item(record))
            .collect())
    }

    /// Swap in a prepared set, returning its size
    pub fn replace(&mut self, items: Vec<CatalogItem>) -> usize {
        let count = items.len();
        self.items = Arc::new(items);
        info!(count, "Catalog replaced");
        count
    }

    pub fn derive_item(&self, record: RawRecord) -> CatalogItem {
        let categories = CatalogItem::split_categories(record.value("category"));

        let display_title = match record.value("title") {
            "" => self.fallback_title.clone(),
            title => title.to_string(),
        };

        let description_preview = strip_markdown_markup(record.value("desc"));

        CatalogItem {
            record,
            categories,
            display_title,
            description_preview,
        }
    }

    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    /// Cheap handle to the current set that outlives later loads
    pub fn snapshot(&self) -> Arc<Vec<CatalogItem>> {
        Arc::clone(&self.items)
    }

    pub fn get(&self, index: usize) -> Option<&CatalogItem> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn category_match(&self) -> CategoryMatch {
        self.category_match
    }

    /// Items matching every active facet, in load order
    pub fn query(&self, filters: &CatalogFilters) -> Vec<&CatalogItem> {
        self.query_indexed(filters)
            .into_iter()
            .map(|(_, item)| item)
            .collect()
    }

    /// Like `query`, paired with each item's position in the full set
    pub fn query_indexed(&self, filters: &CatalogFilters) -> Vec<(usize, &CatalogItem)> {
        self.items
            .iter()
            .enumerate()
            .filter(|(_, item)| filters.matches(item, self.category_match))
            .collect()
    }
}

/// Free-text match on display title or raw description.
///
/// The query is lowercased and trimmed; an empty query matches everything.
pub fn matches_search(item: &CatalogItem, query: &str) -> bool {
    let query = query.trim().to_lowercase();
    query.is_empty()
        || item.display_title.to_lowercase().contains(&query)
        || item.desc().to_lowercase().contains(&query)
}

/// Narrow an already filtered set by a free-text query, keeping order
pub fn search<'a>(items: &[&'a CatalogItem], query: &str) -> Vec<&'a CatalogItem> {
    items
        .iter()
        .copied()
        .filter(|item| matches_search(item, query))
        .collect()
}
