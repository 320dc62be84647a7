use serde::{Deserialize, Serialize};

use super::CatalogItem;

/// How the `category` facet is compared against an item
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryMatch {
    /// Filter value must equal one of the split tags
    #[default]
    Membership,
    /// Filter value must be a substring of the raw, unsplit cell
    Substring,
}

/// The three facet filters. An empty value leaves that facet inactive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogFilters {
    #[serde(default, rename = "type")]
    pub item_type: String,
    #[serde(default)]
    pub format: String,
    #[serde(default)]
    pub category: String,
}

impl CatalogFilters {
    pub fn new(
        item_type: impl Into<String>,
        format: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            item_type: item_type.into(),
            format: format.into(),
            category: category.into(),
        }
    }

    /// True when no facet is set; the deck stays locked in that state
    /// regardless of how many items a query would return.
    pub fn is_empty(&self) -> bool {
        self.item_type.is_empty() && self.format.is_empty() && self.category.is_empty()
    }

    /// Apply all active facets to one item
    pub fn matches(&self, item: &CatalogItem, category_match: CategoryMatch) -> bool {
        contains_facet(item.item_type(), &self.item_type)
            && contains_facet(item.format(), &self.format)
            && self.matches_category(item, category_match)
    }

    fn matches_category(&self, item: &CatalogItem, category_match: CategoryMatch) -> bool {
        if self.category.is_empty() {
            return true;
        }
        match category_match {
            CategoryMatch::Membership => item.has_category(&self.category.to_lowercase()),
            CategoryMatch::Substring => contains_facet(item.category(), &self.category),
        }
    }
}

fn contains_facet(value: &str, filter: &str) -> bool {
    filter.is_empty() || value.to_lowercase().contains(&filter.to_lowercase())
}
