use serde::Serialize;

use crate::domain::csv::RawRecord;

/// Tag assigned when a row has no category
pub const DEFAULT_CATEGORY: &str = "common";

/// A display-ready deck item derived from one parsed row.
///
/// Holds the raw record unchanged plus the derived fields. Items are built
/// once per load and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogItem {
    #[serde(flatten)]
    pub record: RawRecord,

    /// Lowercase tags split from `category`; never empty
    pub categories: Vec<String>,

    /// `title`, or the configured fallback literal
    pub display_title: String,

    /// `desc` with markdown markup stripped, for compact previews
    pub description_preview: String,
}

impl CatalogItem {
    pub fn field(&self, name: &str) -> &str {
        self.record.value(name)
    }

    pub fn title(&self) -> &str {
        self.field("title")
    }

    pub fn desc(&self) -> &str {
        self.field("desc")
    }

    pub fn author(&self) -> &str {
        self.field("author")
    }

    pub fn item_type(&self) -> &str {
        self.field("type")
    }

    pub fn format(&self) -> &str {
        self.field("format")
    }

    /// The unsplit `category` cell
    pub fn category(&self) -> &str {
        self.field("category")
    }

    pub fn has_category(&self, tag: &str) -> bool {
        self.categories.iter().any(|c| c == tag)
    }

    /// Split a raw `category` cell into lowercase tags.
    ///
    /// Blank tokens are skipped; an empty result becomes `[common]`.
    pub fn split_categories(raw: &str) -> Vec<String> {
        let tags: Vec<String> = raw
            .split(',')
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();

        if tags.is_empty() {
            vec![DEFAULT_CATEGORY.to_string()]
        } else {
            tags
        }
    }
}
