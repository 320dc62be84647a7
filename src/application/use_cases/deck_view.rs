// ============================================================
// DECK PRESENTATION
// ============================================================
// Pure view models for the card deck, the list modal and the
// detail modal. No store mutation, no rendering concerns beyond
// escaping and markdown.

use std::sync::Arc;

use serde::Serialize;

use super::catalog_store::{matches_search, CatalogStore};
use crate::domain::catalog::{CatalogFilters, CatalogItem, CategoryLabels};
use crate::domain::deck_config::DeckConfig;
use crate::domain::error::{AppError, Result};
use crate::infrastructure::markdown::{escape_html, render_markdown_or_escape, MarkdownRenderer};

/// Placeholder initial when an item has no author
const FALLBACK_INITIAL: char = 'A';

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardView {
    /// Position in the full catalog, used to open the detail view
    pub index: usize,
    pub title_html: String,
    pub category_label: String,
    pub categories: Vec<String>,
    pub preview_html: String,
    pub animation_delay_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum DeckView {
    /// No facet selected yet
    Locked,
    NoResults,
    Cards { cards: Vec<CardView> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListEntry {
    pub index: usize,
    pub title_html: String,
    pub category_label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailView {
    pub index: usize,
    pub title: String,
    pub author: String,
    pub author_initial: String,
    pub category_badge: String,
    pub categories: Vec<String>,
    pub desc_html: String,
}

pub struct DeckPresenter {
    labels: CategoryLabels,
    fallback_author: String,
    animation_delay_ms: u64,
    renderer: Option<Arc<dyn MarkdownRenderer>>,
}

impl DeckPresenter {
    pub fn new(
        labels: CategoryLabels,
        fallback_author: impl Into<String>,
        animation_delay_ms: u64,
        renderer: Option<Arc<dyn MarkdownRenderer>>,
    ) -> Self {
        Self {
            labels,
            fallback_author: fallback_author.into(),
            animation_delay_ms,
            renderer,
        }
    }

    pub fn from_config(config: &DeckConfig, renderer: Option<Arc<dyn MarkdownRenderer>>) -> Self {
        Self::new(
            config.category_labels(),
            config.fallback_author.clone(),
            config.card_animation_delay_ms,
            renderer,
        )
    }

    /// Deck state for the current filters.
    ///
    /// Locked depends only on the filters, not on whether anything matches.
    pub fn deck(&self, store: &CatalogStore, filters: &CatalogFilters) -> DeckView {
        if filters.is_empty() {
            return DeckView::Locked;
        }

        let cards: Vec<CardView> = store
            .query_indexed(filters)
            .into_iter()
            .enumerate()
            .map(|(position, (index, item))| self.card(index, position, item))
            .collect();

        if cards.is_empty() {
            DeckView::NoResults
        } else {
            DeckView::Cards { cards }
        }
    }

    /// List-mode entries: the filtered set narrowed by a free-text query
    pub fn list(&self, store: &CatalogStore, filters: &CatalogFilters, query: &str) -> Vec<ListEntry> {
        store
            .query_indexed(filters)
            .into_iter()
            .filter(|(_, item)| matches_search(item, query))
            .map(|(index, item)| ListEntry {
                index,
                title_html: escape_html(&item.display_title),
                category_label: escape_html(&self.labels.joined_label(&item.categories)),
            })
            .collect()
    }

    pub fn detail(&self, store: &CatalogStore, index: usize) -> Result<DetailView> {
        let item = store
            .get(index)
            .ok_or_else(|| AppError::NotFound(format!("No deck item at index {}", index)))?;

        let author = match item.author() {
            "" => self.fallback_author.clone(),
            author => author.to_string(),
        };

        Ok(DetailView {
            index,
            title: item.display_title.clone(),
            author,
            author_initial: author_initial(item.author()),
            category_badge: self.labels.joined_label(&item.categories),
            categories: item.categories.clone(),
            desc_html: render_markdown_or_escape(self.renderer.as_deref(), item.desc()),
        })
    }

    fn card(&self, index: usize, position: usize, item: &CatalogItem) -> CardView {
        CardView {
            index,
            title_html: escape_html(&item.display_title),
            category_label: escape_html(&self.labels.joined_label(&item.categories)),
            categories: item.categories.clone(),
            preview_html: escape_html(&item.description_preview),
            animation_delay_ms: (position as u64).saturating_mul(self.animation_delay_ms),
        }
    }
}

fn author_initial(author: &str) -> String {
    author
        .chars()
        .next()
        .unwrap_or(FALLBACK_INITIAL)
        .to_uppercase()
        .collect()
}
