use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::catalog_item::DEFAULT_CATEGORY;

/// Human-readable labels for category tags
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryLabels {
    pub labels: HashMap<String, String>,
    /// Shown when an item has no category at all
    pub fallback: String,
}

impl Default for CategoryLabels {
    fn default() -> Self {
        Self {
            labels: default_labels(),
            fallback: "Общее".to_string(),
        }
    }
}

impl CategoryLabels {
    pub fn new(labels: HashMap<String, String>, fallback: impl Into<String>) -> Self {
        Self {
            labels,
            fallback: fallback.into(),
        }
    }

    /// Label for a raw category cell.
    ///
    /// Looks the lowercased value up in the table, falls back to the raw
    /// value itself, and to the fallback label when the cell is blank.
    pub fn label_for(&self, raw: &str) -> String {
        let raw = raw.trim();
        if raw.is_empty() {
            return self
                .labels
                .get(&self.fallback.to_lowercase())
                .cloned()
                .unwrap_or_else(|| self.fallback.clone());
        }

        self.labels
            .get(&raw.to_lowercase())
            .cloned()
            .unwrap_or_else(|| raw.to_string())
    }

    /// Labels for already split tags, in tag order.
    ///
    /// The implicit `common` tag reads as the fallback label unless the
    /// table maps it explicitly.
    pub fn labels_for_tags(&self, tags: &[String]) -> Vec<String> {
        tags.iter()
            .map(|tag| match self.labels.get(tag.as_str()) {
                None if tag == DEFAULT_CATEGORY => self.label_for(""),
                _ => self.label_for(tag),
            })
            .collect()
    }

    /// One badge text for a tag list
    pub fn joined_label(&self, tags: &[String]) -> String {
        self.labels_for_tags(tags).join(", ")
    }
}

pub(crate) fn default_labels() -> HashMap<String, String> {
    [
        ("involvement", "Активизация вовлечённости"),
        ("relations", "Отношения \"преподаватель - студенты\""),
        ("organisational", "Организация учебного процесса"),
        ("ai", "Искусственный интеллект"),
        ("progress", "Оценка прогресса"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_tag_is_mapped_case_insensitively() {
        let labels = CategoryLabels::default();
        assert_eq!(labels.label_for("AI"), "Искусственный интеллект");
    }

    #[test]
    fn test_unknown_tag_returns_raw() {
        let labels = CategoryLabels::default();
        assert_eq!(labels.label_for("Custom Tag"), "Custom Tag");
    }

    #[test]
    fn test_blank_returns_fallback() {
        let labels = CategoryLabels::default();
        assert_eq!(labels.label_for(""), "Общее");
    }

    #[test]
    fn test_labels_for_tags() {
        let labels = CategoryLabels::default();
        let tags = vec!["ai".to_string(), "progress".to_string()];
        assert_eq!(
            labels.labels_for_tags(&tags),
            vec!["Искусственный интеллект", "Оценка прогресса"]
        );
    }

    #[test]
    fn test_joined_label_maps_every_tag() {
        let labels = CategoryLabels::default();
        let tags = vec!["ai".to_string(), "custom".to_string(), "progress".to_string()];
        assert_eq!(
            labels.joined_label(&tags),
            "Искусственный интеллект, custom, Оценка прогресса"
        );
    }

    #[test]
    fn test_default_tag_reads_as_fallback() {
        let labels = CategoryLabels::default();
        assert_eq!(labels.joined_label(&[DEFAULT_CATEGORY.to_string()]), "Общее");
    }
}
