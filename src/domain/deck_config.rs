use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use validator::{Validate, ValidationError};

use super::catalog::{CategoryLabels, CategoryMatch};

pub const DEFAULT_SHEET_URL: &str = "https://docs.google.com/spreadsheets/d/e/2PACX-1vSQGVQ28mEJ6gBvtT_O7N7sXxw61Kmw9AIbGGyhpJAnHRqh9xZ9dWUbk6w3ly_gI2782pv86GiBnLj3/pub?gid=0&single=true&output=csv";

#[derive(Debug, Serialize, Deserialize, Clone, Validate)]
#[serde(default)]
pub struct DeckConfig {
    /// Published CSV export of the spreadsheet
    #[validate(custom(function = "validate_sheet_url"))]
    pub sheet_url: String,

    #[validate(range(min = 1, max = 300))]
    pub fetch_timeout_secs: u64,

    pub bind_host: String,

    #[validate(range(min = 1))]
    pub bind_port: u16,

    /// Reload requests arriving within this window are coalesced
    pub reload_quiet_period_ms: u64,

    /// Delay between successive cards in the deck animation
    pub card_animation_delay_ms: u64,

    pub category_match: CategoryMatch,

    #[validate(length(min = 1))]
    pub fallback_title: String,

    #[validate(length(min = 1))]
    pub fallback_author: String,

    #[validate(length(min = 1))]
    pub fallback_category_label: String,

    pub category_labels: HashMap<String, String>,

    pub log_filter: String,
}

impl Default for DeckConfig {
    fn default() -> Self {
        let labels = CategoryLabels::default();
        Self {
            sheet_url: DEFAULT_SHEET_URL.to_string(),
            fetch_timeout_secs: 30,
            bind_host: "127.0.0.1".to_string(),
            bind_port: 3001,
            reload_quiet_period_ms: 500,
            card_animation_delay_ms: 50,
            category_match: CategoryMatch::Membership,
            fallback_title: "Без названия".to_string(),
            fallback_author: "Неизвестен".to_string(),
            fallback_category_label: labels.fallback,
            category_labels: labels.labels,
            log_filter: "info".to_string(),
        }
    }
}

impl DeckConfig {
    pub fn category_labels(&self) -> CategoryLabels {
        CategoryLabels::new(self.category_labels.clone(), self.fallback_category_label.clone())
    }
}

fn validate_sheet_url(value: &str) -> Result<(), ValidationError> {
    match url::Url::parse(value) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Ok(()),
        _ => Err(ValidationError::new("sheet_url")),
    }
}
