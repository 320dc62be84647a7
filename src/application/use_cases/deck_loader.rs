// ============================================================
// DECK LOADER USE CASE
// ============================================================
// Fetch -> parse -> derive -> swap, with a coarse load state

use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{error, info, warn};

use super::catalog_store::{read_catalog, write_catalog, SharedCatalog};
use crate::domain::error::{AppError, Result};
use crate::infrastructure::csv::CsvParser;
use crate::infrastructure::source::SheetSource;

/// What the UI needs to pick between spinner, deck, empty and error states
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum LoadState {
    Idle,
    Loading,
    Loaded {
        count: usize,
        loaded_at: DateTime<Utc>,
    },
    LoadedEmpty {
        loaded_at: DateTime<Utc>,
    },
    Failed {
        message: String,
    },
}

impl LoadState {
    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadState::Loaded { .. } | LoadState::LoadedEmpty { .. })
    }
}

pub struct DeckLoader {
    source: Arc<dyn SheetSource>,
    parser: CsvParser,
    catalog: SharedCatalog,
    state: Mutex<LoadState>,
    in_flight: tokio::sync::Mutex<()>,
}

impl DeckLoader {
    pub fn new(source: Arc<dyn SheetSource>, catalog: SharedCatalog) -> Self {
        Self {
            source,
            parser: CsvParser::new(),
            catalog,
            state: Mutex::new(LoadState::Idle),
            in_flight: tokio::sync::Mutex::new(()),
        }
    }

    pub fn state(&self) -> LoadState {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set_state(&self, next: LoadState) {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = next;
    }

    /// Run one full load and return the new item count.
    ///
    /// A load started while another is running fails with `Busy`. When the
    /// fetch or derivation fails, the catalog keeps its previous contents
    /// and the state becomes `Failed`.
    pub async fn load(&self) -> Result<usize> {
        let _guard = self
            .in_flight
            .try_lock()
            .map_err(|_| AppError::Busy("A deck load is already in progress".to_string()))?;

        self.set_state(LoadState::Loading);
        info!(source = %self.source.describe(), "Loading deck");

        match self.fetch_and_swap().await {
            Ok(count) => {
                let loaded_at = Utc::now();
                self.set_state(if count == 0 {
                    LoadState::LoadedEmpty { loaded_at }
                } else {
                    LoadState::Loaded { count, loaded_at }
                });
                info!(count, "Deck loaded");
                Ok(count)
            }
            Err(err) => {
                error!(error = %err, "Deck load failed, keeping previous catalog");
                self.set_state(LoadState::Failed {
                    message: err.to_string(),
                });
                Err(err)
            }
        }
    }

    async fn fetch_and_swap(&self) -> Result<usize> {
        let text = self.source.fetch().await?;

        let records = self.parser.parse(&text);
        if records.is_empty() && !text.trim().is_empty() {
            // the parser cannot tell "empty by design" from malformed
            let err = AppError::MalformedDocument("document produced no records".to_string());
            warn!(error = %err, bytes = text.len(), "Treating deck as empty");
        }

        let items = read_catalog(&self.catalog).prepare(records)?;
        Ok(write_catalog(&self.catalog).replace(items))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::catalog_store::CatalogStore;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Serves a scripted sequence of responses
    struct ScriptedSource {
        responses: Vec<Result<String>>,
        calls: AtomicUsize,
    }

    impl ScriptedSource {
        fn new(responses: Vec<Result<String>>) -> Arc<Self> {
            Arc::new(Self {
                responses,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl SheetSource for ScriptedSource {
        async fn fetch(&self) -> Result<String> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            let idx = call.min(self.responses.len() - 1);
            self.responses[idx].clone()
        }

        fn describe(&self) -> String {
            "scripted".to_string()
        }
    }

    /// Never resolves, to hold a load in flight
    struct PendingSource;

    #[async_trait]
    impl SheetSource for PendingSource {
        async fn fetch(&self) -> Result<String> {
            std::future::pending::<Result<String>>().await
        }

        fn describe(&self) -> String {
            "pending".to_string()
        }
    }

    fn unavailable() -> Result<String> {
        Err(AppError::SourceUnavailable("status 503".to_string()))
    }

    #[tokio::test]
    async fn test_successful_load() {
        let catalog = CatalogStore::default().shared();
        let source = ScriptedSource::new(vec![Ok("title,desc\nA,a\nB,b\n".to_string())]);
        let loader = DeckLoader::new(source, catalog.clone());

        assert_eq!(loader.state(), LoadState::Idle);
        assert_eq!(loader.load().await.unwrap(), 2);
        assert!(matches!(loader.state(), LoadState::Loaded { count: 2, .. }));
        assert_eq!(read_catalog(&catalog).len(), 2);
    }

    #[tokio::test]
    async fn test_empty_document_is_loaded_empty() {
        let catalog = CatalogStore::default().shared();
        let source = ScriptedSource::new(vec![Ok("title,desc\n".to_string())]);
        let loader = DeckLoader::new(source, catalog);

        assert_eq!(loader.load().await.unwrap(), 0);
        assert!(matches!(loader.state(), LoadState::LoadedEmpty { .. }));
        assert!(loader.state().is_loaded());
    }

    #[tokio::test]
    async fn test_failed_fetch_keeps_previous_catalog() {
        let catalog = CatalogStore::default().shared();
        let source = ScriptedSource::new(vec![
            Ok("title\nA\nB\nC\n".to_string()),
            unavailable(),
        ]);
        let loader = DeckLoader::new(source, catalog.clone());

        loader.load().await.unwrap();
        let err = loader.load().await.unwrap_err();

        assert!(matches!(err, AppError::SourceUnavailable(_)));
        assert!(matches!(loader.state(), LoadState::Failed { .. }));
        assert_eq!(read_catalog(&catalog).len(), 3);
    }

    #[tokio::test]
    async fn test_overlapping_load_is_rejected() {
        let catalog = CatalogStore::default().shared();
        let loader = Arc::new(DeckLoader::new(Arc::new(PendingSource), catalog));

        let background = {
            let loader = loader.clone();
            tokio::spawn(async move { loader.load().await })
        };
        tokio::task::yield_now().await;

        let err = loader.load().await.unwrap_err();
        assert!(matches!(err, AppError::Busy(_)));
        assert_eq!(loader.state(), LoadState::Loading);

        background.abort();
    }
}
