use std::sync::Arc;
use std::time::Duration;

use tracing::warn;

use crate::application::use_cases::catalog_store::{CatalogStore, SharedCatalog};
use crate::application::{DeckLoader, DeckPresenter};
use crate::domain::deck_config::DeckConfig;
use crate::domain::error::AppError;
use crate::infrastructure::markdown::MarkdownRenderer;
use crate::infrastructure::scheduling::Debouncer;
use crate::infrastructure::source::SheetSource;

/// Everything the request handlers share. One instance per application.
pub struct AppState {
    pub config: DeckConfig,
    pub catalog: SharedCatalog,
    pub loader: Arc<DeckLoader>,
    pub presenter: DeckPresenter,
    pub reloads: Debouncer<()>,
}

impl AppState {
    /// Must be called from inside a tokio runtime; the reload debouncer
    /// spawns its task there.
    pub fn build(
        config: DeckConfig,
        source: Arc<dyn SheetSource>,
        renderer: Option<Arc<dyn MarkdownRenderer>>,
    ) -> Self {
        let catalog = CatalogStore::from_config(&config).shared();
        let loader = Arc::new(DeckLoader::new(source, catalog.clone()));
        let presenter = DeckPresenter::from_config(&config, renderer);

        let reload_loader = loader.clone();
        let reloads = Debouncer::spawn(
            Duration::from_millis(config.reload_quiet_period_ms),
            move |()| {
                let loader = reload_loader.clone();
                async move {
                    match loader.load().await {
                        Ok(_) => {}
                        Err(AppError::Busy(_)) => warn!("Reload skipped, a load is still running"),
                        Err(err) => warn!(error = %err, "Scheduled reload failed"),
                    }
                }
            },
        );

        Self {
            config,
            catalog,
            loader,
            presenter,
            reloads,
        }
    }
}
