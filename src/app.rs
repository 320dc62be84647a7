use std::sync::Arc;
use std::time::Duration;

use actix_web::web;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::domain::deck_config::DeckConfig;
use crate::domain::error::Result;
use crate::infrastructure::config::ConfigService;
use crate::infrastructure::markdown::CommonMarkRenderer;
use crate::infrastructure::source::HttpSheetSource;
use crate::interfaces::http::start_server;
use crate::interfaces::state::AppState;

fn init_tracing(filter: &str) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));
    let _ = tracing_subscriber::fmt().with_env_filter(env_filter).try_init();
}

pub async fn run() -> std::io::Result<()> {
    let config = match ConfigService::new().load() {
        Ok(config) => {
            init_tracing(&config.log_filter);
            config
        }
        Err(err) => {
            init_tracing("info");
            error!(error = %err, "Invalid configuration");
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, err));
        }
    };

    let state = match build_state(config) {
        Ok(state) => web::Data::new(state),
        Err(err) => {
            error!(error = %err, "Failed to set up sheet source");
            return Err(std::io::Error::new(std::io::ErrorKind::Other, err));
        }
    };

    // first load runs in the background; /api/status reports progress
    let loader = state.loader.clone();
    tokio::spawn(async move {
        if let Err(err) = loader.load().await {
            error!(error = %err, "Initial deck load failed");
        }
    });

    let server = start_server(state)?;
    server.await?;

    info!("Deck API stopped");
    Ok(())
}

fn build_state(config: DeckConfig) -> Result<AppState> {
    let source = HttpSheetSource::new(
        config.sheet_url.clone(),
        Duration::from_secs(config.fetch_timeout_secs),
    )?;

    Ok(AppState::build(
        config,
        Arc::new(source),
        Some(Arc::new(CommonMarkRenderer::new())),
    ))
}
