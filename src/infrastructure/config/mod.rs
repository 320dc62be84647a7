use std::path::{Path, PathBuf};

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use tracing::debug;
use validator::Validate;

use crate::domain::deck_config::DeckConfig;
use crate::domain::error::Result;

pub const CONFIG_PATH_ENV: &str = "DECKVIEW_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "deckview.toml";
pub const ENV_PREFIX: &str = "DECKVIEW_";

/// Layered configuration: defaults, then an optional TOML file, then
/// `DECKVIEW_*` environment variables.
pub struct ConfigService {
    figment: Figment,
}

impl ConfigService {
    pub fn new() -> Self {
        // .env is optional
        let _ = dotenvy::dotenv();

        let path = std::env::var(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE));

        Self::with_file(path)
    }

    pub fn with_file(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        debug!(path = %path.display(), "Resolving deck configuration");

        let figment = Figment::from(Serialized::defaults(DeckConfig::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX));

        Self { figment }
    }

    pub fn from_figment(figment: Figment) -> Self {
        Self { figment }
    }

    /// Extract and validate the configuration
    pub fn load(&self) -> Result<DeckConfig> {
        let config: DeckConfig = self.figment.extract()?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new()
    }
}
