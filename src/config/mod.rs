//! Configuration loading and management

mod io;
mod settings;


pub use settings::VoiceNavSettings;

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::language::{LanguageCatalog, StaticCatalog};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Voice navigation settings
    #[serde(default)]
    pub settings: VoiceNavSettings,
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Build the language catalog these settings describe.
    ///
    /// Uses `catalog_path` when set, otherwise the bundled catalog. The
    /// active language is the configured one if supported, else the system
    /// locale's language, else the catalog default.
    pub fn catalog(&self, system_locale: Option<&str>) -> Result<StaticCatalog> {
        let catalog = match &self.settings.catalog_path {
            Some(path) => StaticCatalog::from_file(path)
                .with_context(|| format!("Failed to load catalog: {}", path.display()))?,
            None => StaticCatalog::bundled(),
        };

        let language = catalog.detect_initial(Some(&self.settings.language), system_locale);
        if !language.code.eq_ignore_ascii_case(&self.settings.language) {
            tracing::warn!(
                "Language '{}' not supported, using {}",
                self.settings.language,
                catalog.current_language()
            );
        }

        Ok(catalog)
    }
}
