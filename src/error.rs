//! Error type for fallible setup APIs.
//!
//! Runtime platform failures are never returned as errors; they surface as
//! events and log lines and leave the engine in a safe idle state.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum VoiceNavError {
    #[error("Unsupported language: {0}")]
    UnknownLanguage(String),

    #[error("Invalid catalog: {0}")]
    CatalogParse(#[from] toml::de::Error),

    #[error("Catalog defines no translations for the default language '{0}'")]
    MissingDefaultLanguage(String),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
