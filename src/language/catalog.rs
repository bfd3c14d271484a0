//! Language catalog: active language plus key lookup.

use std::collections::HashMap;
use std::path::Path;
use std::sync::RwLock;

use serde::Deserialize;

use super::descriptor::{DEFAULT_LANGUAGE, LanguageDescriptor, SUPPORTED_LANGUAGES};
use crate::error::VoiceNavError;

/// Voice keys for English and Spanish
const BUNDLED_CATALOG: &str = include_str!("bundled.toml");

/// Supplies the active language and translations to the engine.
///
/// Implementations are shared between the UI and the engine, so selection
/// goes through `&self`.
pub trait LanguageCatalog: Send + Sync {
    /// The single active language
    fn current_language(&self) -> LanguageDescriptor;

    /// Translate `key` into the active language, falling back to the
    /// default language and then to the key itself
    fn translate(&self, key: &str) -> String;

    fn supported_languages(&self) -> Vec<LanguageDescriptor>;

    /// Make `code` the active language
    fn select(&self, code: &str) -> Result<LanguageDescriptor, VoiceNavError>;
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    default_language: Option<String>,
    #[serde(default)]
    languages: Vec<LanguageDescriptor>,
    #[serde(default)]
    translations: HashMap<String, HashMap<String, String>>,
}

/// In-memory catalog backed by per-language translation tables
#[derive(Debug)]
pub struct StaticCatalog {
    languages: Vec<LanguageDescriptor>,
    translations: HashMap<String, HashMap<String, String>>,
    default_code: String,
    current: RwLock<LanguageDescriptor>,
}

impl Default for StaticCatalog {
    fn default() -> Self {
        Self::new(SUPPORTED_LANGUAGES.clone())
    }
}

impl StaticCatalog {
    /// Catalog over `languages` with empty tables. The first language is
    /// the default.
    pub fn new(languages: Vec<LanguageDescriptor>) -> Self {
        let default = languages
            .iter()
            .find(|l| l.code == DEFAULT_LANGUAGE)
            .or_else(|| languages.first())
            .cloned()
            .unwrap_or_else(|| LanguageDescriptor::new(DEFAULT_LANGUAGE, "en-US", "English"));
        Self {
            default_code: default.code.clone(),
            current: RwLock::new(default),
            languages,
            translations: HashMap::new(),
        }
    }

    /// The catalog shipped with the crate
    pub fn bundled() -> Self {
        match Self::from_toml_str(BUNDLED_CATALOG) {
            Ok(catalog) => catalog,
            Err(e) => {
                tracing::error!("Bundled catalog is invalid: {}", e);
                Self::default()
            }
        }
    }

    /// Parse a TOML catalog.
    ///
    /// `languages` is optional and defaults to the built-in list.
    pub fn from_toml_str(content: &str) -> Result<Self, VoiceNavError> {
        let file: CatalogFile = toml::from_str(content)?;

        let languages = if file.languages.is_empty() {
            SUPPORTED_LANGUAGES.clone()
        } else {
            file.languages
        };
        let mut catalog = Self::new(languages);
        if let Some(code) = file.default_language {
            let default = catalog.find(&code)?;
            catalog.default_code = default.code.clone();
            catalog.current = RwLock::new(default);
        }
        if !file.translations.is_empty() && !file.translations.contains_key(&catalog.default_code)
        {
            return Err(VoiceNavError::MissingDefaultLanguage(catalog.default_code));
        }
        catalog.translations = file.translations;
        Ok(catalog)
    }

    pub fn from_file(path: &Path) -> Result<Self, VoiceNavError> {
        let content = std::fs::read_to_string(path).map_err(|source| VoiceNavError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Add or replace one translation
    pub fn with_translation(
        mut self,
        code: impl Into<String>,
        key: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        self.translations
            .entry(code.into())
            .or_default()
            .insert(key.into(), text.into());
        self
    }

    /// Pick the initial language: a stored preference if supported, else the
    /// primary subtag of the system locale if supported, else the default.
    pub fn detect_initial(&self, preferred: Option<&str>, system_locale: Option<&str>) -> LanguageDescriptor {
        let from_system = system_locale.and_then(|locale| locale.split(['-', '_']).next());
        let chosen = preferred
            .and_then(|code| self.find(code).ok())
            .or_else(|| from_system.and_then(|code| self.find(code).ok()));

        match chosen {
            Some(language) => {
                self.set_current(language.clone());
                language
            }
            None => self.current_language(),
        }
    }

    pub fn default_code(&self) -> &str {
        &self.default_code
    }

    fn find(&self, code: &str) -> Result<LanguageDescriptor, VoiceNavError> {
        self.languages
            .iter()
            .find(|l| l.code.eq_ignore_ascii_case(code))
            .cloned()
            .ok_or_else(|| VoiceNavError::UnknownLanguage(code.to_string()))
    }

    fn set_current(&self, language: LanguageDescriptor) {
        let mut current = self.current.write().unwrap_or_else(|e| e.into_inner());
        *current = language;
    }

    fn lookup(&self, code: &str, key: &str) -> Option<&str> {
        self.translations
            .get(code)
            .and_then(|table| table.get(key))
            .map(|s| s.as_str())
            .filter(|s| !s.is_empty())
    }
}

impl LanguageCatalog for StaticCatalog {
    fn current_language(&self) -> LanguageDescriptor {
        self.current.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn translate(&self, key: &str) -> String {
        let code = self.current_language().code;
        self.lookup(&code, key)
            .or_else(|| self.lookup(&self.default_code, key))
            .unwrap_or(key)
            .to_string()
    }

    fn supported_languages(&self) -> Vec<LanguageDescriptor> {
        self.languages.clone()
    }

    fn select(&self, code: &str) -> Result<LanguageDescriptor, VoiceNavError> {
        let language = self.find(code)?;
        self.set_current(language.clone());
        tracing::debug!("Active language set to {}", language);
        Ok(language)
    }
}
