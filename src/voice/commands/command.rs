//! Command type and phrase matching
//!
//! A command is identified by its phrase key. The spoken phrase is never
//! stored; it is translated through the catalog on every match so a language
//! switch takes effect immediately.

use std::sync::Arc;

use crate::language::LanguageCatalog;

/// Callback run when a command's phrase is heard
pub type CommandCallback = Arc<dyn Fn() + Send + Sync>;

/// Phrase key of the built-in help command
pub const HELP_PHRASE_KEY: &str = "voice.help";
/// Phrase key of the built-in stop-listening command
pub const STOP_LISTENING_PHRASE_KEY: &str = "voice.stop_listening";

/// What happens when a command matches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    /// Caller-supplied callback
    Custom,
    /// Built-in: speak and show the command list
    Help,
    /// Built-in: confirm and disable the engine
    StopListening,
}

/// A voice-triggerable command
#[derive(Clone)]
pub struct Command {
    /// Catalog key of the spoken phrase; also the command's identity
    pub phrase_key: String,
    /// Catalog key of the human description
    pub description_key: String,
    kind: CommandKind,
    callback: Option<CommandCallback>,
}

impl std::fmt::Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Command")
            .field("phrase_key", &self.phrase_key)
            .field("description_key", &self.description_key)
            .field("kind", &self.kind)
            .finish()
    }
}

impl Command {
    /// Create a caller command
    pub fn new(
        phrase_key: impl Into<String>,
        description_key: impl Into<String>,
        callback: impl Fn() + Send + Sync + 'static,
    ) -> Self {
        Self {
            phrase_key: phrase_key.into(),
            description_key: description_key.into(),
            kind: CommandKind::Custom,
            callback: Some(Arc::new(callback)),
        }
    }

    pub(crate) fn help() -> Self {
        Self {
            phrase_key: HELP_PHRASE_KEY.to_string(),
            description_key: "voice.desc.help".to_string(),
            kind: CommandKind::Help,
            callback: None,
        }
    }

    pub(crate) fn stop_listening() -> Self {
        Self {
            phrase_key: STOP_LISTENING_PHRASE_KEY.to_string(),
            description_key: "voice.desc.stop_listening".to_string(),
            kind: CommandKind::StopListening,
            callback: None,
        }
    }

    pub fn kind(&self) -> CommandKind {
        self.kind
    }

    pub fn is_builtin(&self) -> bool {
        self.kind != CommandKind::Custom
    }

    /// Run the caller callback. Built-ins have none; the navigator runs them.
    pub fn invoke(&self) {
        if let Some(callback) = &self.callback {
            callback();
        }
    }

    /// Translated, lower-cased phrase for the active language
    pub fn phrase(&self, catalog: &dyn LanguageCatalog) -> String {
        catalog.translate(&self.phrase_key).trim().to_lowercase()
    }

    /// Check whether `utterance` contains this command's phrase.
    ///
    /// Returns the matched phrase. Matching is a case-insensitive substring
    /// test, so "go back now" matches "back". An empty phrase never matches.
    pub fn matches(&self, utterance: &str, catalog: &dyn LanguageCatalog) -> Option<String> {
        let phrase = self.phrase(catalog);
        if phrase.is_empty() {
            return None;
        }

        if utterance.to_lowercase().contains(&phrase) {
            Some(phrase)
        } else {
            None
        }
    }
}

/// A command whose phrase was found in an utterance
#[derive(Debug, Clone)]
pub struct CommandMatch {
    pub command: Command,
    /// The translated phrase that was found
    pub phrase: String,
}
