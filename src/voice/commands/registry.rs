//! CommandRegistry - the active command set
//!
//! Holds the caller's commands for the current screen plus the two built-ins,
//! and matches utterances against all of them.

use super::command::{Command, CommandMatch};
use crate::language::LanguageCatalog;
use crate::voice::types::CommandListing;

/// Cached translated listing, valid for one language and one command set
#[derive(Debug, Clone)]
struct ListingCache {
    language: String,
    generation: u64,
    listings: Vec<CommandListing>,
}

/// Registry of voice commands
#[derive(Debug, Clone)]
pub struct CommandRegistry {
    commands: Vec<Command>,
    builtins: Vec<Command>,
    generation: u64,
    cache: Option<ListingCache>,
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRegistry {
    /// Create a registry holding only the built-ins
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            builtins: vec![Command::help(), Command::stop_listening()],
            generation: 0,
            cache: None,
        }
    }

    /// Replace the caller's command set.
    ///
    /// Commands whose phrase key duplicates an earlier one (or a built-in)
    /// are dropped.
    pub fn register(&mut self, commands: Vec<Command>) {
        let mut accepted: Vec<Command> = Vec::with_capacity(commands.len());

        for command in commands {
            let taken = accepted
                .iter()
                .chain(self.builtins.iter())
                .any(|c| c.phrase_key == command.phrase_key);
            if taken {
                tracing::warn!(
                    "Ignoring duplicate voice command '{}'",
                    command.phrase_key
                );
                continue;
            }
            accepted.push(command);
        }

        tracing::debug!("Registered {} voice commands", accepted.len());
        self.commands = accepted;
        self.generation += 1;
        self.cache = None;
    }

    /// Caller commands followed by the built-ins
    pub fn all(&self) -> impl Iterator<Item = &Command> {
        self.commands.iter().chain(self.builtins.iter())
    }

    pub fn len(&self) -> usize {
        self.commands.len() + self.builtins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Find every command whose translated phrase occurs in `utterance`.
    ///
    /// All matches are returned, in registration order, so overlapping
    /// synonyms ("sign out", "logout") both fire.
    pub fn match_utterance(
        &self,
        utterance: &str,
        catalog: &dyn LanguageCatalog,
    ) -> Vec<CommandMatch> {
        self.all()
            .filter_map(|command| {
                command.matches(utterance, catalog).map(|phrase| CommandMatch {
                    command: command.clone(),
                    phrase,
                })
            })
            .collect()
    }

    /// Translated phrases of all commands, for the spoken help list
    pub fn phrases(&self, catalog: &dyn LanguageCatalog) -> Vec<String> {
        self.all().map(|c| catalog.translate(&c.phrase_key)).collect()
    }

    /// Translated phrase + description of every command.
    ///
    /// Recomputed only when the language or the registered set changes.
    pub fn available_commands(&mut self, catalog: &dyn LanguageCatalog) -> &[CommandListing] {
        let language = catalog.current_language().code;
        let stale = match &self.cache {
            Some(cache) => cache.language != language || cache.generation != self.generation,
            None => true,
        };

        if stale {
            let listings = self
                .all()
                .map(|c| CommandListing {
                    phrase: catalog.translate(&c.phrase_key),
                    description: catalog.translate(&c.description_key),
                })
                .collect();
            self.cache = Some(ListingCache {
                language,
                generation: self.generation,
                listings,
            });
        }

        match &self.cache {
            Some(cache) => &cache.listings,
            None => &[],
        }
    }
}
