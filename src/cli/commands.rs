//! Commands command implementation

use std::sync::{Arc, Mutex};

use anyhow::Result;

use voicenav::config::Config;
use voicenav::language::LanguageCatalog;
use voicenav::voice::CommandRegistry;

use super::demo::{demo_commands, DemoState};
use super::listen::system_locale;

/// Print the voice commands available in the active language
pub fn commands_command(config: &Config, language: Option<&str>) -> Result<()> {
    let catalog = config.catalog(system_locale().as_deref())?;
    if let Some(code) = language {
        catalog.select(code)?;
    }

    let mut registry = CommandRegistry::new();
    registry.register(demo_commands(Arc::new(Mutex::new(DemoState::default()))));

    let listings = registry.available_commands(&catalog);
    let width = listings
        .iter()
        .map(|l| l.phrase.chars().count())
        .max()
        .unwrap_or(0);

    println!(
        "{} ({} commands)",
        catalog.translate("voice_commands"),
        listings.len()
    );
    for listing in listings {
        println!(
            "  \"{}\"{:pad$}  {}",
            listing.phrase,
            "",
            listing.description,
            pad = width - listing.phrase.chars().count()
        );
    }

    Ok(())
}
