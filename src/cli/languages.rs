//! Languages command implementation

use anyhow::Result;

use voicenav::config::Config;
use voicenav::language::LanguageCatalog;

use super::listen::system_locale;

/// Print supported languages, marking the active one
pub fn languages_command(config: &Config, language: Option<&str>) -> Result<()> {
    let catalog = config.catalog(system_locale().as_deref())?;
    if let Some(code) = language {
        catalog.select(code)?;
    }
    let current = catalog.current_language();

    println!("{}:", catalog.translate("select_language"));
    for lang in catalog.supported_languages() {
        let marker = if lang.code == current.code { "*" } else { " " };
        println!(
            "{} {} {:<4} {:<8} {} ({})",
            marker, lang.flag, lang.code, lang.speech_locale, lang.display_name, lang.native_name
        );
    }

    Ok(())
}
