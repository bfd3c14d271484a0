//! Init command implementation

use anyhow::{bail, Result};
use std::path::PathBuf;

use voicenav::config::Config;

/// Default configuration content for voicenav init
pub const DEFAULT_CONFIG: &str = r#"# VoiceNav Configuration
# =======================
#
# Voice navigation: speak a command, the app navigates and answers out loud.

# ============================================================================
# SETTINGS
# ============================================================================
#
# Available options:
#   language                - Preferred language code (en, es, fr, de, it, pt,
#                             ja, ko, zh, ar, hi, ru, el). Falls back to the
#                             system locale, then English. (default: "en")
#   welcome_message         - Spoken when voice navigation turns on
#                             (default: the translated "voice.welcome" text)
#   rate / pitch / volume   - Speech synthesis parameters
#                             (defaults: 0.9 / 1.0 / 1.0)
#   restart_delay_ms        - Pause before retrying when the recognizer says it
#                             is already running (default: 100)
#   max_start_retries       - Give up after this many conflicting starts (default: 3)
#   restart_on_end          - Restart recognition when the platform ends it while
#                             navigation is still on (default: false)
#   help_overlay_secs       - Help overlay auto-hide (default: 10)
#   transcript_display_secs - "Heard" bubble auto-hide (default: 5)
#   command_hint_secs       - First-use hint auto-hide (default: 20)
#   catalog_path            - TOML file with [translations.<code>] tables that
#                             replaces the bundled phrases

[settings]
language = "en"
rate = 0.9
pitch = 1.0
volume = 1.0
restart_delay_ms = 100
max_start_retries = 3
restart_on_end = false
help_overlay_secs = 10
transcript_display_secs = 5
command_hint_secs = 20
# welcome_message = "Voice navigation is on. Say help to hear the commands."
# catalog_path = "/path/to/catalog.toml"
"#;

/// Write the default config to `config_path` (or the global path)
pub fn init_command(config_path: Option<PathBuf>, force: bool) -> Result<()> {
    let config_path = config_path.unwrap_or_else(Config::global_config_path);

    if config_path.exists() && !force {
        bail!(
            "Configuration already exists: {}\nUse --force to overwrite.",
            config_path.display()
        );
    }

    if let Some(parent) = config_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    std::fs::write(&config_path, DEFAULT_CONFIG)?;
    println!("Created: {}", config_path.display());

    Ok(())
}
