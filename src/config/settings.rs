//! Voice navigation settings

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::language::DEFAULT_LANGUAGE;
use crate::voice::{NavigatorConfig, RecognitionConfig, SpeechParams};

/// Voice navigation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceNavSettings {
    /// Preferred language code (en, es, fr, ...)
    #[serde(default = "default_language")]
    pub language: String,

    /// Spoken when navigation is enabled.
    /// Defaults to the catalog's `voice.welcome` text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub welcome_message: Option<String>,

    /// Speech rate (0.1-10.0)
    #[serde(default = "default_rate")]
    pub rate: f32,

    /// Speech pitch (0.0-2.0)
    #[serde(default = "default_pitch")]
    pub pitch: f32,

    /// Speech volume (0.0-1.0)
    #[serde(default = "default_volume")]
    pub volume: f32,

    /// Delay before retrying a conflicting recognition start (ms)
    #[serde(default = "default_restart_delay_ms")]
    pub restart_delay_ms: u64,

    /// Start-conflict retries before giving up
    #[serde(default = "default_max_start_retries")]
    pub max_start_retries: u32,

    /// Restart recognition when the platform ends it while still enabled
    #[serde(default)]
    pub restart_on_end: bool,

    /// Help overlay auto-hide (seconds)
    #[serde(default = "default_help_overlay_secs")]
    pub help_overlay_secs: u64,

    /// Transcript bubble auto-hide (seconds)
    #[serde(default = "default_transcript_display_secs")]
    pub transcript_display_secs: u64,

    /// First-use command hint auto-hide (seconds)
    #[serde(default = "default_command_hint_secs")]
    pub command_hint_secs: u64,

    /// Optional TOML catalog replacing the bundled translations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_path: Option<PathBuf>,
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

fn default_rate() -> f32 {
    0.9 // slightly slower for navigation feedback
}

fn default_pitch() -> f32 {
    1.0
}

fn default_volume() -> f32 {
    1.0
}

fn default_restart_delay_ms() -> u64 {
    100
}

fn default_max_start_retries() -> u32 {
    3
}

fn default_help_overlay_secs() -> u64 {
    10
}

fn default_transcript_display_secs() -> u64 {
    5
}

fn default_command_hint_secs() -> u64 {
    20
}

impl Default for VoiceNavSettings {
    fn default() -> Self {
        Self {
            language: default_language(),
            welcome_message: None,
            rate: default_rate(),
            pitch: default_pitch(),
            volume: default_volume(),
            restart_delay_ms: default_restart_delay_ms(),
            max_start_retries: default_max_start_retries(),
            restart_on_end: false,
            help_overlay_secs: default_help_overlay_secs(),
            transcript_display_secs: default_transcript_display_secs(),
            command_hint_secs: default_command_hint_secs(),
            catalog_path: None,
        }
    }
}

impl From<&VoiceNavSettings> for NavigatorConfig {
    fn from(settings: &VoiceNavSettings) -> Self {
        Self {
            welcome_message: settings.welcome_message.clone(),
            speech: SpeechParams {
                rate: settings.rate,
                pitch: settings.pitch,
                volume: settings.volume,
            },
            recognition: RecognitionConfig {
                restart_delay: Duration::from_millis(settings.restart_delay_ms),
                max_start_retries: settings.max_start_retries,
                restart_on_end: settings.restart_on_end,
            },
            help_overlay_ttl: Duration::from_secs(settings.help_overlay_secs),
            transcript_ttl: Duration::from_secs(settings.transcript_display_secs),
            command_hint_ttl: Duration::from_secs(settings.command_hint_secs),
        }
    }
}
