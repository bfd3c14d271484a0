use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::voice::NavigationEvent;

/// The kind of voice navigation activity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogEventKind {
    /// Something was heard
    Transcript,
    /// A command was dispatched
    Command,
    /// Synthesis started or stopped speaking
    Speech,
    /// Recognition or synthesis reported an error
    Error,
    /// Lifecycle (enable/disable, listening, language, overlays)
    System,
}

impl std::fmt::Display for LogEventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogEventKind::Transcript => write!(f, "heard"),
            LogEventKind::Command => write!(f, "command"),
            LogEventKind::Speech => write!(f, "speech"),
            LogEventKind::Error => write!(f, "error"),
            LogEventKind::System => write!(f, "system"),
        }
    }
}

/// One entry in the voice navigation activity log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEvent {
    /// When this event occurred
    pub timestamp: DateTime<Utc>,

    /// The kind of event
    pub kind: LogEventKind,

    /// Short summary (e.g., "go back")
    pub summary: String,

    /// Extra detail, such as the error source
    pub content: Option<String>,

    /// Phrase key of the dispatched command
    pub phrase_key: Option<String>,
}

impl LogEvent {
    /// Create a new log event
    pub fn new(kind: LogEventKind, summary: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            kind,
            summary: summary.into(),
            content: None,
            phrase_key: None,
        }
    }

    pub fn transcript(text: impl Into<String>) -> Self {
        Self::new(LogEventKind::Transcript, text)
    }

    /// Create a command event
    pub fn command(phrase_key: impl Into<String>, phrase: impl Into<String>) -> Self {
        let mut event = Self::new(LogEventKind::Command, phrase);
        event.phrase_key = Some(phrase_key.into());
        event
    }

    pub fn speech(summary: impl Into<String>) -> Self {
        Self::new(LogEventKind::Speech, summary)
    }

    /// Create an error event
    pub fn error(summary: impl Into<String>) -> Self {
        Self::new(LogEventKind::Error, summary)
    }

    /// Create a system event
    pub fn system(summary: impl Into<String>) -> Self {
        Self::new(LogEventKind::System, summary)
    }

    /// Add content to the event
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Activity record for a navigation event.
    ///
    /// Returns `None` for events that only hide UI (overlay expiry) and for
    /// transcript bubbles, which duplicate the transcript itself.
    pub fn from_navigation(event: &NavigationEvent) -> Option<Self> {
        let log = match event {
            NavigationEvent::EnabledChanged(true) => Self::system("Voice navigation enabled"),
            NavigationEvent::EnabledChanged(false) => Self::system("Voice navigation disabled"),
            NavigationEvent::ListeningChanged(true) => Self::system("Listening"),
            NavigationEvent::ListeningChanged(false) => Self::system("Stopped listening"),
            NavigationEvent::SpeakingChanged(true) => Self::speech("Speaking"),
            NavigationEvent::SpeakingChanged(false) => Self::speech("Finished speaking"),
            NavigationEvent::Transcript(text) => Self::transcript(text.clone()),
            NavigationEvent::CommandExecuted { phrase_key, phrase } => {
                Self::command(phrase_key.clone(), phrase.clone())
            }
            NavigationEvent::HelpOverlay {
                visible: true,
                commands,
            } => {
                let listed: Vec<&str> = commands.iter().map(|c| c.phrase.as_str()).collect();
                Self::system("Help shown").with_content(listed.join(", "))
            }
            NavigationEvent::CommandHint { visible: true } => {
                Self::system("Say \"help\" to hear the available commands")
            }
            NavigationEvent::LanguageChanged { code } => {
                Self::system(format!("Language changed to {}", code))
            }
            NavigationEvent::Error { source, message } => {
                Self::error(message.clone()).with_content(source.to_string())
            }
            NavigationEvent::HelpOverlay { visible: false, .. }
            | NavigationEvent::CommandHint { visible: false }
            | NavigationEvent::TranscriptBubble { .. } => return None,
        };
        Some(log)
    }
}

impl std::fmt::Display for LogEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [{}] {}",
            self.timestamp.format("%H:%M:%S"),
            self.kind,
            self.summary
        )?;
        if let Some(key) = &self.phrase_key {
            write!(f, " ({})", key)?;
        }
        if let Some(content) = &self.content {
            write!(f, ": {}", content)?;
        }
        Ok(())
    }
}
