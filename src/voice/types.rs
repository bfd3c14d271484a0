//! Voice engine state and event types.

use serde::Serialize;

use super::platform::UtteranceId;

/// Recognition session state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ListeningState {
    /// Not listening
    #[default]
    Idle,
    /// Platform session is running and delivering results
    Listening,
    /// Start conflict; a delayed restart is pending
    Erroring,
}

impl ListeningState {
    /// Returns true if the platform is delivering results
    pub fn is_listening(&self) -> bool {
        matches!(self, ListeningState::Listening)
    }
}

impl std::fmt::Display for ListeningState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListeningState::Idle => write!(f, "Idle"),
            ListeningState::Listening => write!(f, "Listening"),
            ListeningState::Erroring => write!(f, "Erroring"),
        }
    }
}

/// Synthesis session state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeakingState {
    #[default]
    Idle,
    Speaking,
}

impl SpeakingState {
    pub fn is_speaking(&self) -> bool {
        matches!(self, SpeakingState::Speaking)
    }
}

impl std::fmt::Display for SpeakingState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpeakingState::Idle => write!(f, "Idle"),
            SpeakingState::Speaking => write!(f, "Speaking"),
        }
    }
}

/// Events emitted by the recognition session
#[derive(Debug, Clone, PartialEq)]
pub enum RecognitionEvent {
    /// A result was processed; `transcript` is lower-cased and trimmed
    Result { transcript: String, is_final: bool },
    /// The platform reported an error
    Error { error: String },
    /// Listening state changed
    StateChanged(ListeningState),
}

/// Events emitted by the synthesis session
#[derive(Debug, Clone, PartialEq)]
pub enum SynthesisEvent {
    /// Playback of the utterance began
    Started(UtteranceId),
    /// The utterance completed normally
    Finished(UtteranceId),
    /// The utterance was cancelled by a newer `speak()` or by `stop()`
    Cancelled(UtteranceId),
    /// Playback failed
    Error { id: UtteranceId, error: String },
    /// Speaking state changed
    StateChanged(SpeakingState),
}

/// Which half of the engine produced an error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorSource {
    Recognition,
    Synthesis,
}

impl std::fmt::Display for ErrorSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSource::Recognition => write!(f, "recognition"),
            ErrorSource::Synthesis => write!(f, "synthesis"),
        }
    }
}

/// A translated command, ready for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandListing {
    pub phrase: String,
    pub description: String,
}

/// Events emitted by the navigator to the UI
#[derive(Debug, Clone, PartialEq)]
pub enum NavigationEvent {
    EnabledChanged(bool),
    ListeningChanged(bool),
    SpeakingChanged(bool),
    /// A new transcript arrived (lower-cased, trimmed)
    Transcript(String),
    /// A command callback was dispatched
    CommandExecuted { phrase_key: String, phrase: String },
    /// Help overlay shown or hidden
    HelpOverlay {
        visible: bool,
        commands: Vec<CommandListing>,
    },
    /// Transient transcript bubble shown or hidden
    TranscriptBubble { visible: bool, text: String },
    /// First-use command hint shown or hidden
    CommandHint { visible: bool },
    LanguageChanged { code: String },
    Error { source: ErrorSource, message: String },
}
