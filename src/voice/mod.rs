//! Voice command navigation engine
//!
//! This module provides:
//! 1. A command registry matching spoken phrases (via the language catalog)
//! 2. A recognition session over one continuous platform stream
//! 3. A synthesis session that speaks one utterance at a time
//! 4. The navigator, which composes the three behind one enable/disable switch
//!
//! Architecture:
//! - Platform: capability traits plus the events a backend delivers
//! - RecognitionSession: start/stop/restart state machine, transcript
//! - SynthesisSession: last-write-wins playback, voice selection
//! - CommandRegistry: caller commands + built-ins (help, stop listening)
//! - VoiceNavigator: lifecycle, dispatch, transient indicators, UI events
//!
//! Everything runs on the caller's thread. Platform notifications enter via
//! `VoiceNavigator::handle_event` and timers advance in `VoiceNavigator::poll`.

pub mod commands;
pub mod console;
mod indicator;
mod navigator;
mod observer;
pub mod platform;
mod recognition;
pub mod synthesis;
mod types;


pub use commands::{Command, CommandKind, CommandRegistry};
pub use console::{ConsoleMic, ConsoleProbe, ConsoleRecognition, ConsoleSynthesis};
pub use indicator::TransientIndicator;
pub use navigator::{NavigatorConfig, NavigatorSnapshot, VoiceNavigator};
pub use observer::{Subscribers, Subscription};
pub use platform::{
    Platform, PlatformEvent, PlatformProbe, RecognitionCapability, ResultEvent, SpeechResult,
    StartError, SynthesisCapability, Utterance, UtteranceId, Voice,
};
pub use recognition::{RecognitionConfig, RecognitionSession};
pub use synthesis::{SpeechParams, SynthesisSession};
pub use types::{
    CommandListing, ErrorSource, ListeningState, NavigationEvent, RecognitionEvent,
    SpeakingState, SynthesisEvent,
};
