//! VoiceNav - voice command navigation
//!
//! VoiceNav turns continuous speech recognition into named navigation
//! actions and gives spoken feedback through speech synthesis. Speech
//! backends plug in through two capability traits; everything else (command
//! matching, lifecycle, voice selection, localized phrases) lives here.
//!
//! ## Driving the engine
//!
//! The engine is single-threaded. The host:
//!
//! 1. Builds a [`voice::Platform`] from whatever speech backends exist
//! 2. Creates a [`voice::VoiceNavigator`] with a [`language::LanguageCatalog`]
//! 3. Feeds platform notifications to `handle_event` and calls `poll` once
//!    per frame or tick

pub mod config;
pub mod domain;
pub mod error;
pub mod language;
pub mod voice;

pub use domain::*;
pub use error::VoiceNavError;
