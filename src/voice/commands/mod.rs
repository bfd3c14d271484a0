//! Voice commands - mapping spoken phrases to callbacks
//!
//! Phrases are catalog keys, translated into the active language at match
//! time. Example (English catalog):
//! - "voice.next" -> "next" -> advance one step
//! - "voice.go_to_home" -> "go to home" -> switch tab
//! - "voice.help" -> "help" -> built-in command list

mod command;
mod registry;

pub use command::{
    Command, CommandCallback, CommandKind, CommandMatch, HELP_PHRASE_KEY,
    STOP_LISTENING_PHRASE_KEY,
};
pub use registry::CommandRegistry;
