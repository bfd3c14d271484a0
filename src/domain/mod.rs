//! Core domain types for VoiceNav

mod log_event;

pub use log_event::{LogEvent, LogEventKind};
