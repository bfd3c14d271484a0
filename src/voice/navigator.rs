//! Voice navigator: the single enable/disable switch for the engine.
//!
//! The enabled flag decides whether recognition runs. `enable()` only flips
//! the flag; recognition is started by the next `poll()`. `disable()` flips
//! the flag and stops both sessions before returning, and every platform
//! event that arrives afterwards is dropped.

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Serialize;

use super::commands::{Command, CommandKind, CommandMatch, CommandRegistry};
use super::indicator::TransientIndicator;
use super::observer::{Subscribers, Subscription};
use super::platform::{Platform, PlatformEvent, UtteranceId};
use super::recognition::{RecognitionConfig, RecognitionSession};
use super::synthesis::{SpeechParams, SynthesisSession};
use super::types::{
    CommandListing, ErrorSource, NavigationEvent, RecognitionEvent, SynthesisEvent,
};
use crate::error::VoiceNavError;
use crate::language::LanguageCatalog;

const WELCOME_KEY: &str = "voice.welcome";
const HELP_MESSAGE_KEY: &str = "voice.help_message";
const DISABLED_KEY: &str = "voice.disabled";

/// Navigator configuration
#[derive(Debug, Clone)]
pub struct NavigatorConfig {
    /// Spoken on enable; defaults to the catalog's `voice.welcome`
    pub welcome_message: Option<String>,
    pub speech: SpeechParams,
    pub recognition: RecognitionConfig,
    pub help_overlay_ttl: Duration,
    pub transcript_ttl: Duration,
    pub command_hint_ttl: Duration,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            welcome_message: None,
            speech: SpeechParams {
                rate: 0.9,
                ..SpeechParams::default()
            },
            recognition: RecognitionConfig::default(),
            help_overlay_ttl: Duration::from_secs(10),
            transcript_ttl: Duration::from_secs(5),
            command_hint_ttl: Duration::from_secs(20),
        }
    }
}

/// Everything the UI renders, in one value
#[derive(Debug, Clone, Serialize)]
pub struct NavigatorSnapshot {
    pub enabled: bool,
    pub listening: bool,
    pub speaking: bool,
    pub transcript: String,
    pub last_command: Option<String>,
    pub commands: Vec<CommandListing>,
    pub help_visible: bool,
    pub transcript_visible: bool,
    pub hint_visible: bool,
    pub has_recognition_support: bool,
    pub has_synthesis_support: bool,
    pub language: String,
}

pub struct VoiceNavigator {
    config: NavigatorConfig,
    catalog: Arc<dyn LanguageCatalog>,
    registry: CommandRegistry,
    recognition: RecognitionSession,
    synthesis: SynthesisSession,
    recognition_events: Subscription<RecognitionEvent>,
    synthesis_events: Subscription<SynthesisEvent>,
    enabled: bool,
    /// Enabled flag changed and recognition has not caught up yet
    recognition_dirty: bool,
    listening: bool,
    speaking: bool,
    last_command: Option<String>,
    language_code: String,
    help_overlay: TransientIndicator,
    transcript_bubble: TransientIndicator,
    command_hint: TransientIndicator,
    subscribers: Subscribers<NavigationEvent>,
}

impl VoiceNavigator {
    pub fn new(platform: Platform, catalog: Arc<dyn LanguageCatalog>, config: NavigatorConfig) -> Self {
        let language = catalog.current_language();
        let mut recognition = RecognitionSession::new(
            platform.recognition,
            language.speech_locale.clone(),
            config.recognition.clone(),
        );
        let mut synthesis = SynthesisSession::new(platform.synthesis, language.clone(), config.speech);
        let recognition_events = recognition.subscribe();
        let synthesis_events = synthesis.subscribe();

        Self {
            config,
            catalog,
            registry: CommandRegistry::new(),
            recognition,
            synthesis,
            recognition_events,
            synthesis_events,
            enabled: false,
            recognition_dirty: false,
            listening: false,
            speaking: false,
            last_command: None,
            language_code: language.code,
            help_overlay: TransientIndicator::default(),
            transcript_bubble: TransientIndicator::default(),
            command_hint: TransientIndicator::default(),
            subscribers: Subscribers::default(),
        }
    }

    /// Replace the caller's commands (e.g. on screen change)
    pub fn set_commands(&mut self, commands: Vec<Command>) {
        self.registry.register(commands);
    }

    pub fn subscribe(&mut self) -> Subscription<NavigationEvent> {
        self.subscribers.subscribe()
    }

    pub fn unsubscribe(&mut self, id: u64) -> bool {
        self.subscribers.unsubscribe(id)
    }

    /// Turn voice navigation on and speak the welcome message.
    ///
    /// Recognition starts on the next [`poll`](Self::poll).
    pub fn enable(&mut self) {
        if self.enabled {
            return;
        }
        tracing::info!("Voice navigation enabled ({})", self.language_code);
        self.enabled = true;
        self.recognition_dirty = true;
        self.subscribers.emit(&NavigationEvent::EnabledChanged(true));

        let welcome = self
            .config
            .welcome_message
            .clone()
            .unwrap_or_else(|| self.catalog.translate(WELCOME_KEY));
        self.synthesis.speak(&welcome);
        self.drain_session_events();
    }

    /// Turn voice navigation off, silencing any speech
    pub fn disable(&mut self) {
        self.turn_off(true);
    }

    pub fn toggle(&mut self) {
        if self.enabled {
            self.disable();
        } else {
            self.enable();
        }
    }

    /// Advance timers: pending recognition start/restart and overlay expiry.
    /// Call once per host frame or tick.
    pub fn poll(&mut self, now: Instant) {
        if self.recognition_dirty {
            self.reconcile_recognition(now);
        }
        self.recognition.poll(now);

        if self.help_overlay.expire(now) {
            self.subscribers.emit(&NavigationEvent::HelpOverlay {
                visible: false,
                commands: Vec::new(),
            });
        }
        if self.transcript_bubble.expire(now) {
            self.subscribers.emit(&NavigationEvent::TranscriptBubble {
                visible: false,
                text: String::new(),
            });
        }
        if self.command_hint.expire(now) {
            self.subscribers
                .emit(&NavigationEvent::CommandHint { visible: false });
        }

        self.drain_session_events();
    }

    /// Feed one platform notification into the engine
    pub fn handle_event(&mut self, now: Instant, event: PlatformEvent) {
        match event {
            PlatformEvent::RecognitionStarted => self.recognition.handle_started(),
            PlatformEvent::RecognitionEnded => self.recognition.handle_ended(now),
            PlatformEvent::RecognitionResult(result) => {
                if !self.enabled {
                    tracing::debug!("Recognition result while disabled ignored");
                } else if let Some((transcript, _)) = self.recognition.handle_result(&result) {
                    self.on_transcript(now, transcript);
                }
            }
            PlatformEvent::RecognitionError(error) => {
                self.recognition.handle_error(&error);
            }
            PlatformEvent::UtteranceStarted(id) => self.synthesis.handle_started(id),
            PlatformEvent::UtteranceEnded(id) => self.synthesis.handle_ended(id),
            PlatformEvent::UtteranceError { id, error } => {
                self.synthesis.handle_error(id, &error);
            }
            PlatformEvent::VoicesChanged => self.synthesis.voices_changed(),
        }
        self.drain_session_events();
    }

    /// Speak arbitrary feedback through the synthesis session
    pub fn speak(&mut self, text: &str) -> Option<UtteranceId> {
        let id = self.synthesis.speak(text);
        self.drain_session_events();
        id
    }

    pub fn stop_speaking(&mut self) {
        self.synthesis.stop();
        self.drain_session_events();
    }

    /// Show the first-use command hint. Returns false while disabled.
    pub fn show_command_hint(&mut self, now: Instant) -> bool {
        if !self.enabled {
            return false;
        }
        self.command_hint.show(now, self.config.command_hint_ttl);
        self.subscribers
            .emit(&NavigationEvent::CommandHint { visible: true });
        true
    }

    /// Select `code` in the catalog and reconfigure both sessions
    pub fn set_language(&mut self, code: &str) -> Result<(), VoiceNavError> {
        self.catalog.select(code)?;
        self.refresh_language();
        Ok(())
    }

    /// Re-apply the catalog's active language. Idempotent.
    pub fn refresh_language(&mut self) {
        let language = self.catalog.current_language();
        self.recognition.set_locale(&language.speech_locale);
        self.synthesis.set_language(language.clone());

        if self.language_code != language.code {
            tracing::info!("Voice language changed to {}", language);
            self.language_code = language.code.clone();
            self.subscribers.emit(&NavigationEvent::LanguageChanged {
                code: language.code,
            });
        }
    }

    /// Stop everything. No callback fires after this returns.
    pub fn shutdown(&mut self) {
        self.turn_off(true);
        self.recognition.stop();
        self.synthesis.stop();
        self.drain_session_events();
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_listening(&self) -> bool {
        self.recognition.is_listening()
    }

    pub fn is_speaking(&self) -> bool {
        self.synthesis.is_speaking()
    }

    pub fn transcript(&self) -> &str {
        self.recognition.transcript()
    }

    /// Phrase key of the last dispatched command
    pub fn last_command(&self) -> Option<&str> {
        self.last_command.as_deref()
    }

    pub fn has_recognition_support(&self) -> bool {
        self.recognition.has_recognition_support()
    }

    pub fn has_synthesis_support(&self) -> bool {
        self.synthesis.has_synthesis_support()
    }

    /// Both halves present; voice controls should be hidden otherwise
    pub fn has_voice_support(&self) -> bool {
        self.has_recognition_support() && self.has_synthesis_support()
    }

    pub fn help_visible(&self) -> bool {
        self.help_overlay.is_visible()
    }

    pub fn transcript_visible(&self) -> bool {
        self.transcript_bubble.is_visible()
    }

    pub fn hint_visible(&self) -> bool {
        self.command_hint.is_visible()
    }

    pub fn recognition(&self) -> &RecognitionSession {
        &self.recognition
    }

    pub fn synthesis(&self) -> &SynthesisSession {
        &self.synthesis
    }

    pub fn synthesis_mut(&mut self) -> &mut SynthesisSession {
        &mut self.synthesis
    }

    /// Translated phrase + description of every available command
    pub fn available_commands(&mut self) -> Vec<CommandListing> {
        self.registry.available_commands(self.catalog.as_ref()).to_vec()
    }

    pub fn snapshot(&mut self) -> NavigatorSnapshot {
        NavigatorSnapshot {
            enabled: self.enabled,
            listening: self.is_listening(),
            speaking: self.is_speaking(),
            transcript: self.transcript().to_string(),
            last_command: self.last_command.clone(),
            commands: self.available_commands(),
            help_visible: self.help_visible(),
            transcript_visible: self.transcript_visible(),
            hint_visible: self.hint_visible(),
            has_recognition_support: self.has_recognition_support(),
            has_synthesis_support: self.has_synthesis_support(),
            language: self.language_code.clone(),
        }
    }

    fn turn_off(&mut self, silence: bool) {
        if !self.enabled {
            return;
        }
        tracing::info!("Voice navigation disabled");
        self.enabled = false;
        self.recognition_dirty = true;
        self.subscribers.emit(&NavigationEvent::EnabledChanged(false));

        if silence {
            self.synthesis.stop();
        }
        self.reconcile_recognition(Instant::now());
        self.hide_overlays();
        self.drain_session_events();
    }

    /// The only path that starts or stops recognition
    fn reconcile_recognition(&mut self, now: Instant) {
        self.recognition_dirty = false;
        if self.enabled {
            if !self.recognition.is_active() {
                self.recognition.start(now);
            }
        } else {
            self.recognition.stop();
        }
    }

    fn on_transcript(&mut self, now: Instant, transcript: String) {
        self.subscribers
            .emit(&NavigationEvent::Transcript(transcript.clone()));
        self.transcript_bubble.show(now, self.config.transcript_ttl);
        self.subscribers.emit(&NavigationEvent::TranscriptBubble {
            visible: true,
            text: transcript.clone(),
        });

        let matches = self
            .registry
            .match_utterance(&transcript, self.catalog.as_ref());
        for matched in matches {
            if !self.enabled {
                tracing::debug!(
                    "Skipping '{}': disabled during dispatch",
                    matched.command.phrase_key
                );
                break;
            }
            self.dispatch(now, matched);
        }
    }

    fn dispatch(&mut self, now: Instant, matched: CommandMatch) {
        let CommandMatch { command, phrase } = matched;
        tracing::info!("Voice command '{}' ({})", phrase, command.phrase_key);

        match command.kind() {
            CommandKind::Custom => command.invoke(),
            CommandKind::Help => self.run_help(now),
            CommandKind::StopListening => self.run_stop_listening(),
        }

        self.last_command = Some(command.phrase_key.clone());
        self.subscribers.emit(&NavigationEvent::CommandExecuted {
            phrase_key: command.phrase_key,
            phrase,
        });
    }

    fn run_help(&mut self, now: Instant) {
        let phrases = self.registry.phrases(self.catalog.as_ref()).join(", ");
        let message = self
            .catalog
            .translate(HELP_MESSAGE_KEY)
            .replace("{commands}", &phrases);
        self.synthesis.speak(&message);

        self.help_overlay.show(now, self.config.help_overlay_ttl);
        let commands = self.available_commands();
        self.subscribers.emit(&NavigationEvent::HelpOverlay {
            visible: true,
            commands,
        });
    }

    fn run_stop_listening(&mut self) {
        let message = self.catalog.translate(DISABLED_KEY);
        self.synthesis.speak(&message);
        // Keep the confirmation audible
        self.turn_off(false);
    }

    fn hide_overlays(&mut self) {
        if self.help_overlay.hide() {
            self.subscribers.emit(&NavigationEvent::HelpOverlay {
                visible: false,
                commands: Vec::new(),
            });
        }
        if self.transcript_bubble.hide() {
            self.subscribers.emit(&NavigationEvent::TranscriptBubble {
                visible: false,
                text: String::new(),
            });
        }
        if self.command_hint.hide() {
            self.subscribers
                .emit(&NavigationEvent::CommandHint { visible: false });
        }
    }

    /// Forward session events as navigation events
    fn drain_session_events(&mut self) {
        let recognition_events: Vec<RecognitionEvent> = self.recognition_events.poll_events();
        for event in recognition_events {
            if let RecognitionEvent::Error { error } = event {
                self.subscribers.emit(&NavigationEvent::Error {
                    source: ErrorSource::Recognition,
                    message: error,
                });
            }
        }

        let synthesis_events: Vec<SynthesisEvent> = self.synthesis_events.poll_events();
        for event in synthesis_events {
            if let SynthesisEvent::Error { error, .. } = event {
                self.subscribers.emit(&NavigationEvent::Error {
                    source: ErrorSource::Synthesis,
                    message: error,
                });
            }
        }

        let listening = self.recognition.is_listening();
        if listening != self.listening {
            self.listening = listening;
            self.subscribers
                .emit(&NavigationEvent::ListeningChanged(listening));
        }
        let speaking = self.synthesis.is_speaking();
        if speaking != self.speaking {
            self.speaking = speaking;
            self.subscribers
                .emit(&NavigationEvent::SpeakingChanged(speaking));
        }
    }
}

impl Drop for VoiceNavigator {
    fn drop(&mut self) {
        self.recognition.stop();
        self.synthesis.stop();
    }
}
