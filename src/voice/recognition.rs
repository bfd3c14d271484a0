//! Recognition session over one continuous platform stream.

use std::time::{Duration, Instant};

use super::observer::{Subscribers, Subscription};
use super::platform::{RecognitionCapability, ResultEvent, StartError};
use super::types::{ListeningState, RecognitionEvent};

/// Recognition tuning
#[derive(Debug, Clone)]
pub struct RecognitionConfig {
    /// Delay between stopping a conflicting session and starting again
    pub restart_delay: Duration,
    /// Start-conflict retries before giving up
    pub max_start_retries: u32,
    /// Restart when the platform ends a session that is still wanted
    pub restart_on_end: bool,
}

impl Default for RecognitionConfig {
    fn default() -> Self {
        Self {
            restart_delay: Duration::from_millis(100),
            max_start_retries: 3,
            restart_on_end: false,
        }
    }
}

/// Owns the platform recognition stream and the last transcript
pub struct RecognitionSession {
    capability: Option<Box<dyn RecognitionCapability>>,
    config: RecognitionConfig,
    state: ListeningState,
    locale: String,
    transcript: String,
    /// Start was requested and not yet stopped
    wanted: bool,
    restart_at: Option<Instant>,
    retries: u32,
    subscribers: Subscribers<RecognitionEvent>,
}

impl RecognitionSession {
    /// Create a session. Without a capability every call is a no-op.
    pub fn new(
        capability: Option<Box<dyn RecognitionCapability>>,
        locale: impl Into<String>,
        config: RecognitionConfig,
    ) -> Self {
        let locale = locale.into();
        let mut capability = capability;
        if let Some(cap) = capability.as_mut() {
            cap.configure(true, true);
            cap.set_locale(&locale);
        }

        Self {
            capability,
            config,
            state: ListeningState::Idle,
            locale,
            transcript: String::new(),
            wanted: false,
            restart_at: None,
            retries: 0,
            subscribers: Subscribers::default(),
        }
    }

    pub fn has_recognition_support(&self) -> bool {
        self.capability.is_some()
    }

    pub fn state(&self) -> ListeningState {
        self.state
    }

    pub fn is_listening(&self) -> bool {
        self.state.is_listening()
    }

    /// Start has been requested and not stopped since
    pub fn is_active(&self) -> bool {
        self.wanted
    }

    /// Last transcript (lower-cased, trimmed)
    pub fn transcript(&self) -> &str {
        &self.transcript
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn subscribe(&mut self) -> Subscription<RecognitionEvent> {
        self.subscribers.subscribe()
    }

    pub fn unsubscribe(&mut self, id: u64) -> bool {
        self.subscribers.unsubscribe(id)
    }

    /// Begin listening.
    ///
    /// A session that is already running is stopped and restarted after the
    /// restart delay instead of failing.
    pub fn start(&mut self, now: Instant) {
        if self.capability.is_none() {
            tracing::debug!("Recognition unsupported; start ignored");
            return;
        }

        self.wanted = true;
        self.retries = 0;

        if self.state.is_listening() {
            self.schedule_restart(now);
        } else {
            self.try_start(now);
        }
    }

    /// Stop listening. Safe to call at any time.
    pub fn stop(&mut self) {
        let was_running = self.wanted || self.state != ListeningState::Idle;
        self.wanted = false;
        self.restart_at = None;
        self.retries = 0;

        if was_running {
            if let Some(cap) = self.capability.as_mut() {
                cap.stop();
            }
            tracing::debug!("Recognition stop requested");
        }
        self.set_state(ListeningState::Idle);
    }

    /// Update the locale in place.
    ///
    /// A running session is not restarted; the platform applies the new
    /// locale from the next phrase boundary on.
    pub fn set_locale(&mut self, locale: &str) {
        if self.locale == locale {
            return;
        }
        self.locale = locale.to_string();
        if let Some(cap) = self.capability.as_mut() {
            cap.set_locale(locale);
        }
        tracing::debug!("Recognition locale set to {}", locale);
    }

    /// Fire a pending restart if it is due
    pub fn poll(&mut self, now: Instant) {
        match self.restart_at {
            Some(at) if now >= at => {
                self.restart_at = None;
                if self.wanted {
                    self.try_start(now);
                }
            }
            _ => {}
        }
    }

    pub fn handle_started(&mut self) {
        if !self.wanted {
            tracing::debug!("Recognition started after stop; stopping again");
            if let Some(cap) = self.capability.as_mut() {
                cap.stop();
            }
            return;
        }
        self.retries = 0;
        self.set_state(ListeningState::Listening);
    }

    pub fn handle_ended(&mut self, now: Instant) {
        if self.restart_at.is_some() {
            // The stop half of a restart; keep the pending start.
            return;
        }

        if self.wanted && self.config.restart_on_end {
            tracing::debug!("Recognition ended while wanted; restarting");
            self.restart_at = Some(self.restart_deadline(now));
        } else {
            self.wanted = false;
        }
        self.set_state(ListeningState::Idle);
    }

    /// Process a result event.
    ///
    /// Returns the normalized transcript and whether it was final. Results
    /// after `stop()` and empty transcripts are dropped.
    pub fn handle_result(&mut self, event: &ResultEvent) -> Option<(String, bool)> {
        if !self.wanted {
            tracing::debug!("Recognition result after stop ignored");
            return None;
        }

        let Some((text, is_final)) = event.latest() else {
            tracing::debug!(
                "Malformed recognition result (index {} of {})",
                event.result_index,
                event.results.len()
            );
            return None;
        };

        let transcript = text.trim().to_lowercase();
        if transcript.is_empty() {
            return None;
        }

        self.transcript = transcript.clone();
        self.subscribers.emit(&RecognitionEvent::Result {
            transcript: transcript.clone(),
            is_final,
        });
        Some((transcript, is_final))
    }

    /// Surface a platform error. The session keeps running.
    ///
    /// Returns false if the error arrived after `stop()` and was dropped.
    pub fn handle_error(&mut self, error: &str) -> bool {
        if !self.wanted {
            tracing::debug!("Recognition error after stop ignored: {}", error);
            return false;
        }
        tracing::warn!("Speech recognition error: {}", error);
        self.subscribers.emit(&RecognitionEvent::Error {
            error: error.to_string(),
        });
        true
    }

    fn try_start(&mut self, now: Instant) {
        let Some(cap) = self.capability.as_mut() else {
            return;
        };

        match cap.start() {
            Ok(()) => tracing::debug!("Recognition start requested ({})", self.locale),
            Err(StartError::AlreadyStarted) => {
                if self.retries >= self.config.max_start_retries {
                    self.give_up(StartError::AlreadyStarted);
                } else {
                    self.retries += 1;
                    self.schedule_restart(now);
                }
            }
            Err(e) => self.give_up(e),
        }
    }

    fn schedule_restart(&mut self, now: Instant) {
        if let Some(cap) = self.capability.as_mut() {
            cap.stop();
        }
        self.restart_at = Some(self.restart_deadline(now));
        self.set_state(ListeningState::Erroring);
    }

    /// When a restart scheduled at `now` is due. A delay too large to
    /// represent restarts on the next poll.
    fn restart_deadline(&self, now: Instant) -> Instant {
        now.checked_add(self.config.restart_delay).unwrap_or_else(|| {
            tracing::warn!(
                "Restart delay {:?} out of range; restarting on next poll",
                self.config.restart_delay
            );
            now
        })
    }

    fn give_up(&mut self, error: StartError) {
        tracing::warn!("Speech recognition could not start: {}", error);
        self.wanted = false;
        self.restart_at = None;
        self.subscribers.emit(&RecognitionEvent::Error {
            error: error.to_string(),
        });
        self.set_state(ListeningState::Idle);
    }

    fn set_state(&mut self, state: ListeningState) {
        if self.state != state {
            self.state = state;
            self.subscribers.emit(&RecognitionEvent::StateChanged(state));
        }
    }
}
