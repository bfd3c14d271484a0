//! Synthesis session: spoken feedback, one utterance at a time.
//!
//! `speak()` while an utterance is in flight cancels it first. Completion
//! notifications carry the utterance id, so a cancelled utterance can never
//! report completion.

mod voice_selection;

#[cfg(test)]
mod tests;

pub use voice_selection::{VoiceSelection, select_voice};

use super::observer::{Subscribers, Subscription};
use super::platform::{SynthesisCapability, Utterance, UtteranceId, Voice};
use super::types::{SpeakingState, SynthesisEvent};
use crate::language::LanguageDescriptor;

/// Playback parameters applied to every utterance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeechParams {
    /// 0.1 - 10.0
    pub rate: f32,
    /// 0.0 - 2.0
    pub pitch: f32,
    /// 0.0 - 1.0
    pub volume: f32,
}

impl Default for SpeechParams {
    fn default() -> Self {
        Self {
            rate: 1.0,
            pitch: 1.0,
            volume: 1.0,
        }
    }
}

pub struct SynthesisSession {
    capability: Option<Box<dyn SynthesisCapability>>,
    params: SpeechParams,
    state: SpeakingState,
    language: LanguageDescriptor,
    voices: Vec<Voice>,
    selection: VoiceSelection,
    selected: Option<Voice>,
    voice_override: Option<Voice>,
    current: Option<UtteranceId>,
    next_id: u64,
    subscribers: Subscribers<SynthesisEvent>,
}

impl SynthesisSession {
    /// Create a session. Without a capability `speak`/`stop` are no-ops.
    pub fn new(
        capability: Option<Box<dyn SynthesisCapability>>,
        language: LanguageDescriptor,
        params: SpeechParams,
    ) -> Self {
        let voices = capability.as_ref().map(|c| c.voices()).unwrap_or_default();
        let mut session = Self {
            capability,
            params: SpeechParams::default(),
            state: SpeakingState::Idle,
            language,
            voices,
            selection: VoiceSelection::default(),
            selected: None,
            voice_override: None,
            current: None,
            next_id: 1,
            subscribers: Subscribers::default(),
        };
        session.set_rate(params.rate);
        session.set_pitch(params.pitch);
        session.set_volume(params.volume);
        session.reselect_voice();
        session
    }

    pub fn has_synthesis_support(&self) -> bool {
        self.capability.is_some()
    }

    pub fn state(&self) -> SpeakingState {
        self.state
    }

    pub fn is_speaking(&self) -> bool {
        self.state.is_speaking()
    }

    /// The utterance that may still report start/end
    pub fn current_utterance(&self) -> Option<UtteranceId> {
        self.current
    }

    pub fn params(&self) -> SpeechParams {
        self.params
    }

    pub fn language(&self) -> &LanguageDescriptor {
        &self.language
    }

    pub fn voices(&self) -> &[Voice] {
        &self.voices
    }

    /// Voice attached to the next utterance
    pub fn current_voice(&self) -> Option<&Voice> {
        self.voice_override.as_ref().or(self.selected.as_ref())
    }

    pub fn subscribe(&mut self) -> Subscription<SynthesisEvent> {
        self.subscribers.subscribe()
    }

    pub fn unsubscribe(&mut self, id: u64) -> bool {
        self.subscribers.unsubscribe(id)
    }

    /// Speak `text`, cancelling whatever is playing
    pub fn speak(&mut self, text: &str) -> Option<UtteranceId> {
        if self.capability.is_none() {
            tracing::debug!("Synthesis unsupported; speak ignored");
            return None;
        }

        self.cancel_current();

        let id = UtteranceId(self.next_id);
        self.next_id += 1;
        let utterance = Utterance {
            id,
            text: text.to_string(),
            rate: self.params.rate,
            pitch: self.params.pitch,
            volume: self.params.volume,
            locale: self.language.speech_locale.clone(),
            voice: self.current_voice().cloned(),
        };

        if let Some(cap) = self.capability.as_mut() {
            tracing::debug!("Speaking {} ({}): {}", id, utterance.locale, text);
            cap.speak(utterance);
        }
        self.current = Some(id);
        Some(id)
    }

    /// Cancel playback and go Idle immediately
    pub fn stop(&mut self) {
        if self.capability.is_none() {
            return;
        }
        self.cancel_current();
        self.set_state(SpeakingState::Idle);
    }

    pub fn handle_started(&mut self, id: UtteranceId) {
        if self.current != Some(id) {
            tracing::debug!("Ignoring start of stale utterance {}", id);
            return;
        }
        self.subscribers.emit(&SynthesisEvent::Started(id));
        self.set_state(SpeakingState::Speaking);
    }

    pub fn handle_ended(&mut self, id: UtteranceId) {
        if self.current != Some(id) {
            tracing::debug!("Ignoring end of stale utterance {}", id);
            return;
        }
        self.current = None;
        self.subscribers.emit(&SynthesisEvent::Finished(id));
        self.set_state(SpeakingState::Idle);
    }

    /// Returns false for errors of cancelled utterances, which are dropped
    pub fn handle_error(&mut self, id: UtteranceId, error: &str) -> bool {
        if self.current != Some(id) {
            tracing::debug!("Ignoring error of stale utterance {}: {}", id, error);
            return false;
        }
        tracing::warn!("Speech synthesis error on {}: {}", id, error);
        self.current = None;
        self.subscribers.emit(&SynthesisEvent::Error {
            id,
            error: error.to_string(),
        });
        self.set_state(SpeakingState::Idle);
        true
    }

    /// Switch language; a manual voice override is dropped
    pub fn set_language(&mut self, language: LanguageDescriptor) {
        if self.language == language {
            return;
        }
        self.language = language;
        self.voice_override = None;
        self.reselect_voice();
    }

    /// Reload the platform voice list
    pub fn voices_changed(&mut self) {
        let Some(cap) = self.capability.as_ref() else {
            return;
        };
        self.voices = cap.voices();
        self.selection.invalidate();
        self.reselect_voice();
    }

    pub fn set_voice(&mut self, voice: Voice) {
        self.voice_override = Some(voice);
    }

    pub fn set_rate(&mut self, rate: f32) {
        self.params.rate = rate.clamp(0.1, 10.0);
    }

    pub fn set_pitch(&mut self, pitch: f32) {
        self.params.pitch = pitch.clamp(0.0, 2.0);
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.params.volume = volume.clamp(0.0, 1.0);
    }

    fn cancel_current(&mut self) {
        if let Some(cap) = self.capability.as_mut() {
            cap.cancel();
        }
        if let Some(previous) = self.current.take() {
            self.subscribers.emit(&SynthesisEvent::Cancelled(previous));
        }
    }

    fn reselect_voice(&mut self) {
        self.selected = self.selection.get_or_select(&self.voices, &self.language);
        match &self.selected {
            Some(voice) => tracing::debug!(
                "Voice for {}: {} ({})",
                self.language.code,
                voice.name,
                voice.locale
            ),
            None if self.has_synthesis_support() => {
                tracing::debug!("No voice available yet for {}", self.language.code)
            }
            None => {}
        }
    }

    fn set_state(&mut self, state: SpeakingState) {
        if self.state != state {
            self.state = state;
            self.subscribers.emit(&SynthesisEvent::StateChanged(state));
        }
    }
}
