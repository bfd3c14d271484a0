//! Terminal-backed speech capabilities.
//!
//! Recognition is fed typed lines through a [`ConsoleMic`]; synthesis prints
//! the text. Both report back through the platform event channel, the same
//! way a real backend would.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex};

use super::platform::{
    PlatformEvent, PlatformProbe, RecognitionCapability, ResultEvent, SpeechResult, StartError,
    SynthesisCapability, Utterance, Voice,
};
use crate::language::SUPPORTED_LANGUAGES;

/// Recognition capability driven by typed input
pub struct ConsoleRecognition {
    events: Sender<PlatformEvent>,
    running: Arc<AtomicBool>,
    locale: Arc<Mutex<String>>,
}

/// Input side of [`ConsoleRecognition`]
#[derive(Clone)]
pub struct ConsoleMic {
    events: Sender<PlatformEvent>,
    running: Arc<AtomicBool>,
    locale: Arc<Mutex<String>>,
}

impl ConsoleRecognition {
    pub fn new(events: Sender<PlatformEvent>) -> (Self, ConsoleMic) {
        let running = Arc::new(AtomicBool::new(false));
        let locale = Arc::new(Mutex::new(String::new()));
        let mic = ConsoleMic {
            events: events.clone(),
            running: running.clone(),
            locale: locale.clone(),
        };
        (
            Self {
                events,
                running,
                locale,
            },
            mic,
        )
    }
}

impl RecognitionCapability for ConsoleRecognition {
    fn configure(&mut self, continuous: bool, interim_results: bool) {
        tracing::debug!(
            "Console recognition configured (continuous={}, interim={})",
            continuous,
            interim_results
        );
    }

    fn set_locale(&mut self, locale: &str) {
        let mut current = self.locale.lock().unwrap_or_else(|e| e.into_inner());
        *current = locale.to_string();
    }

    fn start(&mut self) -> Result<(), StartError> {
        if self.running.swap(true, Ordering::SeqCst) {
            return Err(StartError::AlreadyStarted);
        }
        let _ = self.events.send(PlatformEvent::RecognitionStarted);
        Ok(())
    }

    fn stop(&mut self) {
        if self.running.swap(false, Ordering::SeqCst) {
            let _ = self.events.send(PlatformEvent::RecognitionEnded);
        }
    }
}

impl ConsoleMic {
    /// Deliver a typed line as a final result. Ignored while not listening.
    pub fn hear(&self, line: &str) -> bool {
        if !self.running.load(Ordering::SeqCst) {
            return false;
        }
        let event = ResultEvent::single(SpeechResult::final_result(line));
        self.events
            .send(PlatformEvent::RecognitionResult(event))
            .is_ok()
    }

    pub fn is_listening(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    pub fn locale(&self) -> String {
        self.locale.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

/// Synthesis capability that prints utterances
pub struct ConsoleSynthesis {
    events: Sender<PlatformEvent>,
}

impl ConsoleSynthesis {
    pub fn new(events: Sender<PlatformEvent>) -> Self {
        Self { events }
    }
}

impl SynthesisCapability for ConsoleSynthesis {
    fn speak(&mut self, utterance: Utterance) {
        let _ = self
            .events
            .send(PlatformEvent::UtteranceStarted(utterance.id));
        let voice = utterance
            .voice
            .as_ref()
            .map(|v| v.name.as_str())
            .unwrap_or("default");
        println!("🔊 [{} · {}] {}", utterance.locale, voice, utterance.text);
        let _ = self.events.send(PlatformEvent::UtteranceEnded(utterance.id));
    }

    fn cancel(&mut self) {}

    fn voices(&self) -> Vec<Voice> {
        SUPPORTED_LANGUAGES
            .iter()
            .map(|l| Voice::new(format!("Console {}", l.display_name), l.speech_locale.clone()))
            .collect()
    }
}

/// Probe that offers both console capabilities
pub struct ConsoleProbe {
    events: Sender<PlatformEvent>,
    mic: Option<ConsoleMic>,
}

impl ConsoleProbe {
    pub fn new(events: Sender<PlatformEvent>) -> Self {
        Self { events, mic: None }
    }

    /// The mic created by the last recognition probe
    pub fn take_mic(&mut self) -> Option<ConsoleMic> {
        self.mic.take()
    }
}

impl PlatformProbe for ConsoleProbe {
    fn recognition(&mut self) -> Option<Box<dyn RecognitionCapability>> {
        let (recognition, mic) = ConsoleRecognition::new(self.events.clone());
        self.mic = Some(mic);
        Some(Box::new(recognition))
    }

    fn synthesis(&mut self) -> Option<Box<dyn SynthesisCapability>> {
        Some(Box::new(ConsoleSynthesis::new(self.events.clone())))
    }
}
