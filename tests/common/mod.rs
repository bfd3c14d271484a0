//! Shared test utilities: mock speech platforms and a navigator harness

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use voicenav::language::StaticCatalog;
use voicenav::voice::{
    Command, NavigationEvent, NavigatorConfig, Platform, PlatformEvent, RecognitionCapability,
    ResultEvent, SpeechResult, StartError, Subscription, SynthesisCapability, Utterance,
    UtteranceId, Voice, VoiceNavigator,
};

/// Everything the mock platform was asked to do
#[derive(Debug, Default)]
pub struct PlatformLog {
    pub configured: Option<(bool, bool)>,
    pub locales: Vec<String>,
    pub starts: usize,
    pub stops: usize,
    /// Results returned by successive `start()` calls; `Ok` once drained
    pub start_results: VecDeque<Result<(), StartError>>,
    pub spoken: Vec<Utterance>,
    pub cancels: usize,
    pub voices: Vec<Voice>,
}

pub type SharedLog = Arc<Mutex<PlatformLog>>;

pub struct MockRecognition(pub SharedLog);

impl RecognitionCapability for MockRecognition {
    fn configure(&mut self, continuous: bool, interim_results: bool) {
        self.0.lock().unwrap().configured = Some((continuous, interim_results));
    }

    fn set_locale(&mut self, locale: &str) {
        self.0.lock().unwrap().locales.push(locale.to_string());
    }

    fn start(&mut self) -> Result<(), StartError> {
        let mut log = self.0.lock().unwrap();
        log.starts += 1;
        log.start_results.pop_front().unwrap_or(Ok(()))
    }

    fn stop(&mut self) {
        self.0.lock().unwrap().stops += 1;
    }
}

pub struct MockSynthesis(pub SharedLog);

impl SynthesisCapability for MockSynthesis {
    fn speak(&mut self, utterance: Utterance) {
        self.0.lock().unwrap().spoken.push(utterance);
    }

    fn cancel(&mut self) {
        self.0.lock().unwrap().cancels += 1;
    }

    fn voices(&self) -> Vec<Voice> {
        self.0.lock().unwrap().voices.clone()
    }
}

pub fn default_voices() -> Vec<Voice> {
    vec![
        Voice::new("Alex", "en-US"),
        Voice::new("Samantha Female", "en-US"),
        Voice::new("Jorge", "es-ES"),
        Voice::new("Paulina", "es-MX"),
    ]
}

/// Platform with both capabilities sharing one log
pub fn mock_platform() -> (Platform, SharedLog) {
    let log = Arc::new(Mutex::new(PlatformLog {
        voices: default_voices(),
        ..PlatformLog::default()
    }));
    let platform = Platform::none()
        .with_recognition(MockRecognition(log.clone()))
        .with_synthesis(MockSynthesis(log.clone()));
    (platform, log)
}

/// Platform without recognition
pub fn synthesis_only_platform() -> (Platform, SharedLog) {
    let log = Arc::new(Mutex::new(PlatformLog {
        voices: default_voices(),
        ..PlatformLog::default()
    }));
    let platform = Platform::none().with_synthesis(MockSynthesis(log.clone()));
    (platform, log)
}

/// Command whose callback bumps a counter
pub fn counting_command(phrase_key: &str) -> (Command, Arc<AtomicUsize>) {
    let count = Arc::new(AtomicUsize::new(0));
    let counter = count.clone();
    let description_key = phrase_key.replace("voice.", "voice.desc.");
    let command = Command::new(phrase_key, description_key, move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    (command, count)
}

pub fn count(counter: &Arc<AtomicUsize>) -> usize {
    counter.load(Ordering::SeqCst)
}

pub fn final_result(text: &str) -> PlatformEvent {
    PlatformEvent::RecognitionResult(ResultEvent::single(SpeechResult::final_result(text)))
}

pub fn interim_result(text: &str) -> PlatformEvent {
    PlatformEvent::RecognitionResult(ResultEvent::single(SpeechResult::interim(text)))
}

/// A navigator over the mock platform with a controllable clock
pub struct Harness {
    pub nav: VoiceNavigator,
    pub log: SharedLog,
    pub events: Subscription<NavigationEvent>,
    pub catalog: Arc<StaticCatalog>,
    pub now: Instant,
}

impl Harness {
    pub fn new() -> Self {
        let (platform, log) = mock_platform();
        Self::with_platform(platform, log)
    }

    pub fn with_config(config: NavigatorConfig) -> Self {
        let (platform, log) = mock_platform();
        Self::build(platform, log, config)
    }

    pub fn with_platform(platform: Platform, log: SharedLog) -> Self {
        Self::build(platform, log, NavigatorConfig::default())
    }

    fn build(platform: Platform, log: SharedLog, config: NavigatorConfig) -> Self {
        let catalog = Arc::new(StaticCatalog::bundled());
        let mut nav = VoiceNavigator::new(platform, catalog.clone(), config);
        let events = nav.subscribe();
        Self {
            nav,
            log,
            events,
            catalog,
            now: Instant::now(),
        }
    }

    /// Enable, let recognition start, and confirm it from the platform side
    pub fn enable_and_listen(&mut self) {
        self.nav.enable();
        self.nav.poll(self.now);
        self.nav
            .handle_event(self.now, PlatformEvent::RecognitionStarted);
    }

    pub fn hear(&mut self, text: &str) {
        self.nav.handle_event(self.now, final_result(text));
    }

    pub fn send(&mut self, event: PlatformEvent) {
        self.nav.handle_event(self.now, event);
    }

    pub fn advance(&mut self, by: Duration) {
        self.now += by;
        self.nav.poll(self.now);
    }

    pub fn last_spoken(&self) -> Option<Utterance> {
        self.log.lock().unwrap().spoken.last().cloned()
    }

    pub fn current_utterance(&self) -> Option<UtteranceId> {
        self.nav.synthesis().current_utterance()
    }

    pub fn drain(&self) -> Vec<NavigationEvent> {
        self.events.poll_events()
    }
}
