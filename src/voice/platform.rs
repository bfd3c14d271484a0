//! Platform speech capabilities.
//!
//! The engine never talks to a speech backend directly. It consumes two narrow
//! capability traits and receives every platform notification as a
//! [`PlatformEvent`]. [`Platform::detect`] is the only place that decides
//! whether each capability exists.

use serde::Serialize;

/// Why the platform refused to start recognition
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StartError {
    /// A session is already running ("already started")
    #[error("recognition already started")]
    AlreadyStarted,

    /// Any other refusal (no microphone, permission denied, ...)
    #[error("recognition unavailable: {0}")]
    Unavailable(String),
}

/// Continuous speech recognition offered by the platform
pub trait RecognitionCapability: Send {
    /// Set session flags. Called once before the first start.
    fn configure(&mut self, continuous: bool, interim_results: bool);

    /// Change the recognition locale (e.g. "en-US")
    fn set_locale(&mut self, locale: &str);

    /// Begin delivering results
    fn start(&mut self) -> Result<(), StartError>;

    /// Request the session to end. Best-effort and safe to repeat.
    fn stop(&mut self);
}

/// Speech synthesis offered by the platform
pub trait SynthesisCapability: Send {
    /// Queue an utterance for playback
    fn speak(&mut self, utterance: Utterance);

    /// Drop the current utterance and anything queued
    fn cancel(&mut self);

    /// Voices currently known to the platform. May be empty until the
    /// platform reports [`PlatformEvent::VoicesChanged`].
    fn voices(&self) -> Vec<Voice>;
}

/// A synthetic speaker profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Voice {
    pub name: String,
    /// BCP 47 tag, e.g. "es-ES"
    pub locale: String,
}

impl Voice {
    pub fn new(name: impl Into<String>, locale: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            locale: locale.into(),
        }
    }
}

/// Identifies one `speak()` request
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct UtteranceId(pub u64);

impl std::fmt::Display for UtteranceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An utterance handed to the synthesis capability
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub id: UtteranceId,
    pub text: String,
    pub rate: f32,
    pub pitch: f32,
    pub volume: f32,
    pub locale: String,
    pub voice: Option<Voice>,
}

/// One indexed recognition result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechResult {
    /// Alternative transcripts, best first
    pub alternatives: Vec<String>,
    pub is_final: bool,
}

impl SpeechResult {
    pub fn interim(text: impl Into<String>) -> Self {
        Self {
            alternatives: vec![text.into()],
            is_final: false,
        }
    }

    pub fn final_result(text: impl Into<String>) -> Self {
        Self {
            alternatives: vec![text.into()],
            is_final: true,
        }
    }
}

/// A recognition result notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultEvent {
    /// Index of the result that changed
    pub result_index: usize,
    pub results: Vec<SpeechResult>,
}

impl ResultEvent {
    /// Single-result event, the common case
    pub fn single(result: SpeechResult) -> Self {
        Self {
            result_index: 0,
            results: vec![result],
        }
    }

    /// The best alternative of the result at `result_index`
    pub fn latest(&self) -> Option<(&str, bool)> {
        let result = self.results.get(self.result_index)?;
        let text = result.alternatives.first()?;
        Some((text.as_str(), result.is_final))
    }
}

/// Notifications delivered by the platform
#[derive(Debug, Clone, PartialEq)]
pub enum PlatformEvent {
    RecognitionStarted,
    RecognitionEnded,
    RecognitionResult(ResultEvent),
    RecognitionError(String),
    UtteranceStarted(UtteranceId),
    UtteranceEnded(UtteranceId),
    UtteranceError { id: UtteranceId, error: String },
    VoicesChanged,
}

/// Looks up the platform's speech capabilities without failing
pub trait PlatformProbe {
    fn recognition(&mut self) -> Option<Box<dyn RecognitionCapability>>;
    fn synthesis(&mut self) -> Option<Box<dyn SynthesisCapability>>;
}

/// The capabilities the platform actually offers
#[derive(Default)]
pub struct Platform {
    pub recognition: Option<Box<dyn RecognitionCapability>>,
    pub synthesis: Option<Box<dyn SynthesisCapability>>,
}

impl Platform {
    /// Run feature detection once
    pub fn detect(probe: &mut dyn PlatformProbe) -> Self {
        let platform = Self {
            recognition: probe.recognition(),
            synthesis: probe.synthesis(),
        };
        tracing::info!(
            "Speech capabilities detected: recognition={}, synthesis={}",
            platform.recognition.is_some(),
            platform.synthesis.is_some()
        );
        platform
    }

    /// A platform with neither capability
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_recognition(mut self, recognition: impl RecognitionCapability + 'static) -> Self {
        self.recognition = Some(Box::new(recognition));
        self
    }

    pub fn with_synthesis(mut self, synthesis: impl SynthesisCapability + 'static) -> Self {
        self.synthesis = Some(Box::new(synthesis));
        self
    }
}
