use std::sync::{Arc, Mutex};

use super::*;
use crate::language::{LanguageDescriptor, SUPPORTED_LANGUAGES};

#[derive(Default)]
struct Recorded {
    spoken: Vec<Utterance>,
    cancels: usize,
}

struct FakeSynth {
    log: Arc<Mutex<Recorded>>,
    voices: Arc<Mutex<Vec<Voice>>>,
}

impl SynthesisCapability for FakeSynth {
    fn speak(&mut self, utterance: Utterance) {
        self.log.lock().unwrap().spoken.push(utterance);
    }

    fn cancel(&mut self) {
        self.log.lock().unwrap().cancels += 1;
    }

    fn voices(&self) -> Vec<Voice> {
        self.voices.lock().unwrap().clone()
    }
}

fn language(code: &str) -> LanguageDescriptor {
    SUPPORTED_LANGUAGES
        .iter()
        .find(|l| l.code == code)
        .cloned()
        .unwrap()
}

fn session_with(voices: Vec<Voice>) -> (SynthesisSession, Arc<Mutex<Recorded>>, Arc<Mutex<Vec<Voice>>>) {
    let log = Arc::new(Mutex::new(Recorded::default()));
    let voice_list = Arc::new(Mutex::new(voices));
    let cap = FakeSynth {
        log: log.clone(),
        voices: voice_list.clone(),
    };
    let session = SynthesisSession::new(Some(Box::new(cap)), language("en"), SpeechParams::default());
    (session, log, voice_list)
}

#[test]
fn test_select_voice_prefers_female_in_language() {
    let voices = vec![
        Voice::new("Jorge", "es-ES"),
        Voice::new("Monica Female", "es-MX"),
        Voice::new("Samantha", "en-US"),
    ];
    let chosen = select_voice(&voices, &language("es")).unwrap();
    assert_eq!(chosen.name, "Monica Female");
}

#[test]
fn test_select_voice_first_language_match_without_female() {
    let voices = vec![Voice::new("Daniel", "en-GB"), Voice::new("Alex", "en-US")];
    assert_eq!(select_voice(&voices, &language("en")).unwrap().name, "Daniel");
}

#[test]
fn test_select_voice_falls_back_to_english_then_first() {
    let voices = vec![Voice::new("Anna", "de-DE"), Voice::new("Alex", "en-US")];
    assert_eq!(select_voice(&voices, &language("ja")).unwrap().name, "Alex");

    let voices = vec![Voice::new("Anna", "de-DE")];
    assert_eq!(select_voice(&voices, &language("ja")).unwrap().name, "Anna");

    assert!(select_voice(&[], &language("ja")).is_none());
}

#[test]
fn test_speak_while_speaking_cancels_previous() {
    let (mut session, log, _) = session_with(vec![]);
    let events = session.subscribe();

    let a = session.speak("first").unwrap();
    session.handle_started(a);
    let b = session.speak("second").unwrap();

    // A's late completion must not be observed
    session.handle_ended(a);
    session.handle_started(b);
    session.handle_ended(b);

    let finished: Vec<UtteranceId> = events
        .poll_events()
        .into_iter()
        .filter_map(|e| match e {
            SynthesisEvent::Finished(id) => Some(id),
            _ => None,
        })
        .collect();
    assert_eq!(finished, vec![b]);
    assert_eq!(log.lock().unwrap().spoken.len(), 2);
    assert_eq!(log.lock().unwrap().cancels, 2);
    assert!(!session.is_speaking());
}

#[test]
fn test_cancel_is_reported_explicitly() {
    let (mut session, _, _) = session_with(vec![]);
    let events = session.subscribe();

    let a = session.speak("first").unwrap();
    session.speak("second");

    assert!(events.poll_events().contains(&SynthesisEvent::Cancelled(a)));
}

#[test]
fn test_stop_forces_idle() {
    let (mut session, _, _) = session_with(vec![]);
    let a = session.speak("hello").unwrap();
    session.handle_started(a);
    assert!(session.is_speaking());

    session.stop();
    assert!(!session.is_speaking());
    assert!(session.current_utterance().is_none());

    // Late start of the cancelled utterance is ignored
    session.handle_started(a);
    assert!(!session.is_speaking());
}

#[test]
fn test_error_returns_to_idle() {
    let (mut session, _, _) = session_with(vec![]);
    let a = session.speak("hello").unwrap();
    session.handle_started(a);

    assert!(session.handle_error(a, "synthesis-failed"));
    assert_eq!(session.state(), SpeakingState::Idle);
    assert!(!session.handle_error(a, "synthesis-failed"));
}

#[test]
fn test_utterance_carries_params_locale_and_voice() {
    let (mut session, log, _) = session_with(vec![Voice::new("Alex", "en-US")]);
    session.set_rate(0.9);
    session.set_volume(3.0);
    session.speak("hello");

    let recorded = log.lock().unwrap();
    let utterance = &recorded.spoken[0];
    assert_eq!(utterance.rate, 0.9);
    assert_eq!(utterance.volume, 1.0);
    assert_eq!(utterance.locale, "en-US");
    assert_eq!(utterance.voice.as_ref().map(|v| v.name.as_str()), Some("Alex"));
}

#[test]
fn test_language_change_reselects_voice() {
    let (mut session, log, _) = session_with(vec![
        Voice::new("Alex", "en-US"),
        Voice::new("Paulina", "es-ES"),
    ]);
    session.set_voice(Voice::new("Custom", "en-GB"));

    session.set_language(language("es"));
    assert_eq!(session.current_voice().map(|v| v.name.as_str()), Some("Paulina"));

    session.speak("hola");
    assert_eq!(log.lock().unwrap().spoken[0].locale, "es-ES");
}

#[test]
fn test_voices_loaded_asynchronously() {
    let (mut session, _, voices) = session_with(vec![]);
    assert!(session.current_voice().is_none());

    voices.lock().unwrap().push(Voice::new("Alex", "en-US"));
    session.voices_changed();
    assert_eq!(session.current_voice().map(|v| v.name.as_str()), Some("Alex"));
}

#[test]
fn test_without_capability_is_noop() {
    let mut session = SynthesisSession::new(None, language("en"), SpeechParams::default());
    assert!(!session.has_synthesis_support());
    assert!(session.speak("hello").is_none());
    session.stop();
    assert!(!session.is_speaking());
}
