//! Voice selection for the active language.

use std::collections::HashMap;

use crate::language::LanguageDescriptor;
use crate::voice::platform::Voice;

/// Pick the best voice for `language`.
///
/// 1. Voices whose locale starts with the language code or speech locale,
///    preferring a name containing "female" or "woman"
/// 2. Any English voice
/// 3. The first voice
pub fn select_voice(voices: &[Voice], language: &LanguageDescriptor) -> Option<Voice> {
    let matching: Vec<&Voice> = voices
        .iter()
        .filter(|v| {
            v.locale.starts_with(&language.code) || v.locale.starts_with(&language.speech_locale)
        })
        .collect();

    if !matching.is_empty() {
        let female = matching.iter().find(|v| {
            let name = v.name.to_lowercase();
            name.contains("female") || name.contains("woman")
        });
        return female.or(matching.first()).map(|v| (*v).clone());
    }

    voices
        .iter()
        .find(|v| v.locale.starts_with("en"))
        .or(voices.first())
        .cloned()
}

/// Per-language cache of [`select_voice`] results.
///
/// Valid for one voice list; cleared when the platform's voices change.
#[derive(Debug, Clone, Default)]
pub struct VoiceSelection {
    by_language: HashMap<String, Option<Voice>>,
}

impl VoiceSelection {
    pub fn get_or_select(&mut self, voices: &[Voice], language: &LanguageDescriptor) -> Option<Voice> {
        self.by_language
            .entry(language.code.clone())
            .or_insert_with(|| select_voice(voices, language))
            .clone()
    }

    pub fn invalidate(&mut self) {
        self.by_language.clear();
    }
}
