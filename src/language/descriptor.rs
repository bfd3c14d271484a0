//! Language descriptors and the supported language list.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// A language the UI and both speech capabilities can run in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageDescriptor {
    /// Primary subtag, e.g. "es"
    pub code: String,
    /// Locale handed to recognition and synthesis, e.g. "es-ES"
    pub speech_locale: String,
    /// English display name
    pub display_name: String,
    #[serde(default)]
    pub native_name: String,
    #[serde(default)]
    pub flag: String,
}

impl LanguageDescriptor {
    pub fn new(
        code: impl Into<String>,
        speech_locale: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        let display_name = display_name.into();
        Self {
            code: code.into(),
            speech_locale: speech_locale.into(),
            native_name: display_name.clone(),
            display_name,
            flag: String::new(),
        }
    }

    fn full(code: &str, locale: &str, name: &str, native: &str, flag: &str) -> Self {
        Self {
            code: code.to_string(),
            speech_locale: locale.to_string(),
            display_name: name.to_string(),
            native_name: native.to_string(),
            flag: flag.to_string(),
        }
    }
}

impl std::fmt::Display for LanguageDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.display_name, self.speech_locale)
    }
}

/// Code of the fallback language for translations and initial selection
pub const DEFAULT_LANGUAGE: &str = "en";

/// Languages offered out of the box. The first entry is the default.
pub static SUPPORTED_LANGUAGES: Lazy<Vec<LanguageDescriptor>> = Lazy::new(|| {
    vec![
        LanguageDescriptor::full("en", "en-US", "English", "English", "🇺🇸"),
        LanguageDescriptor::full("es", "es-ES", "Spanish", "Español", "🇪🇸"),
        LanguageDescriptor::full("fr", "fr-FR", "French", "Français", "🇫🇷"),
        LanguageDescriptor::full("de", "de-DE", "German", "Deutsch", "🇩🇪"),
        LanguageDescriptor::full("it", "it-IT", "Italian", "Italiano", "🇮🇹"),
        LanguageDescriptor::full("pt", "pt-BR", "Portuguese", "Português", "🇧🇷"),
        LanguageDescriptor::full("ja", "ja-JP", "Japanese", "日本語", "🇯🇵"),
        LanguageDescriptor::full("ko", "ko-KR", "Korean", "한국어", "🇰🇷"),
        LanguageDescriptor::full("zh", "zh-CN", "Chinese", "中文", "🇨🇳"),
        LanguageDescriptor::full("ar", "ar-SA", "Arabic", "العربية", "🇸🇦"),
        LanguageDescriptor::full("hi", "hi-IN", "Hindi", "हिन्दी", "🇮🇳"),
        LanguageDescriptor::full("ru", "ru-RU", "Russian", "Русский", "🇷🇺"),
        LanguageDescriptor::full("el", "el-GR", "Greek", "Ελληνικά", "🇬🇷"),
    ]
});
