use super::*;
use crate::error::VoiceNavError;

#[test]
fn test_translate_uses_active_language() {
    let catalog = StaticCatalog::bundled();
    assert_eq!(catalog.translate("voice.next"), "next");

    catalog.select("es").unwrap();
    assert_eq!(catalog.translate("voice.next"), "siguiente");
}

#[test]
fn test_translate_falls_back_to_default_then_key() {
    let catalog = StaticCatalog::default()
        .with_translation("en", "voice.next", "next")
        .with_translation("fr", "voice.back", "retour");
    catalog.select("fr").unwrap();

    assert_eq!(catalog.translate("voice.back"), "retour");
    assert_eq!(catalog.translate("voice.next"), "next");
    assert_eq!(catalog.translate("voice.missing"), "voice.missing");
}

#[test]
fn test_empty_translation_counts_as_missing() {
    let catalog = StaticCatalog::default()
        .with_translation("en", "voice.help", "help")
        .with_translation("de", "voice.help", "");
    catalog.select("de").unwrap();

    assert_eq!(catalog.translate("voice.help"), "help");
}

#[test]
fn test_select_unknown_language() {
    let catalog = StaticCatalog::default();
    let err = catalog.select("xx").unwrap_err();
    assert!(matches!(err, VoiceNavError::UnknownLanguage(code) if code == "xx"));
    assert_eq!(catalog.current_language().code, "en");
}

#[test]
fn test_supported_languages_default_first() {
    let catalog = StaticCatalog::default();
    let languages = catalog.supported_languages();
    assert_eq!(languages.len(), 13);
    assert_eq!(languages[0].code, DEFAULT_LANGUAGE);
    assert_eq!(
        languages.iter().find(|l| l.code == "pt").map(|l| l.speech_locale.as_str()),
        Some("pt-BR")
    );
}

#[test]
fn test_detect_initial_prefers_stored_then_system() {
    let catalog = StaticCatalog::default();
    assert_eq!(catalog.detect_initial(Some("de"), Some("fr-FR")).code, "de");

    let catalog = StaticCatalog::default();
    assert_eq!(catalog.detect_initial(Some("xx"), Some("fr_FR")).code, "fr");

    let catalog = StaticCatalog::default();
    assert_eq!(catalog.detect_initial(None, Some("tlh-QO")).code, "en");
    assert_eq!(catalog.current_language().code, "en");
}

#[test]
fn test_catalog_from_toml() {
    let content = r#"
default_language = "en"

[translations.en]
"voice.next" = "next"

[translations.es]
"voice.next" = "siguiente"
"#;
    let catalog = StaticCatalog::from_toml_str(content).unwrap();
    catalog.select("es").unwrap();
    assert_eq!(catalog.translate("voice.next"), "siguiente");
}

#[test]
fn test_catalog_without_default_table_is_rejected() {
    let content = r#"
[translations.es]
"voice.next" = "siguiente"
"#;
    let err = StaticCatalog::from_toml_str(content).unwrap_err();
    assert!(matches!(err, VoiceNavError::MissingDefaultLanguage(code) if code == "en"));
}

#[test]
fn test_bundled_catalog_has_builtin_phrases() {
    let catalog = StaticCatalog::bundled();
    assert_eq!(catalog.translate("voice.help"), "help");
    assert_eq!(catalog.translate("voice.stop_listening"), "stop listening");
    assert!(catalog.translate("voice.help_message").contains("{commands}"));

    catalog.select("es").unwrap();
    assert_eq!(catalog.translate("voice.help"), "ayuda");
}

#[test]
fn test_bundled_catalog_translates_console_labels() {
    let keys = [
        "voice.main_welcome",
        "voice_commands",
        "voice_on",
        "voice_off",
        "enable_voice_navigation",
        "disable_voice_navigation",
        "select_language",
    ];
    let catalog = StaticCatalog::bundled();
    for code in ["en", "es"] {
        catalog.select(code).unwrap();
        for key in keys {
            assert_ne!(catalog.translate(key), key, "{} missing in {}", key, code);
        }
    }
    assert_eq!(catalog.translate("voice_off"), "Voz Desactivada");
}
