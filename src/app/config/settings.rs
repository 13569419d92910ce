use serde::{Deserialize, Serialize};

use crate::app::keys::KeyConfig;
use crate::gateway::Endpoints;

/// Longest crossfade the settings stepper allows.
pub const MAX_CROSSFADE_SECS: u32 = 12;

/// User settings, stored in `config.toml`.
/// Missing keys fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_true")]
    pub show_panel: bool,
    #[serde(default)]
    pub auto_translate: bool,
    #[serde(default = "default_true")]
    pub fetch_metadata: bool,
    #[serde(default = "default_translation_lang")]
    pub translation_lang: String,
    #[serde(default = "default_crossfade")]
    pub crossfade_duration: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genius_key: Option<String>,
    #[serde(default)]
    pub endpoints: Endpoints,
    #[serde(default)]
    pub keys: KeyConfig,
}

fn default_true() -> bool {
    true
}

fn default_translation_lang() -> String {
    "en".to_string()
}

fn default_crossfade() -> u32 {
    5
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            show_panel: true,
            auto_translate: false,
            fetch_metadata: true,
            translation_lang: default_translation_lang(),
            crossfade_duration: default_crossfade(),
            genius_key: None,
            endpoints: Endpoints::default(),
            keys: KeyConfig::default(),
        }
    }
}

/// One toggleable row in the settings overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingField {
    ShowPanel,
    AutoTranslate,
    FetchMetadata,
    TranslationLang,
    CrossfadeDuration,
}

impl SettingField {
    pub const ALL: [SettingField; 5] = [
        SettingField::ShowPanel,
        SettingField::AutoTranslate,
        SettingField::FetchMetadata,
        SettingField::TranslationLang,
        SettingField::CrossfadeDuration,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SettingField::ShowPanel => "Show lyrics panel",
            SettingField::AutoTranslate => "Auto-translate lyrics",
            SettingField::FetchMetadata => "Fetch track info",
            SettingField::TranslationLang => "Translation language",
            SettingField::CrossfadeDuration => "Crossfade (seconds)",
        }
    }
}

impl Settings {
    /// Genius key, with `GENIUS_ACCESS_TOKEN` taking precedence over the file.
    pub fn resolved_genius_key(&self) -> Option<String> {
        std::env::var("GENIUS_ACCESS_TOKEN")
            .ok()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| self.genius_key.clone())
    }

    /// Flip a boolean field or step a value field. `forward` picks the
    /// direction for steppers.
    pub fn adjust(&mut self, field: SettingField, forward: bool) {
        match field {
            SettingField::ShowPanel => self.show_panel = !self.show_panel,
            SettingField::AutoTranslate => self.auto_translate = !self.auto_translate,
            SettingField::FetchMetadata => self.fetch_metadata = !self.fetch_metadata,
            SettingField::TranslationLang => {
                self.translation_lang =
                    crate::translate::cycle_language(&self.translation_lang, forward).to_string();
            }
            SettingField::CrossfadeDuration => {
                self.crossfade_duration = if forward {
                    (self.crossfade_duration + 1).min(MAX_CROSSFADE_SECS)
                } else {
                    self.crossfade_duration.saturating_sub(1)
                };
            }
        }
    }

    pub fn display_value(&self, field: SettingField) -> String {
        let on_off = |b: bool| (if b { "on" } else { "off" }).to_string();
        match field {
            SettingField::ShowPanel => on_off(self.show_panel),
            SettingField::AutoTranslate => on_off(self.auto_translate),
            SettingField::FetchMetadata => on_off(self.fetch_metadata),
            SettingField::TranslationLang => {
                crate::translate::language_name(&self.translation_lang).to_string()
            }
            SettingField::CrossfadeDuration => format!("{}s", self.crossfade_duration),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_keys_use_defaults() {
        let s: Settings = toml::from_str("auto_translate = true\n").unwrap();
        assert!(s.show_panel);
        assert!(s.auto_translate);
        assert!(s.fetch_metadata);
        assert_eq!(s.translation_lang, "en");
        assert_eq!(s.crossfade_duration, 5);
        assert_eq!(s.genius_key, None);
        assert_eq!(s.endpoints, Endpoints::default());
    }

    #[test]
    fn test_toml_round_trip() {
        let s = Settings {
            translation_lang: "ja".to_string(),
            genius_key: Some("abc".to_string()),
            crossfade_duration: 8,
            ..Settings::default()
        };
        let text = toml::to_string_pretty(&s).unwrap();
        let back: Settings = toml::from_str(&text).unwrap();
        assert_eq!(back, s);
    }

    #[test]
    fn test_adjust_fields() {
        let mut s = Settings::default();

        s.adjust(SettingField::ShowPanel, true);
        assert!(!s.show_panel);

        s.adjust(SettingField::TranslationLang, true);
        assert_eq!(s.translation_lang, "es");

        s.crossfade_duration = MAX_CROSSFADE_SECS;
        s.adjust(SettingField::CrossfadeDuration, true);
        assert_eq!(s.crossfade_duration, MAX_CROSSFADE_SECS);

        s.crossfade_duration = 0;
        s.adjust(SettingField::CrossfadeDuration, false);
        assert_eq!(s.crossfade_duration, 0);
    }

    #[test]
    fn test_display_values() {
        let s = Settings::default();
        assert_eq!(s.display_value(SettingField::FetchMetadata), "on");
        assert_eq!(s.display_value(SettingField::TranslationLang), "English");
        assert_eq!(s.display_value(SettingField::CrossfadeDuration), "5s");
    }
}
