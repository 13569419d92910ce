use crate::gateway::RemoteGateway;
use thiserror::Error;

/// Target languages offered in the panel, in display order.
pub const LANGUAGES: [(&str, &str); 15] = [
    ("es", "Spanish"),
    ("fr", "French"),
    ("de", "German"),
    ("it", "Italian"),
    ("pt", "Portuguese"),
    ("ja", "Japanese"),
    ("ko", "Korean"),
    ("zh", "Chinese"),
    ("ar", "Arabic"),
    ("ru", "Russian"),
    ("hi", "Hindi"),
    ("nl", "Dutch"),
    ("tr", "Turkish"),
    ("pl", "Polish"),
    ("en", "English"),
];

/// Display name for a code; unknown codes are shown as-is.
pub fn language_name(code: &str) -> &str {
    LANGUAGES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
        .unwrap_or(code)
}

/// Next (or previous) language in the catalog, wrapping around. An unknown
/// code starts from the first entry.
pub fn cycle_language(code: &str, forward: bool) -> &'static str {
    let len = LANGUAGES.len();
    let idx = match LANGUAGES.iter().position(|(c, _)| *c == code) {
        Some(i) if forward => (i + 1) % len,
        Some(i) => (i + len - 1) % len,
        None => 0,
    };
    LANGUAGES[idx].0
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TranslateError {
    #[error("Translation failed: {0}")]
    TranslationFailed(String),
}

pub struct Translator<G> {
    gateway: G,
}

impl<G: RemoteGateway> Translator<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    /// Translate `text` into `target_lang`, letting the service detect the
    /// source language. No retries.
    pub async fn translate(&self, text: &str, target_lang: &str) -> Result<String, TranslateError> {
        if text.trim().is_empty() {
            return Err(TranslateError::TranslationFailed(
                "nothing to translate".to_string(),
            ));
        }

        let translated = self
            .gateway
            .translate(text, target_lang)
            .await
            .map_err(|e| TranslateError::TranslationFailed(e.to_string()))?;

        tracing::info!(target_lang, chars = translated.len(), "translated lyrics");
        Ok(translated)
    }
}
