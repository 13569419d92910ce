use super::config::{AppConfig, SettingField, Settings};
use super::keys::KeyConfig;
use crate::lyrics::{LyricsError, Metadata};
use crate::observer::{ObserverEvent, Track};
use crate::translate::{self, TranslateError};
use crate::ui::theme::Theme;
use std::path::PathBuf;
use std::time::{Duration, Instant};

const TOAST_DURATION: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone, PartialEq)]
pub enum MetadataState {
    /// `fetch_metadata` is off
    Disabled,
    Idle,
    Loading,
    Loaded(Metadata),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum LyricsState {
    Idle,
    Loading,
    Loaded(String),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum TranslationState {
    Idle,
    Loading,
    Loaded { lang: String, text: String },
    Failed(String),
}

/// Work the UI loop should start on behalf of the panel.
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    Metadata(Track),
    Lyrics(Track),
    Translate {
        track: Track,
        text: String,
        lang: String,
    },
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub start_time: Instant,
    pub deadline: Instant,
}

/// Session state of the companion panel. Owned by the UI loop and only
/// changed through the handlers below.
pub struct App {
    pub theme: Theme,
    pub keys: KeyConfig,
    pub settings: Settings,
    /// Where settings are persisted; `None` keeps changes in memory.
    pub config_path: Option<PathBuf>,

    pub is_running: bool,
    pub source_name: String,
    pub player_detected: bool,
    pub player_idle: bool,

    pub track: Option<Track>,
    pub metadata: MetadataState,
    pub lyrics: LyricsState,
    pub translation: TranslationState,
    pub translated_once: bool,
    /// Language picked in the panel for the next translation
    pub target_lang: String,

    /// Inline message under the lyrics controls
    pub notice: Option<String>,
    pub lyrics_scroll: u16,
    pub collapsed: bool,

    pub show_settings: bool,
    pub settings_selected: usize,
    pub toast: Option<Toast>,
}

impl App {
    pub fn new(source_name: &str, settings: Settings, config_path: Option<PathBuf>) -> Self {
        Self {
            theme: Theme::default(),
            keys: settings.keys.clone(),
            target_lang: settings.translation_lang.clone(),
            metadata: if settings.fetch_metadata {
                MetadataState::Idle
            } else {
                MetadataState::Disabled
            },
            settings,
            config_path,
            is_running: true,
            source_name: source_name.to_string(),
            player_detected: false,
            player_idle: false,
            track: None,
            lyrics: LyricsState::Idle,
            translation: TranslationState::Idle,
            translated_once: false,
            notice: None,
            lyrics_scroll: 0,
            collapsed: false,
            show_settings: false,
            settings_selected: 0,
            toast: None,
        }
    }

    fn is_current(&self, track_key: &str) -> bool {
        self.track.as_ref().is_some_and(|t| t.key() == track_key)
    }

    pub fn status_line(&self) -> String {
        if !self.player_detected {
            format!("⚠ Open {} to use lyrica", self.source_name)
        } else if self.player_idle {
            format!("⏸ Nothing playing on {}", self.source_name)
        } else {
            format!("✓ Connected to {}", self.source_name)
        }
    }

    // --- Observer ---

    pub fn on_observer_event(&mut self, event: ObserverEvent) -> Option<Request> {
        match event {
            ObserverEvent::PlayerDetected => {
                self.player_detected = true;
                None
            }
            ObserverEvent::Idle => {
                self.player_idle = true;
                None
            }
            ObserverEvent::Resumed => {
                self.player_idle = false;
                None
            }
            ObserverEvent::TrackChanged(track) => self.on_track_changed(track),
        }
    }

    /// Drop everything tied to the previous track and ask for metadata.
    pub fn on_track_changed(&mut self, track: Track) -> Option<Request> {
        self.player_detected = true;
        self.player_idle = false;
        self.lyrics = LyricsState::Idle;
        self.translation = TranslationState::Idle;
        self.translated_once = false;
        self.notice = None;
        self.lyrics_scroll = 0;
        self.track = Some(track.clone());

        if self.settings.fetch_metadata {
            self.metadata = MetadataState::Loading;
            Some(Request::Metadata(track))
        } else {
            self.metadata = MetadataState::Disabled;
            None
        }
    }

    // --- User actions ---

    pub fn fetch_label(&self) -> &'static str {
        match self.lyrics {
            LyricsState::Idle => "📝 Get Lyrics",
            LyricsState::Loading => "Fetching...",
            LyricsState::Loaded(_) => "Refresh Lyrics",
            LyricsState::Failed(_) => "📝 Try Again",
        }
    }

    pub fn translate_label(&self) -> &'static str {
        match self.translation {
            TranslationState::Loading => "Translating...",
            _ if self.translated_once => "🌐 Translate Again",
            _ => "🌐 Translate",
        }
    }

    /// Translate controls only make sense once lyrics are on screen.
    pub fn can_translate(&self) -> bool {
        matches!(self.lyrics, LyricsState::Loaded(_))
    }

    pub fn request_lyrics(&mut self) -> Option<Request> {
        let Some(track) = self.track.clone() else {
            self.notice = Some("No track is currently playing".to_string());
            return None;
        };
        if self.lyrics == LyricsState::Loading {
            return None;
        }

        self.notice = None;
        self.lyrics = LyricsState::Loading;
        self.translation = TranslationState::Idle;
        self.lyrics_scroll = 0;
        Some(Request::Lyrics(track))
    }

    pub fn request_translation(&mut self) -> Option<Request> {
        let (Some(track), LyricsState::Loaded(text)) = (self.track.clone(), &self.lyrics) else {
            self.notice = Some("Please fetch lyrics first".to_string());
            return None;
        };
        if self.translation == TranslationState::Loading {
            return None;
        }

        let text = text.clone();
        self.notice = None;
        self.translation = TranslationState::Loading;
        Some(Request::Translate {
            track,
            text,
            lang: self.target_lang.clone(),
        })
    }

    pub fn cycle_target_lang(&mut self, forward: bool) {
        self.target_lang = translate::cycle_language(&self.target_lang, forward).to_string();
    }

    pub fn scroll_lyrics(&mut self, down: bool) {
        self.lyrics_scroll = if down {
            self.lyrics_scroll.saturating_add(1)
        } else {
            self.lyrics_scroll.saturating_sub(1)
        };
    }

    pub fn toggle_collapse(&mut self) {
        self.collapsed = !self.collapsed;
    }

    // --- Results ---

    pub fn on_metadata(&mut self, track_key: &str, result: Result<Metadata, LyricsError>) {
        if !self.is_current(track_key) || !self.settings.fetch_metadata {
            tracing::debug!("dropping metadata for a superseded track");
            return;
        }
        self.metadata = match result {
            Ok(m) => MetadataState::Loaded(m),
            Err(e) => {
                tracing::warn!(error = %e, "metadata lookup failed");
                MetadataState::Failed("Could not load additional info".to_string())
            }
        };
    }

    /// Returns a translation request when auto-translate is on.
    pub fn on_lyrics(
        &mut self,
        track_key: &str,
        result: Result<String, LyricsError>,
    ) -> Option<Request> {
        if !self.is_current(track_key) {
            tracing::debug!("dropping lyrics for a superseded track");
            return None;
        }

        match result {
            Ok(text) => {
                self.lyrics = LyricsState::Loaded(text);
                self.lyrics_scroll = 0;
                if self.settings.auto_translate {
                    self.target_lang = self.settings.translation_lang.clone();
                    return self.request_translation();
                }
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "lyrics fetch failed");
                self.lyrics = LyricsState::Failed(e.to_string());
                self.translation = TranslationState::Idle;
                None
            }
        }
    }

    pub fn on_translation(
        &mut self,
        track_key: &str,
        lang: String,
        result: Result<String, TranslateError>,
    ) {
        if !self.is_current(track_key) {
            tracing::debug!("dropping translation for a superseded track");
            return;
        }
        self.translation = match result {
            Ok(text) => {
                self.translated_once = true;
                TranslationState::Loaded { lang, text }
            }
            Err(e) => {
                tracing::warn!(error = %e, "translation failed");
                TranslationState::Failed(e.to_string())
            }
        };
    }

    // --- Settings overlay ---

    pub fn toggle_settings(&mut self) {
        self.show_settings = !self.show_settings;
    }

    pub fn selected_setting(&self) -> SettingField {
        SettingField::ALL[self.settings_selected % SettingField::ALL.len()]
    }

    pub fn move_setting_selection(&mut self, down: bool) {
        let len = SettingField::ALL.len();
        self.settings_selected = if down {
            (self.settings_selected + 1) % len
        } else {
            (self.settings_selected + len - 1) % len
        };
    }

    /// Change the selected setting, persist, and start any work the change
    /// implies (turning metadata on fetches it for the current track).
    pub fn adjust_selected_setting(&mut self, forward: bool) -> Option<Request> {
        let field = self.selected_setting();
        self.settings.adjust(field, forward);
        self.persist_settings();

        match field {
            SettingField::TranslationLang => {
                self.target_lang = self.settings.translation_lang.clone();
                None
            }
            SettingField::FetchMetadata if !self.settings.fetch_metadata => {
                self.metadata = MetadataState::Disabled;
                None
            }
            SettingField::FetchMetadata => match self.track.clone() {
                Some(track) => {
                    self.metadata = MetadataState::Loading;
                    Some(Request::Metadata(track))
                }
                None => {
                    self.metadata = MetadataState::Idle;
                    None
                }
            },
            _ => None,
        }
    }

    fn persist_settings(&mut self) {
        let Some(path) = self.config_path.clone() else {
            self.show_toast("Settings saved!");
            return;
        };
        match AppConfig::save_to(&self.settings, &path) {
            Ok(()) => {
                tracing::info!(path = %path.display(), "settings saved");
                self.show_toast("Settings saved!");
            }
            Err(e) => {
                tracing::error!(error = %e, "could not save settings");
                self.show_toast("❌ Could not save settings");
            }
        }
    }

    // --- Toasts ---

    pub fn show_toast(&mut self, message: &str) {
        let now = Instant::now();
        self.toast = Some(Toast {
            message: message.to_string(),
            start_time: now,
            deadline: now + TOAST_DURATION,
        });
    }

    pub fn on_tick(&mut self) {
        if self
            .toast
            .as_ref()
            .is_some_and(|t| Instant::now() >= t.deadline)
        {
            self.toast = None;
        }
    }
}
