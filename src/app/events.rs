use crossterm::event::Event;

use crate::lyrics::{LyricsError, Metadata};
use crate::observer::ObserverEvent;
use crate::translate::TranslateError;
use crate::ui::theme::Theme;

/// Everything the UI loop reacts to. Results carry the key of the track
/// they were requested for.
pub enum AppEvent {
    Input(Event),
    Observer(ObserverEvent),
    MetadataUpdate(String, Result<Metadata, LyricsError>),
    LyricsUpdate(String, Result<String, LyricsError>),
    TranslationUpdate {
        track_key: String,
        lang: String,
        result: Result<String, TranslateError>,
    },
    ThemeUpdate(Theme),
    Tick,
}

impl From<ObserverEvent> for AppEvent {
    fn from(event: ObserverEvent) -> Self {
        AppEvent::Observer(event)
    }
}
