pub mod common;

#[cfg(target_os = "macos")]
pub mod macos;

#[cfg(not(target_os = "macos"))]
pub mod mpris;

use crate::observer::{Track, TrackSource};
use anyhow::Result;

#[cfg(target_os = "macos")]
pub use macos::AppleScriptSource;

#[cfg(not(target_os = "macos"))]
pub use mpris::MprisSource;

/// A track fixed on the command line. Always "playing".
pub struct StaticSource {
    track: Track,
}

impl StaticSource {
    pub fn new(title: &str, artist: &str) -> Self {
        Self {
            track: Track::new(title, artist),
        }
    }
}

impl TrackSource for StaticSource {
    fn name(&self) -> &str {
        "command line"
    }

    fn current_track(&self) -> Result<Option<Track>> {
        Ok(Some(Track::new(
            self.track.title.clone(),
            self.track.artist.clone(),
        )))
    }
}

/// Factory for the platform's player adapter.
///
/// On macOS the player name is the application name ("Spotify", "Music");
/// elsewhere it is the MPRIS player name passed to playerctl.
pub fn get_source(player: &str) -> Box<dyn TrackSource> {
    #[cfg(target_os = "macos")]
    {
        Box::new(AppleScriptSource::new(&app_name(player)))
    }
    #[cfg(not(target_os = "macos"))]
    {
        Box::new(MprisSource::new(&player.to_lowercase()))
    }
}

/// "spotify" -> "Spotify"
pub fn app_name(player: &str) -> String {
    let mut chars = player.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
