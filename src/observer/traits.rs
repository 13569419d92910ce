use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::time::SystemTime;

pub const UNKNOWN_ARTIST: &str = "Unknown Artist";

/// What the player is playing right now 🎵
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    pub title: String,
    pub artist: String,
    #[serde(skip, default = "SystemTime::now")]
    pub observed_at: SystemTime,
}

impl Track {
    pub fn new(title: impl Into<String>, artist: impl Into<String>) -> Self {
        let artist = artist.into();
        let artist = if artist.trim().is_empty() {
            UNKNOWN_ARTIST.to_string()
        } else {
            artist.trim().to_string()
        };
        Self {
            title: title.into().trim().to_string(),
            artist,
            observed_at: SystemTime::now(),
        }
    }

    /// Identity key used to tag in-flight results.
    pub fn key(&self) -> String {
        format!("{}\u{1f}{}", self.title, self.artist)
    }
}

/// Identity is the (title, artist) pair; the observation time is ignored.
impl PartialEq for Track {
    fn eq(&self, other: &Self) -> bool {
        self.title == other.title && self.artist == other.artist
    }
}

impl Eq for Track {}

/// Platform adapter that can tell what is playing.
///
/// Implementations never fail for "nothing playing"; they return `Ok(None)`.
/// Errors are reserved for the adapter itself being broken.
pub trait TrackSource: Send + Sync {
    fn name(&self) -> &str;
    fn current_track(&self) -> Result<Option<Track>>;
}
