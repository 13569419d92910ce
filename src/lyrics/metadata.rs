
use crate::gateway::SongResult;
use crate::observer::Track;

/// Best-effort facts about the track from its Genius search hit.
#[derive(Debug, Clone, PartialEq)]
pub struct Metadata {
    pub album: String,
    pub year: String,
    pub artist: String,
    pub song_id: Option<u64>,
    pub lyrics_url: Option<String>,
    pub thumbnail: Option<String>,
}

impl Metadata {
    pub fn from_song(song: &SongResult, track: &Track) -> Self {
        Self {
            album: song
                .album
                .as_ref()
                .map(|a| a.name.clone())
                .unwrap_or_else(|| "Unknown Album".to_string()),
            year: song
                .release_date_for_display
                .clone()
                .unwrap_or_else(|| "N/A".to_string()),
            artist: song
                .primary_artist
                .as_ref()
                .map(|a| a.name.clone())
                .unwrap_or_else(|| track.artist.clone()),
            song_id: song.id,
            lyrics_url: Some(song.url.clone()),
            thumbnail: song.song_art_image_thumbnail_url.clone(),
        }
    }

    /// Used when Genius has no hit at all.
    pub fn unknown(track: &Track) -> Self {
        Self {
            album: "Unknown".to_string(),
            year: "N/A".to_string(),
            artist: track.artist.clone(),
            song_id: None,
            lyrics_url: None,
            thumbnail: None,
        }
    }
}
