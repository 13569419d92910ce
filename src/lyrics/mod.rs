pub mod metadata;
pub mod query;
pub mod scrape;

pub use metadata::Metadata;
pub use query::{build_queries, clean_artist_name, clean_track_title, main_artist};

use crate::gateway::{RemoteGateway, SongResult};
use crate::observer::Track;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LyricsError {
    #[error("{0}")]
    Network(String),
    #[error("Song not found on Genius after trying multiple searches")]
    NotFound,
    #[error("{0}")]
    ExtractionFailed(String),
    #[error("No Genius access token configured (set genius_key or GENIUS_ACCESS_TOKEN)")]
    MissingApiKey,
}

/// Finds a track on Genius and scrapes its lyrics.
pub struct LyricsRetriever<G> {
    gateway: G,
    api_key: Option<String>,
}

impl<G: RemoteGateway> LyricsRetriever<G> {
    pub fn new(gateway: G, api_key: Option<String>) -> Self {
        Self {
            gateway,
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        }
    }

    fn api_key(&self) -> Result<&str, LyricsError> {
        self.api_key.as_deref().ok_or(LyricsError::MissingApiKey)
    }

    /// Try every query variant in order and return the first hit.
    pub async fn find_song(&self, track: &Track) -> Result<SongResult, LyricsError> {
        let key = self.api_key()?;

        for (variant, query) in build_queries(track) {
            tracing::debug!(variant, %query, "trying Genius search");
            match self.gateway.search(&query, key).await {
                Ok(resp) => {
                    if let Some(song) = resp.first_hit() {
                        tracing::info!(
                            variant,
                            title = song.title.as_deref().unwrap_or("?"),
                            url = %song.url,
                            "found song on Genius"
                        );
                        return Ok(song.clone());
                    }
                }
                Err(e) => {
                    // One bad variant should not stop the others
                    tracing::warn!(error = %e, variant, %query, "search failed");
                }
            }
        }

        Err(LyricsError::NotFound)
    }

    /// Fetch a song page and pull the lyrics out of it.
    pub async fn scrape(&self, url: &str) -> Result<String, LyricsError> {
        let html = self
            .gateway
            .fetch_page(url)
            .await
            .map_err(|e| LyricsError::Network(e.to_string()))?;

        let lyrics = scrape::extract_lyrics(&html)
            .map_err(|e| LyricsError::ExtractionFailed(e.to_string()))?;
        tracing::info!(chars = lyrics.len(), "extracted lyrics");
        Ok(lyrics)
    }

    pub async fn fetch_lyrics(&self, track: &Track) -> Result<String, LyricsError> {
        let song = self.find_song(track).await?;
        self.scrape(&song.url).await
    }

    /// Metadata from the raw query only. No hit is not an error: the
    /// placeholder metadata is returned instead.
    pub async fn fetch_metadata(&self, track: &Track) -> Result<Metadata, LyricsError> {
        let key = self.api_key()?;
        let query = format!("{} {}", track.title, track.artist);

        let resp = self
            .gateway
            .search(&query, key)
            .await
            .map_err(|e| LyricsError::Network(e.to_string()))?;

        Ok(match resp.first_hit() {
            Some(song) => Metadata::from_song(song, track),
            None => Metadata::unknown(track),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::{GatewayError, SearchHit, SearchResponse};
    use std::sync::Mutex;

    /// Answers searches from a script and records every query.
    #[derive(Default)]
    struct ScriptedGateway {
        hit_on: Option<String>,
        fail_on: Option<String>,
        page: String,
        queries: Mutex<Vec<String>>,
    }

    impl RemoteGateway for ScriptedGateway {
        async fn search(&self, query: &str, _key: &str) -> Result<SearchResponse, GatewayError> {
            self.queries.lock().unwrap().push(query.to_string());
            if self.fail_on.as_deref() == Some(query) {
                return Err(GatewayError::Status("Genius API error: 500".to_string()));
            }
            let mut resp = SearchResponse::default();
            if self.hit_on.as_deref() == Some(query) {
                resp.response.hits.push(SearchHit {
                    result: SongResult {
                        url: "https://genius.com/song".to_string(),
                        ..SongResult::default()
                    },
                });
            }
            Ok(resp)
        }

        async fn fetch_page(&self, _url: &str) -> Result<String, GatewayError> {
            Ok(self.page.clone())
        }

        async fn translate(&self, _t: &str, _l: &str) -> Result<String, GatewayError> {
            unreachable!("retriever never translates")
        }
    }

    fn track() -> Track {
        Track::new("Song (Live)", "Artist A feat. B")
    }

    #[tokio::test]
    async fn test_not_found_after_all_variants() {
        let gw = ScriptedGateway::default();
        let retriever = LyricsRetriever::new(gw, Some("k".to_string()));

        let err = retriever.fetch_lyrics(&track()).await.unwrap_err();
        assert_eq!(err, LyricsError::NotFound);
        assert_eq!(retriever.gateway.queries.lock().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_stops_at_first_hit() {
        let gw = ScriptedGateway {
            hit_on: Some("Song (Live)".to_string()),
            ..ScriptedGateway::default()
        };
        let retriever = LyricsRetriever::new(gw, Some("k".to_string()));

        let song = retriever.find_song(&track()).await.unwrap();
        assert_eq!(song.url, "https://genius.com/song");
        assert_eq!(
            *retriever.gateway.queries.lock().unwrap(),
            vec!["Song (Live) Artist A feat. B", "Song (Live)"]
        );
    }

    #[tokio::test]
    async fn test_search_error_moves_to_next_variant() {
        let gw = ScriptedGateway {
            fail_on: Some("Song (Live) Artist A feat. B".to_string()),
            hit_on: Some("Song (Live)".to_string()),
            ..ScriptedGateway::default()
        };
        let retriever = LyricsRetriever::new(gw, Some("k".to_string()));
        assert!(retriever.find_song(&track()).await.is_ok());
    }

    #[tokio::test]
    async fn test_page_without_lyrics_fails_extraction() {
        let gw = ScriptedGateway {
            hit_on: Some("Song (Live)".to_string()),
            page: "<html><body><p>Sign in to see lyrics</p></body></html>".to_string(),
            ..ScriptedGateway::default()
        };
        let retriever = LyricsRetriever::new(gw, Some("k".to_string()));

        let err = retriever.fetch_lyrics(&track()).await.unwrap_err();
        assert!(matches!(err, LyricsError::ExtractionFailed(_)));
    }

    #[tokio::test]
    async fn test_missing_key_short_circuits() {
        let retriever = LyricsRetriever::new(ScriptedGateway::default(), Some("  ".to_string()));
        assert_eq!(
            retriever.fetch_lyrics(&track()).await,
            Err(LyricsError::MissingApiKey)
        );
        assert!(retriever.gateway.queries.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_metadata_without_hit_is_placeholder() {
        let retriever = LyricsRetriever::new(ScriptedGateway::default(), Some("k".to_string()));
        let m = retriever.fetch_metadata(&track()).await.unwrap();
        assert_eq!(m, Metadata::unknown(&track()));
    }

    #[tokio::test]
    async fn test_metadata_network_error_is_reported() {
        let gw = ScriptedGateway {
            fail_on: Some("Song (Live) Artist A feat. B".to_string()),
            ..ScriptedGateway::default()
        };
        let retriever = LyricsRetriever::new(gw, Some("k".to_string()));
        assert!(matches!(
            retriever.fetch_metadata(&track()).await,
            Err(LyricsError::Network(_))
        ));
    }
}
