//! Outbound HTTP on behalf of the panel: Genius search, page fetch and
//! LibreTranslate. The panel only ever talks to a [`RemoteGateway`]; in the
//! running app that is a [`GatewayClient`] forwarding messages to the worker
//! task that owns the real [`HttpGateway`].

pub mod http;
pub mod message;

use serde::{Deserialize, Serialize};
use std::future::Future;
use thiserror::Error;

pub use http::{Endpoints, HttpGateway};
pub use message::{spawn_gateway, GatewayClient, GatewayReply, GatewayRequest};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GatewayError {
    /// Non-2xx status or an error message reported by the remote API
    #[error("{0}")]
    Status(String),
    #[error("network error: {0}")]
    Transport(String),
    #[error("unexpected response: {0}")]
    Decode(String),
    #[error("gateway is not running")]
    Closed,
}

/// The three call shapes the panel needs from the outside world 🌐
pub trait RemoteGateway: Send + Sync {
    fn search(
        &self,
        query: &str,
        api_key: &str,
    ) -> impl Future<Output = Result<SearchResponse, GatewayError>> + Send;

    fn fetch_page(&self, url: &str) -> impl Future<Output = Result<String, GatewayError>> + Send;

    fn translate(
        &self,
        text: &str,
        target_lang: &str,
    ) -> impl Future<Output = Result<String, GatewayError>> + Send;
}

/// Genius `/search` payload, trimmed to the fields we read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub response: SearchBody,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchBody {
    #[serde(default)]
    pub hits: Vec<SearchHit>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub result: SongResult,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SongResult {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub title: Option<String>,
    pub url: String,
    #[serde(default)]
    pub release_date_for_display: Option<String>,
    #[serde(default)]
    pub song_art_image_thumbnail_url: Option<String>,
    #[serde(default)]
    pub primary_artist: Option<NamedRef>,
    #[serde(default)]
    pub album: Option<NamedRef>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NamedRef {
    pub name: String,
}

impl SearchResponse {
    pub fn first_hit(&self) -> Option<&SongResult> {
        self.response.hits.first().map(|h| &h.result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_response_tolerates_sparse_hits() {
        let body = r#"{
            "meta": {"status": 200},
            "response": {"hits": [
                {"type": "song", "result": {"url": "https://genius.com/a-b-lyrics"}},
                {"result": {"id": 7, "url": "https://genius.com/c", "album": {"name": "C"}}}
            ]}
        }"#;
        let parsed: SearchResponse = serde_json::from_str(body).unwrap();

        assert_eq!(parsed.response.hits.len(), 2);
        let first = parsed.first_hit().unwrap();
        assert_eq!(first.url, "https://genius.com/a-b-lyrics");
        assert!(first.album.is_none());
        assert_eq!(first.id, None);
    }

    #[test]
    fn test_empty_response_has_no_hits() {
        let parsed: SearchResponse = serde_json::from_str(r#"{"response": {}}"#).unwrap();
        assert!(parsed.first_hit().is_none());
    }
}
