use super::{GatewayError, RemoteGateway, SearchResponse};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Remote endpoints, overridable from `config.toml` under `[endpoints]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Endpoints {
    #[serde(default = "default_genius_api")]
    pub genius_api: String,
    #[serde(default = "default_translate_url")]
    pub translate_url: String,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
}

fn default_genius_api() -> String {
    "https://api.genius.com".to_string()
}

fn default_translate_url() -> String {
    "https://libretranslate.com/translate".to_string()
}

fn default_connect_timeout() -> u64 {
    10
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            genius_api: default_genius_api(),
            translate_url: default_translate_url(),
            connect_timeout_secs: default_connect_timeout(),
        }
    }
}

#[derive(Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'a str,
}

#[derive(Debug, Default, Deserialize)]
struct TranslateResponse {
    #[serde(rename = "translatedText")]
    translated_text: Option<String>,
    error: Option<String>,
}

/// Talks to Genius and LibreTranslate over a shared reqwest client.
pub struct HttpGateway {
    client: Client,
    endpoints: Endpoints,
}

impl HttpGateway {
    pub fn new(client: Client, endpoints: Endpoints) -> Self {
        Self { client, endpoints }
    }

    /// One client for the whole process, reused by every call.
    pub fn build_client(endpoints: &Endpoints) -> Client {
        Client::builder()
            .user_agent(concat!("lyrica-rs/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(Duration::from_secs(endpoints.connect_timeout_secs))
            .build()
            .unwrap_or_default()
    }

    fn search_url(&self) -> String {
        format!("{}/search", self.endpoints.genius_api.trim_end_matches('/'))
    }
}

fn transport(e: reqwest::Error) -> GatewayError {
    GatewayError::Transport(e.to_string())
}

/// Reject non-2xx responses as "<context>: <code>".
fn check_status(status: StatusCode, context: &str) -> Result<(), GatewayError> {
    if status.is_success() {
        Ok(())
    } else {
        Err(GatewayError::Status(format!("{}: {}", context, status.as_u16())))
    }
}

fn search_from_body(body: &str) -> Result<SearchResponse, GatewayError> {
    serde_json::from_str(body).map_err(|e| GatewayError::Decode(e.to_string()))
}

/// Map a LibreTranslate reply onto the translated text.
fn translation_from_response(status: StatusCode, body: &str) -> Result<String, GatewayError> {
    if !status.is_success() {
        // LibreTranslate reports failures as {"error": "..."}
        let data: TranslateResponse = serde_json::from_str(body).unwrap_or_default();
        return Err(GatewayError::Status(
            data.error
                .unwrap_or_else(|| "Translation failed".to_string()),
        ));
    }

    let data: TranslateResponse =
        serde_json::from_str(body).map_err(|e| GatewayError::Decode(e.to_string()))?;

    match data.translated_text {
        Some(t) if !t.is_empty() => Ok(t),
        _ => Err(GatewayError::Status("No translation returned".to_string())),
    }
}

impl RemoteGateway for HttpGateway {
    async fn search(&self, query: &str, api_key: &str) -> Result<SearchResponse, GatewayError> {
        tracing::debug!(query, "genius search");
        let resp = self
            .client
            .get(self.search_url())
            .query(&[("q", query)])
            .bearer_auth(api_key)
            .send()
            .await
            .map_err(transport)?;

        check_status(resp.status(), "Genius API error")?;
        let body = resp.text().await.map_err(transport)?;
        search_from_body(&body)
    }

    async fn fetch_page(&self, url: &str) -> Result<String, GatewayError> {
        tracing::debug!(url, "fetching page");
        let resp = self.client.get(url).send().await.map_err(transport)?;

        check_status(resp.status(), "Failed to fetch page")?;
        resp.text().await.map_err(transport)
    }

    async fn translate(&self, text: &str, target_lang: &str) -> Result<String, GatewayError> {
        tracing::debug!(target_lang, chars = text.len(), "translating");
        let body = TranslateRequest {
            q: text,
            source: "auto",
            target: target_lang,
            format: "text",
        };
        let resp = self
            .client
            .post(&self.endpoints.translate_url)
            .json(&body)
            .send()
            .await
            .map_err(transport)?;

        let status = resp.status();
        let body = resp.text().await.map_err(transport)?;
        translation_from_response(status, &body)
    }
}
