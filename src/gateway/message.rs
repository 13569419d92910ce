use super::{GatewayError, RemoteGateway, SearchResponse};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};

/// A request from the panel to the gateway worker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum GatewayRequest {
    FetchGeniusSearch { query: String, genius_key: String },
    FetchGeniusPage { url: String },
    TranslateText { text: String, target_lang: String },
}

/// `{success: true, data}` or `{success: false, error}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatewayReply {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl GatewayReply {
    pub fn ok(data: Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(error: impl ToString) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.to_string()),
        }
    }

    fn into_data(self) -> Result<Value, GatewayError> {
        if self.success {
            self.data
                .ok_or_else(|| GatewayError::Decode("reply carried no data".to_string()))
        } else {
            Err(GatewayError::Status(
                self.error.unwrap_or_else(|| "unknown gateway error".to_string()),
            ))
        }
    }
}

struct Envelope {
    request: GatewayRequest,
    reply_to: oneshot::Sender<GatewayReply>,
}

/// Answer a single request against a concrete gateway.
pub async fn handle_request<G: RemoteGateway>(gateway: &G, request: GatewayRequest) -> GatewayReply {
    match request {
        GatewayRequest::FetchGeniusSearch { query, genius_key } => {
            match gateway.search(&query, &genius_key).await {
                Ok(data) => match serde_json::to_value(data) {
                    Ok(v) => GatewayReply::ok(v),
                    Err(e) => GatewayReply::err(e),
                },
                Err(e) => GatewayReply::err(e),
            }
        }
        GatewayRequest::FetchGeniusPage { url } => match gateway.fetch_page(&url).await {
            Ok(html) => GatewayReply::ok(Value::String(html)),
            Err(e) => GatewayReply::err(e),
        },
        GatewayRequest::TranslateText { text, target_lang } => {
            match gateway.translate(&text, &target_lang).await {
                Ok(t) => GatewayReply::ok(Value::String(t)),
                Err(e) => GatewayReply::err(e),
            }
        }
    }
}

/// Start the gateway worker task and hand back a client for it.
///
/// Every request is answered on its own task, so a slow page fetch never
/// holds up a translation.
pub fn spawn_gateway<G: RemoteGateway + 'static>(gateway: G) -> GatewayClient {
    let (tx, mut rx) = mpsc::channel::<Envelope>(32);
    let gateway = Arc::new(gateway);

    tokio::spawn(async move {
        tracing::info!("gateway worker started");
        while let Some(Envelope { request, reply_to }) = rx.recv().await {
            let gateway = gateway.clone();
            tokio::spawn(async move {
                let reply = handle_request(gateway.as_ref(), request).await;
                if let Some(err) = &reply.error {
                    tracing::warn!(error = %err, "gateway request failed");
                }
                // Requester may have gone away; nothing to do then
                let _ = reply_to.send(reply);
            });
        }
        tracing::info!("gateway worker stopped");
    });

    GatewayClient { tx }
}

/// Panel-side handle: speaks [`RemoteGateway`] by messaging the worker.
#[derive(Clone)]
pub struct GatewayClient {
    tx: mpsc::Sender<Envelope>,
}

impl GatewayClient {
    pub async fn send(&self, request: GatewayRequest) -> Result<GatewayReply, GatewayError> {
        let (reply_to, reply_rx) = oneshot::channel();
        self.tx
            .send(Envelope { request, reply_to })
            .await
            .map_err(|_| GatewayError::Closed)?;
        reply_rx.await.map_err(|_| GatewayError::Closed)
    }

    async fn send_for_string(&self, request: GatewayRequest) -> Result<String, GatewayError> {
        match self.send(request).await?.into_data()? {
            Value::String(s) => Ok(s),
            other => Err(GatewayError::Decode(format!("expected text, got {}", other))),
        }
    }
}

impl RemoteGateway for GatewayClient {
    async fn search(&self, query: &str, api_key: &str) -> Result<SearchResponse, GatewayError> {
        let data = self
            .send(GatewayRequest::FetchGeniusSearch {
                query: query.to_string(),
                genius_key: api_key.to_string(),
            })
            .await?
            .into_data()?;
        serde_json::from_value(data).map_err(|e| GatewayError::Decode(e.to_string()))
    }

    async fn fetch_page(&self, url: &str) -> Result<String, GatewayError> {
        self.send_for_string(GatewayRequest::FetchGeniusPage {
            url: url.to_string(),
        })
        .await
    }

    async fn translate(&self, text: &str, target_lang: &str) -> Result<String, GatewayError> {
        self.send_for_string(GatewayRequest::TranslateText {
            text: text.to_string(),
            target_lang: target_lang.to_string(),
        })
        .await
    }
}
