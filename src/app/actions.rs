use std::sync::Arc;
use tokio::sync::mpsc;

use super::events::AppEvent;
use super::state::Request;
use crate::gateway::RemoteGateway;
use crate::lyrics::LyricsRetriever;
use crate::translate::Translator;

/// Shared retrieval services. Each request runs on its own task and reports
/// back to the UI loop tagged with the track it was made for.
pub struct Services<G> {
    pub retriever: Arc<LyricsRetriever<G>>,
    pub translator: Arc<Translator<G>>,
}

impl<G> Clone for Services<G> {
    fn clone(&self) -> Self {
        Self {
            retriever: self.retriever.clone(),
            translator: self.translator.clone(),
        }
    }
}

impl<G: RemoteGateway + Clone> Services<G> {
    pub fn new(gateway: G, api_key: Option<String>) -> Self {
        Self {
            retriever: Arc::new(LyricsRetriever::new(gateway.clone(), api_key)),
            translator: Arc::new(Translator::new(gateway)),
        }
    }
}

impl<G: RemoteGateway + 'static> Services<G> {
    pub fn dispatch(&self, request: Request, tx: &mpsc::Sender<AppEvent>) {
        let tx = tx.clone();
        match request {
            Request::Metadata(track) => {
                let retriever = self.retriever.clone();
                tokio::spawn(async move {
                    let result = retriever.fetch_metadata(&track).await;
                    let _ = tx.send(AppEvent::MetadataUpdate(track.key(), result)).await;
                });
            }
            Request::Lyrics(track) => {
                let retriever = self.retriever.clone();
                tokio::spawn(async move {
                    let result = retriever.fetch_lyrics(&track).await;
                    let _ = tx.send(AppEvent::LyricsUpdate(track.key(), result)).await;
                });
            }
            Request::Translate { track, text, lang } => {
                let translator = self.translator.clone();
                tokio::spawn(async move {
                    let result = translator.translate(&text, &lang).await;
                    let _ = tx
                        .send(AppEvent::TranslationUpdate {
                            track_key: track.key(),
                            lang,
                            result,
                        })
                        .await;
                });
            }
        }
    }
}
