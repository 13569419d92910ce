use lyrica::app::actions::Services;
use lyrica::app::config::Settings;
use lyrica::app::events::AppEvent;
use lyrica::app::{App, LyricsState, MetadataState, Request, TranslationState};
use lyrica::gateway::{
    spawn_gateway, GatewayError, NamedRef, RemoteGateway, SearchHit, SearchResponse, SongResult,
};
use lyrica::observer::{ObserverEvent, Track};
use std::time::Duration;
use tokio::sync::mpsc;

const PAGE: &str = r#"<html><body>
<div data-lyrics-container="true">Is this the real life<br/>Is this just fantasy</div>
</body></html>"#;

/// Knows exactly one song and translates by upper-casing.
struct FakeGenius;

impl RemoteGateway for FakeGenius {
    async fn search(&self, query: &str, _api_key: &str) -> Result<SearchResponse, GatewayError> {
        let mut resp = SearchResponse::default();
        if query.contains("Bohemian Rhapsody") {
            resp.response.hits.push(SearchHit {
                result: SongResult {
                    url: "https://genius.com/queen-bohemian-rhapsody-lyrics".to_string(),
                    release_date_for_display: Some("October 31, 1975".to_string()),
                    album: Some(NamedRef {
                        name: "A Night at the Opera".to_string(),
                    }),
                    ..SongResult::default()
                },
            });
        }
        Ok(resp)
    }

    async fn fetch_page(&self, _url: &str) -> Result<String, GatewayError> {
        Ok(PAGE.to_string())
    }

    async fn translate(&self, text: &str, _target_lang: &str) -> Result<String, GatewayError> {
        Ok(text.to_uppercase())
    }
}

fn services() -> Services<lyrica::gateway::GatewayClient> {
    Services::new(spawn_gateway(FakeGenius), Some("token".to_string()))
}

/// Dispatch a request and feed its single result back into the app.
async fn run(
    app: &mut App,
    services: &Services<lyrica::gateway::GatewayClient>,
    request: Request,
) -> Option<Request> {
    let (tx, mut rx) = mpsc::channel(8);
    services.dispatch(request, &tx);

    let event = tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("no result within 5s")
        .expect("channel closed");

    match event {
        AppEvent::MetadataUpdate(key, result) => {
            app.on_metadata(&key, result);
            None
        }
        AppEvent::LyricsUpdate(key, result) => app.on_lyrics(&key, result),
        AppEvent::TranslationUpdate {
            track_key,
            lang,
            result,
        } => {
            app.on_translation(&track_key, lang, result);
            None
        }
        _ => panic!("unexpected event"),
    }
}

#[tokio::test]
async fn test_full_session_flow() {
    let services = services();
    let mut app = App::new("Spotify", Settings::default(), None);

    app.on_observer_event(ObserverEvent::PlayerDetected);
    let req = app
        .on_observer_event(ObserverEvent::TrackChanged(Track::new(
            "Bohemian Rhapsody",
            "Queen",
        )))
        .unwrap();
    run(&mut app, &services, req).await;

    let MetadataState::Loaded(meta) = &app.metadata else {
        panic!("metadata not loaded: {:?}", app.metadata);
    };
    assert_eq!(meta.album, "A Night at the Opera");
    assert_eq!(meta.year, "October 31, 1975");

    let req = app.request_lyrics().unwrap();
    run(&mut app, &services, req).await;
    assert_eq!(
        app.lyrics,
        LyricsState::Loaded("Is this the real life\nIs this just fantasy".to_string())
    );

    app.cycle_target_lang(true);
    let req = app.request_translation().unwrap();
    run(&mut app, &services, req).await;
    assert_eq!(
        app.translation,
        TranslationState::Loaded {
            lang: "es".to_string(),
            text: "IS THIS THE REAL LIFE\nIS THIS JUST FANTASY".to_string()
        }
    );
    assert_eq!(app.translate_label(), "🌐 Translate Again");
}

#[tokio::test]
async fn test_unknown_song_reports_not_found() {
    let services = services();
    let mut app = App::new("Spotify", Settings::default(), None);
    let req = app.on_track_changed(Track::new("Nope", "Nobody")).unwrap();

    // No hit is not a failure for metadata
    run(&mut app, &services, req).await;
    assert!(matches!(app.metadata, MetadataState::Loaded(ref m) if m.album == "Unknown"));

    let req = app.request_lyrics().unwrap();
    run(&mut app, &services, req).await;
    assert_eq!(
        app.lyrics,
        LyricsState::Failed("Song not found on Genius after trying multiple searches".to_string())
    );
    assert_eq!(app.fetch_label(), "📝 Try Again");
}

#[tokio::test]
async fn test_auto_translate_runs_after_lyrics() {
    let services = services();
    let settings = Settings {
        auto_translate: true,
        fetch_metadata: false,
        translation_lang: "de".to_string(),
        ..Settings::default()
    };
    let mut app = App::new("Spotify", settings, None);
    assert_eq!(
        app.on_track_changed(Track::new("Bohemian Rhapsody", "Queen")),
        None
    );

    let req = app.request_lyrics().unwrap();
    let follow_up = run(&mut app, &services, req).await.unwrap();
    assert!(matches!(follow_up, Request::Translate { ref lang, .. } if lang == "de"));

    run(&mut app, &services, follow_up).await;
    assert!(matches!(app.translation, TranslationState::Loaded { ref lang, .. } if lang == "de"));
}

#[tokio::test]
async fn test_result_for_previous_track_is_ignored() {
    let services = services();
    let settings = Settings {
        fetch_metadata: false,
        ..Settings::default()
    };
    let mut app = App::new("Spotify", settings, None);
    app.on_track_changed(Track::new("Bohemian Rhapsody", "Queen"));
    let req = app.request_lyrics().unwrap();

    // Song changes while the fetch is in flight
    app.on_track_changed(Track::new("Another One Bites the Dust", "Queen"));
    run(&mut app, &services, req).await;

    assert_eq!(app.lyrics, LyricsState::Idle);
    assert_eq!(app.fetch_label(), "📝 Get Lyrics");
}
