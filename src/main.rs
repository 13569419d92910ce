use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{Event, EventStream},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

use lyrica::app::actions::Services;
use lyrica::app::cli::Args;
use lyrica::app::config::{AppConfig, Settings};
use lyrica::app::events::AppEvent;
use lyrica::app::{input_handler, logging, App};
use lyrica::gateway::{spawn_gateway, GatewayClient, HttpGateway};
use lyrica::observer::{self, StaticSource, TrackSource};
use lyrica::ui::{self, theme};

const TICK_RATE: Duration = Duration::from_millis(100);
const THEME_POLL: Duration = Duration::from_secs(1);

type Tui = Terminal<CrosstermBackend<Stdout>>;

#[tokio::main]
async fn main() -> Result<()> {
    human_panic::setup_panic!();
    let args = Args::parse();

    if args.generate_config {
        print!("{}", AppConfig::default_toml()?);
        return Ok(());
    }

    let _log_guard = logging::init_logging(&AppConfig::get_log_dir(), &args.log_level)?;

    let config_path = args
        .config
        .clone()
        .unwrap_or_else(AppConfig::get_config_path);
    let settings = AppConfig::load_from(&config_path)
        .with_context(|| format!("could not load settings from {}", config_path.display()))?;

    let (source, source_name): (Arc<dyn TrackSource>, String) = match (&args.title, &args.artist) {
        (Some(title), Some(artist)) => {
            let source = StaticSource::new(title, artist);
            let name = source.name().to_string();
            (Arc::new(source), name)
        }
        _ => (
            Arc::from(observer::get_source(&args.player)),
            observer::app_name(&args.player),
        ),
    };
    tracing::info!(source = %source_name, "starting lyrica");

    // One HTTP client for the whole run, owned by the gateway worker
    let client = HttpGateway::build_client(&settings.endpoints);
    let gateway = spawn_gateway(HttpGateway::new(client, settings.endpoints.clone()));
    let services = Services::new(gateway, settings.resolved_genius_key());

    if args.once {
        return run_once(source, &services, args.translate.as_deref()).await;
    }

    run_panel(source, &source_name, services, settings, config_path).await
}

/// Print lyrics (and optionally a translation) for whatever is playing.
async fn run_once(
    source: Arc<dyn TrackSource>,
    services: &Services<GatewayClient>,
    translate_to: Option<&str>,
) -> Result<()> {
    let track = tokio::task::spawn_blocking(move || source.current_track())
        .await
        .context("track poll task panicked")??
        .context("No track is currently playing")?;

    println!("{} - {}\n", track.title, track.artist);

    let lyrics = services.retriever.fetch_lyrics(&track).await?;
    println!("{}", lyrics);

    if let Some(lang) = translate_to {
        let translated = services.translator.translate(&lyrics, lang).await?;
        println!("\n── {} ──\n{}", lyrica::translate::language_name(lang), translated);
    }
    Ok(())
}

async fn run_panel(
    source: Arc<dyn TrackSource>,
    source_name: &str,
    services: Services<GatewayClient>,
    settings: Settings,
    config_path: PathBuf,
) -> Result<()> {
    let mut app = App::new(source_name, settings, Some(config_path));
    app.theme = theme::load_current_theme();

    let (tx, mut rx) = mpsc::channel(100);

    // 1. Input Event Task
    let tx_input = tx.clone();
    tokio::spawn(async move {
        let mut reader = EventStream::new();
        while let Some(Ok(event)) = reader.next().await {
            if tx_input.send(AppEvent::Input(event)).await.is_err() {
                break;
            }
        }
    });

    // 2. Track Observer Task
    observer::spawn_observer(source, tx.clone());

    // 3. Theme Watcher Task 🎨
    let tx_theme = tx.clone();
    let initial_theme = app.theme.clone();
    tokio::spawn(async move {
        let mut last_theme = initial_theme;
        loop {
            tokio::time::sleep(THEME_POLL).await;
            let new_theme = theme::load_current_theme();
            if new_theme != last_theme {
                last_theme = new_theme.clone();
                if tx_theme.send(AppEvent::ThemeUpdate(new_theme)).await.is_err() {
                    break;
                }
            }
        }
    });

    // 4. Tick Task (toasts)
    let tx_tick = tx.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(TICK_RATE);
        loop {
            interval.tick().await;
            if tx_tick.send(AppEvent::Tick).await.is_err() {
                break;
            }
        }
    });

    let mut terminal = setup_terminal()?;
    let result = event_loop(&mut terminal, &mut app, &mut rx, &tx, &services).await;
    restore_terminal(&mut terminal)?;

    tracing::info!("lyrica stopped");
    result
}

async fn event_loop(
    terminal: &mut Tui,
    app: &mut App,
    rx: &mut mpsc::Receiver<AppEvent>,
    tx: &mpsc::Sender<AppEvent>,
    services: &Services<GatewayClient>,
) -> Result<()> {
    while app.is_running {
        terminal.draw(|f| ui::ui(f, app))?;

        let Some(event) = rx.recv().await else {
            break;
        };

        let request = match event {
            AppEvent::Input(Event::Key(key)) => input_handler::handle_key(key, app),
            AppEvent::Input(_) => None,
            AppEvent::Observer(event) => app.on_observer_event(event),
            AppEvent::MetadataUpdate(track_key, result) => {
                app.on_metadata(&track_key, result);
                None
            }
            AppEvent::LyricsUpdate(track_key, result) => app.on_lyrics(&track_key, result),
            AppEvent::TranslationUpdate {
                track_key,
                lang,
                result,
            } => {
                app.on_translation(&track_key, lang, result);
                None
            }
            AppEvent::ThemeUpdate(new_theme) => {
                app.theme = new_theme;
                None
            }
            AppEvent::Tick => {
                app.on_tick();
                None
            }
        };

        if let Some(request) = request {
            tracing::debug!(?request, "dispatching");
            services.dispatch(request, tx);
        }
    }
    Ok(())
}

fn setup_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}
