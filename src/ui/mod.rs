pub mod components;
pub mod layout;
pub mod theme;
pub mod utils;

pub use theme::Theme;

use crate::app::App;
use ratatui::{
    layout::Alignment,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub fn ui(f: &mut Frame, app: &App) {
    let area = f.area();

    let main_layout = layout::get_main_layout(area);
    let content = layout::get_content_layout(
        main_layout.body_area,
        app.settings.show_panel,
        app.collapsed,
    );

    components::track::render(f, content.card, app);
    if let Some(panel) = content.panel {
        components::lyrics::render(f, panel, app);
    }

    render_footer(f, main_layout.footer_area, app);

    // Overlays last so they sit on top
    components::settings::render(f, app);
    components::toast::render(f, app);
}

fn render_footer(f: &mut Frame, area: ratatui::layout::Rect, app: &App) {
    let theme = &app.theme;
    let keys = &app.keys;
    let key_style = Style::default()
        .fg(theme.overlay)
        .add_modifier(Modifier::BOLD);
    let label_style = Style::default().fg(theme.overlay);

    let mut spans = Vec::new();
    for (key, label) in [
        (&keys.toggle_settings, "settings"),
        (&keys.toggle_collapse, "collapse"),
        (&keys.quit, "quit"),
    ] {
        spans.push(Span::styled(format!(" {} ", keys.display(key)), key_style));
        spans.push(Span::styled(label, label_style));
    }

    let footer = Paragraph::new(Line::from(spans)).alignment(Alignment::Right);
    f.render_widget(footer, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::config::Settings;
    use crate::observer::Track;
    use ratatui::{backend::TestBackend, Terminal};

    fn screen(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal.draw(|f| ui(f, app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_renders_track_and_controls() {
        let mut app = App::new("Spotify", Settings::default(), None);
        app.on_track_changed(Track::new("Bohemian Rhapsody", "Queen"));

        let out = screen(&app);
        assert!(out.contains("Bohemian Rhapsody"));
        assert!(out.contains("Queen"));
        assert!(out.contains("Get Lyrics"));
        assert!(out.contains("Connected to Spotify"));
    }

    #[test]
    fn test_translate_button_only_with_lyrics() {
        let mut app = App::new("Spotify", Settings::default(), None);
        let track = Track::new("Song", "Artist");
        app.on_track_changed(track.clone());
        assert!(!screen(&app).contains("Translate"));

        app.request_lyrics();
        app.on_lyrics(&track.key(), Ok("First line\nSecond line".to_string()));
        let out = screen(&app);
        assert!(out.contains("Translate"));
        assert!(out.contains("Second line"));
    }

    #[test]
    fn test_hidden_panel_skips_lyrics() {
        let settings = Settings {
            show_panel: false,
            ..Settings::default()
        };
        let mut app = App::new("Spotify", settings, None);
        app.on_track_changed(Track::new("Song", "Artist"));
        assert!(!screen(&app).contains("Get Lyrics"));
    }

    #[test]
    fn test_settings_overlay_lists_fields() {
        let mut app = App::new("Spotify", Settings::default(), None);
        app.toggle_settings();
        let out = screen(&app);
        assert!(out.contains("Settings"));
        assert!(out.contains("Auto-translate lyrics"));
        assert!(out.contains("English"));
    }
}
