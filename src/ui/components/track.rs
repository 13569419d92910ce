use crate::app::{App, MetadataState};
use crate::ui::utils::truncate;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

/// Now-playing card: title, artist, metadata and the connection status.
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(Line::from(Span::styled(
            " Now Playing ",
            Style::default().fg(theme.blue).add_modifier(Modifier::BOLD),
        )))
        .border_style(Style::default().fg(theme.blue))
        .style(Style::default().bg(Color::Reset));

    let inner = block.inner(area);
    f.render_widget(block, area);

    let width = inner.width.saturating_sub(2) as usize;
    let mut lines = Vec::new();

    match &app.track {
        Some(track) => {
            lines.push(Line::from(Span::styled(
                truncate(&track.title, width),
                Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(Span::styled(
                truncate(&track.artist, width),
                Style::default().fg(theme.magenta),
            )));
            lines.extend(metadata_lines(app, width));
        }
        None => {
            lines.push(Line::from(Span::styled(
                "No track playing",
                Style::default().fg(theme.overlay),
            )));
        }
    }

    // Status pinned to the last row
    let filler = inner.height.saturating_sub(lines.len() as u16 + 1);
    lines.extend((0..filler).map(|_| Line::from("")));
    let status_color = if app.player_detected && !app.player_idle {
        theme.green
    } else {
        theme.yellow
    };
    lines.push(Line::from(Span::styled(
        app.status_line(),
        Style::default().fg(status_color),
    )));

    let paragraph = Paragraph::new(lines).alignment(Alignment::Center);
    f.render_widget(paragraph, inner);
}

fn metadata_lines(app: &App, width: usize) -> Vec<Line<'static>> {
    let theme = &app.theme;
    let dim = Style::default().fg(theme.overlay);

    match &app.metadata {
        MetadataState::Disabled | MetadataState::Idle => Vec::new(),
        MetadataState::Loading => vec![Line::from(Span::styled("Loading track info...", dim))],
        MetadataState::Failed(msg) => vec![Line::from(Span::styled(
            msg.clone(),
            Style::default().fg(theme.red),
        ))],
        MetadataState::Loaded(meta) => vec![
            Line::from(vec![
                Span::styled(truncate(&meta.album, width.saturating_sub(8)), dim),
                Span::styled(" • ", dim),
                Span::styled(meta.year.clone(), Style::default().fg(theme.cyan)),
            ]),
            Line::from(Span::styled(format!("by {}", truncate(&meta.artist, width)), dim)),
        ],
    }
}
