use crate::app::{App, LyricsState, TranslationState};
use crate::translate::language_name;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;

    let arrow = if app.collapsed { "▸" } else { "▾" };
    let title = Line::from(vec![Span::styled(
        format!(" {} Lyrics ", arrow),
        Style::default()
            .fg(theme.magenta)
            .add_modifier(Modifier::BOLD),
    )]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(title)
        .title_alignment(Alignment::Left)
        .border_style(Style::default().fg(theme.magenta))
        .style(Style::default().bg(Color::Reset));

    let inner = block.inner(area);
    f.render_widget(block, area);

    if app.collapsed {
        let hint = Paragraph::new(Span::styled(
            format!("press {} to expand", app.keys.display(&app.keys.toggle_collapse)),
            Style::default().fg(theme.overlay),
        ))
        .alignment(Alignment::Center);
        f.render_widget(hint, inner);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Controls
            Constraint::Length(1), // Notice
            Constraint::Min(0),    // Text
        ])
        .split(inner);

    render_controls(f, chunks[0], app);

    if let Some(notice) = &app.notice {
        let notice = Paragraph::new(Span::styled(
            notice.as_str(),
            Style::default().fg(theme.yellow),
        ))
        .alignment(Alignment::Center);
        f.render_widget(notice, chunks[1]);
    }

    render_body(f, chunks[2], app);
}

fn button<'a>(key: String, label: &'a str, color: Color, busy: bool) -> Vec<Span<'a>> {
    let style = if busy {
        Style::default().fg(color).add_modifier(Modifier::DIM)
    } else {
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    };
    vec![
        Span::styled(format!("[{}] ", key), Style::default().fg(color)),
        Span::styled(label, style),
    ]
}

fn render_controls(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let keys = &app.keys;

    let mut spans = button(
        keys.display(&keys.fetch_lyrics),
        app.fetch_label(),
        theme.green,
        app.lyrics == LyricsState::Loading,
    );

    // Translate controls appear once there is something to translate
    if app.can_translate() {
        spans.push(Span::raw("   "));
        spans.extend(button(
            keys.display(&keys.translate),
            app.translate_label(),
            theme.blue,
            app.translation == TranslationState::Loading,
        ));
        spans.push(Span::styled(
            format!(
                "  {} {} {}",
                keys.display(&keys.prev_language),
                language_name(&app.target_lang),
                keys.display(&keys.next_language)
            ),
            Style::default().fg(theme.cyan),
        ));
    }

    f.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
        area,
    );
}

fn render_body(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;

    let text: Text = match &app.lyrics {
        LyricsState::Idle => Text::styled(
            "\nPress the fetch key to load lyrics",
            Style::default().fg(theme.overlay),
        ),
        LyricsState::Loading => {
            Text::styled("\nFetching Lyrics...", Style::default().fg(theme.yellow))
        }
        LyricsState::Failed(err) => {
            let mut lines = vec![
                Line::from(""),
                Line::from(Span::styled(err.clone(), Style::default().fg(theme.red))),
            ];
            if let Some(track) = &app.track {
                lines.push(Line::from(Span::styled(
                    format!("Searched for: \"{} {}\"", track.title, track.artist),
                    Style::default().fg(theme.overlay),
                )));
            }
            Text::from(lines)
        }
        LyricsState::Loaded(lyrics) => {
            let mut lines: Vec<Line> = lyrics
                .lines()
                .map(|l| Line::from(Span::styled(l.to_string(), Style::default().fg(theme.text))))
                .collect();
            lines.extend(translation_lines(app));
            Text::from(lines)
        }
    };

    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .scroll((app.lyrics_scroll, 0));
    f.render_widget(paragraph, area);
}

fn translation_lines(app: &App) -> Vec<Line<'static>> {
    let theme = &app.theme;
    let header = |label: String, color: Color| {
        vec![
            Line::from(""),
            Line::from(Span::styled(
                label,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )),
        ]
    };

    match &app.translation {
        TranslationState::Idle => Vec::new(),
        TranslationState::Loading => header("Translating...".to_string(), theme.yellow),
        TranslationState::Failed(err) => header(err.clone(), theme.red),
        TranslationState::Loaded { lang, text } => {
            let mut lines = header(format!("── {} ──", language_name(lang)), theme.cyan);
            lines.extend(text.lines().map(|l| {
                Line::from(Span::styled(
                    l.to_string(),
                    Style::default().fg(theme.text).add_modifier(Modifier::ITALIC),
                ))
            }));
            lines
        }
    }
}
