use crate::app::config::SettingField;
use crate::app::App;
use crate::ui::utils::{centered_rect, pad_right};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

const LABEL_WIDTH: usize = 24;

pub fn render(f: &mut Frame, app: &App) {
    if !app.show_settings {
        return;
    }
    let theme = &app.theme;
    let keys = &app.keys;

    let height = SettingField::ALL.len() as u16 + 4;
    let area: Rect = centered_rect(70, height, f.area());
    f.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(Line::from(Span::styled(
            " Settings ",
            Style::default().fg(theme.yellow).add_modifier(Modifier::BOLD),
        )))
        .title_bottom(
            Line::from(Span::styled(
                format!(
                    " {}/{} move  {}/{} change  {} close ",
                    keys.display(&keys.nav_up_alt),
                    keys.display(&keys.nav_down_alt),
                    keys.display(&keys.nav_left_alt),
                    keys.display(&keys.nav_right_alt),
                    keys.display(&keys.back)
                ),
                Style::default().fg(theme.overlay),
            ))
            .alignment(Alignment::Center),
        )
        .border_style(Style::default().fg(theme.yellow))
        .style(Style::default().bg(Color::Reset));

    let selected = app.selected_setting();
    let mut lines = vec![Line::from("")];
    for field in SettingField::ALL {
        let is_selected = field == selected;
        let marker = if is_selected { "▶ " } else { "  " };
        let label_style = if is_selected {
            Style::default().fg(theme.yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.text)
        };

        lines.push(Line::from(vec![
            Span::styled(marker, Style::default().fg(theme.yellow)),
            Span::styled(pad_right(field.label(), LABEL_WIDTH), label_style),
            Span::styled(
                app.settings.display_value(field),
                Style::default().fg(theme.cyan),
            ),
        ]));
    }

    f.render_widget(Paragraph::new(lines).block(block), area);
}
