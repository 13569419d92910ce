use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Rows taken by the now-playing card.
pub const CARD_HEIGHT: u16 = 8;
/// Rows the panel keeps when collapsed (border plus the header row).
pub const COLLAPSED_PANEL_HEIGHT: u16 = 3;

pub struct MainLayout {
    pub body_area: Rect,
    pub footer_area: Rect,
}

pub fn get_main_layout(area: Rect) -> MainLayout {
    // Footer needs 1 line at the bottom always.
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Body
            Constraint::Length(1), // Footer
        ])
        .split(area);

    MainLayout {
        body_area: chunks[0],
        footer_area: chunks[1],
    }
}

pub struct ContentLayout {
    pub card: Rect,
    pub panel: Option<Rect>,
}

/// Card on top, lyrics panel below. With the panel hidden the card takes
/// the whole body.
pub fn get_content_layout(area: Rect, show_panel: bool, collapsed: bool) -> ContentLayout {
    if !show_panel {
        return ContentLayout {
            card: area,
            panel: None,
        };
    }

    let constraints = if collapsed {
        // Spacer soaks up the rows the panel gives back
        vec![
            Constraint::Length(CARD_HEIGHT),
            Constraint::Length(COLLAPSED_PANEL_HEIGHT),
            Constraint::Min(0),
        ]
    } else {
        vec![
            Constraint::Length(CARD_HEIGHT),
            Constraint::Min(COLLAPSED_PANEL_HEIGHT),
        ]
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    ContentLayout {
        card: chunks[0],
        panel: Some(chunks[1]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_panel_gives_card_everything() {
        let area = Rect::new(0, 0, 60, 30);
        let layout = get_content_layout(area, false, false);
        assert_eq!(layout.card, area);
        assert!(layout.panel.is_none());
    }

    #[test]
    fn test_panel_sits_below_card() {
        let area = Rect::new(0, 0, 60, 30);
        let layout = get_content_layout(area, true, false);
        let panel = layout.panel.unwrap();
        assert_eq!(layout.card.height, CARD_HEIGHT);
        assert_eq!(panel.y, CARD_HEIGHT);
        assert_eq!(panel.height, 30 - CARD_HEIGHT);

        let collapsed = get_content_layout(area, true, true).panel.unwrap();
        assert_eq!(collapsed.height, COLLAPSED_PANEL_HEIGHT);
    }
}
