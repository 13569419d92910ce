use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::state::{App, Request};

/// Route a key press. Returns the work the press asks for, if any.
pub fn handle_key(key: KeyEvent, app: &mut App) -> Option<Request> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    // Ctrl+C always quits
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.is_running = false;
        return None;
    }

    if app.show_settings {
        handle_settings_mode(key, app)
    } else {
        handle_normal_mode(key, app)
    }
}

fn handle_normal_mode(key: KeyEvent, app: &mut App) -> Option<Request> {
    let keys = app.keys.clone();

    if keys.matches(key, &keys.quit) {
        app.is_running = false;
        return None;
    }

    if keys.matches(key, &keys.toggle_settings) {
        app.toggle_settings();
        return None;
    }

    if keys.matches(key, &keys.toggle_collapse) {
        app.toggle_collapse();
        return None;
    }

    // Everything below lives inside the panel
    if app.collapsed || !app.settings.show_panel {
        return None;
    }

    if keys.matches(key, &keys.fetch_lyrics) {
        return app.request_lyrics();
    }

    if keys.matches(key, &keys.translate) {
        return app.request_translation();
    }

    if keys.matches(key, &keys.next_language) {
        app.cycle_target_lang(true);
        return None;
    }

    if keys.matches(key, &keys.prev_language) {
        app.cycle_target_lang(false);
        return None;
    }

    if keys.matches_any(key, &[&keys.nav_down, &keys.nav_down_alt]) {
        app.scroll_lyrics(true);
    } else if keys.matches_any(key, &[&keys.nav_up, &keys.nav_up_alt]) {
        app.scroll_lyrics(false);
    }
    None
}

fn handle_settings_mode(key: KeyEvent, app: &mut App) -> Option<Request> {
    let keys = app.keys.clone();

    if keys.matches_any(key, &[&keys.back, &keys.toggle_settings, &keys.quit]) {
        app.show_settings = false;
        return None;
    }

    if keys.matches_any(key, &[&keys.nav_down, &keys.nav_down_alt]) {
        app.move_setting_selection(true);
        return None;
    }

    if keys.matches_any(key, &[&keys.nav_up, &keys.nav_up_alt]) {
        app.move_setting_selection(false);
        return None;
    }

    if keys.matches_any(key, &[&keys.nav_right, &keys.nav_right_alt, &keys.confirm]) {
        return app.adjust_selected_setting(true);
    }

    if keys.matches_any(key, &[&keys.nav_left, &keys.nav_left_alt]) {
        return app.adjust_selected_setting(false);
    }

    None
}
