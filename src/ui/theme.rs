use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::app::config::AppConfig;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub base: Color,
    pub surface: Color,
    pub overlay: Color,
    pub text: Color,
    pub red: Color,
    pub green: Color,
    pub yellow: Color,
    pub blue: Color,
    pub magenta: Color,
    pub cyan: Color,
}

impl Default for Theme {
    /// Catppuccin Mocha
    fn default() -> Self {
        Self {
            base: Color::Rgb(30, 30, 46),
            surface: Color::Rgb(49, 50, 68),
            overlay: Color::Rgb(108, 112, 134),
            text: Color::Rgb(205, 214, 244),
            red: Color::Rgb(243, 139, 168),
            green: Color::Rgb(166, 227, 161),
            yellow: Color::Rgb(249, 226, 175),
            blue: Color::Rgb(137, 180, 250),
            magenta: Color::Rgb(203, 166, 247),
            cyan: Color::Rgb(148, 226, 213),
        }
    }
}

// Theme files may nest everything under [theme]
#[derive(Serialize, Deserialize)]
struct ThemeFile {
    theme: Theme,
}

pub fn load_current_theme() -> Theme {
    load_theme_from(&AppConfig::get_theme_path())
}

pub fn load_theme_from(path: &Path) -> Theme {
    if path.exists() {
        if let Ok(content) = fs::read_to_string(path) {
            if let Ok(wrapper) = toml::from_str::<ThemeFile>(&content) {
                return wrapper.theme;
            }
            // Flat file
            if let Ok(theme) = toml::from_str::<Theme>(&content) {
                return theme;
            }
            tracing::warn!(path = %path.display(), "ignoring unreadable theme file");
        }
        return Theme::default();
    }

    // First run: write the default so users have something to edit
    let default_theme = Theme::default();
    let wrapper = ThemeFile {
        theme: default_theme.clone(),
    };
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    if let Ok(toml_str) = toml::to_string_pretty(&wrapper) {
        let _ = fs::write(path, toml_str);
    }

    default_theme
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_load_writes_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("theme.toml");

        assert_eq!(load_theme_from(&path), Theme::default());
        assert!(path.exists());
        assert_eq!(load_theme_from(&path), Theme::default());
    }

    #[test]
    fn test_garbage_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("theme.toml");
        fs::write(&path, "not = [a theme").unwrap();

        assert_eq!(load_theme_from(&path), Theme::default());
    }
}
