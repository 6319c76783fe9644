//! Presentation-only state

use crate::ui::Theme;

/// Which credential field receives typed characters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Field {
    #[default]
    Username,
    Password,
}

impl Field {
    pub fn next(self) -> Self {
        match self {
            Self::Username => Self::Password,
            Self::Password => Self::Username,
        }
    }
}

/// Active color palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }
}

/// Application state that never reaches the login flow
pub struct AppState {
    /// Focused credential field
    pub focus: Field,

    /// Render the password in plain text
    pub show_password: bool,

    /// Current palette selection
    pub theme_mode: ThemeMode,

    /// Palette for `theme_mode`
    pub theme: Theme,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            focus: Field::default(),
            show_password: false,
            theme_mode: ThemeMode::default(),
            theme: Theme::dark(),
        }
    }

    pub fn toggle_show_password(&mut self) {
        self.show_password = !self.show_password;
    }

    /// Switch between the dark and light palettes
    pub fn toggle_theme(&mut self) {
        self.theme_mode = self.theme_mode.toggled();
        self.theme = match self.theme_mode {
            ThemeMode::Dark => Theme::dark(),
            ThemeMode::Light => Theme::light(),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_theme() {
        let mut state = AppState::new();
        assert_eq!(state.theme_mode, ThemeMode::Dark);

        state.toggle_theme();
        assert_eq!(state.theme_mode, ThemeMode::Light);
        assert_eq!(state.theme.background, Theme::light().background);

        state.toggle_theme();
        assert_eq!(state.theme_mode, ThemeMode::Dark);
    }

    #[test]
    fn test_field_cycle() {
        assert_eq!(Field::Username.next(), Field::Password);
        assert_eq!(Field::Password.next(), Field::Username);
    }
}
