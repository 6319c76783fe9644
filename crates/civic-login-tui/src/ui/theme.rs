//! Visual theme and color palette

use ratatui::style::{Color, Modifier, Style};

/// Portal color palette
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    // Branding
    pub accent: Color,
    pub background: Color,
    pub surface: Color,

    // Status colors
    pub success: Color,
    pub warning: Color,
    pub danger: Color,
    pub info: Color,

    // UI element colors
    pub border: Color,
    pub border_focused: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_muted: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Dark palette (default)
    pub fn dark() -> Self {
        Self {
            accent: Color::Rgb(66, 133, 244),    // #4285F4
            background: Color::Rgb(18, 18, 18),  // #121212
            surface: Color::Rgb(33, 33, 33),     // #212121

            success: Color::Rgb(76, 175, 80), // #4CAF50
            warning: Color::Rgb(255, 152, 0), // #FF9800
            danger: Color::Rgb(244, 67, 54),  // #F44336
            info: Color::Rgb(33, 150, 243),   // #2196F3

            border: Color::Rgb(66, 66, 66),            // #424242
            border_focused: Color::Rgb(66, 133, 244),  // #4285F4
            text_primary: Color::Rgb(250, 250, 250),   // #FAFAFA
            text_secondary: Color::Rgb(189, 189, 189), // #BDBDBD
            text_muted: Color::Rgb(117, 117, 117),     // #757575
        }
    }

    /// Light palette
    pub fn light() -> Self {
        Self {
            accent: Color::Rgb(25, 103, 210),     // #1967D2
            background: Color::Rgb(245, 245, 245), // #F5F5F5
            surface: Color::Rgb(255, 255, 255),    // #FFFFFF

            success: Color::Rgb(46, 125, 50), // #2E7D32
            warning: Color::Rgb(230, 81, 0),  // #E65100
            danger: Color::Rgb(198, 40, 40),  // #C62828
            info: Color::Rgb(21, 101, 192),   // #1565C0

            border: Color::Rgb(189, 189, 189),        // #BDBDBD
            border_focused: Color::Rgb(25, 103, 210), // #1967D2
            text_primary: Color::Rgb(33, 33, 33),     // #212121
            text_secondary: Color::Rgb(97, 97, 97),   // #616161
            text_muted: Color::Rgb(158, 158, 158),    // #9E9E9E
        }
    }

    /// Whole-screen background
    pub fn base(&self) -> Style {
        Style::default().bg(self.background).fg(self.text_primary)
    }

    pub fn text(&self) -> Style {
        Style::default().fg(self.text_primary)
    }

    pub fn text_secondary(&self) -> Style {
        Style::default().fg(self.text_secondary)
    }

    pub fn text_muted(&self) -> Style {
        Style::default().fg(self.text_muted)
    }

    pub fn title(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn border_focused(&self) -> Style {
        Style::default().fg(self.border_focused)
    }

    pub fn success(&self) -> Style {
        Style::default().fg(self.success)
    }

    pub fn warning(&self) -> Style {
        Style::default().fg(self.warning)
    }

    pub fn danger(&self) -> Style {
        Style::default()
            .fg(self.danger)
            .add_modifier(Modifier::BOLD)
    }

    pub fn info(&self) -> Style {
        Style::default().fg(self.info)
    }

    /// Input field style
    pub fn input(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.text_primary).bg(self.surface)
        } else {
            Style::default().fg(self.text_secondary).bg(self.surface)
        }
    }

    /// Border for an input, red when the field has an error
    pub fn input_border(&self, focused: bool, invalid: bool) -> Style {
        if invalid {
            Style::default().fg(self.danger)
        } else if focused {
            self.border_focused()
        } else {
            self.border()
        }
    }

    /// Token digit style
    pub fn token_digit(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }
}
