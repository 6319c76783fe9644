//! Layout helpers for consistent screen structure

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use super::Theme;

/// Standard screen layout with header, content, and footer
pub struct ScreenLayout {
    pub header: Rect,
    pub content: Rect,
    pub footer: Rect,
}

impl ScreenLayout {
    pub fn new(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Header
                Constraint::Min(10),   // Content
                Constraint::Length(2), // Footer
            ])
            .split(area);

        Self {
            header: chunks[0],
            content: chunks[1],
            footer: chunks[2],
        }
    }
}

/// Create a fixed-size centered box, clipped to `area`
pub fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

/// Render the header bar with the portal name, step and clock
pub fn render_header(frame: &mut Frame, area: Rect, step: &str, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(theme.border());

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(24),
            Constraint::Min(10),
            Constraint::Length(8),
        ])
        .split(inner);

    let logo = Paragraph::new(" \u{25C6} MUNICIPAL PORTAL").style(theme.title());
    frame.render_widget(logo, chunks[0]);

    let crumb = Paragraph::new(step)
        .style(theme.text_secondary())
        .alignment(Alignment::Center);
    frame.render_widget(crumb, chunks[1]);

    let time = chrono::Local::now().format("%H:%M").to_string();
    let clock = Paragraph::new(time)
        .style(theme.text_muted())
        .alignment(Alignment::Right);
    frame.render_widget(clock, chunks[2]);
}

/// Render a footer with key hints
pub fn render_footer(frame: &mut Frame, area: Rect, hints: &[(&str, &str)], theme: &Theme) {
    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(theme.border());

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let hint_text: String = hints
        .iter()
        .map(|(key, action)| format!("[{}] {}", key, action))
        .collect::<Vec<_>>()
        .join("  ");

    let footer = Paragraph::new(hint_text)
        .style(theme.text_muted())
        .alignment(Alignment::Center);
    frame.render_widget(footer, inner);
}

/// One centered line of text
pub fn centered_line<'a>(text: impl Into<Line<'a>>, style: Style) -> Paragraph<'a> {
    Paragraph::new(text.into())
        .style(style)
        .alignment(Alignment::Center)
}
