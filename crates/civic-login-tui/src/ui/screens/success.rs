//! Shown between an accepted token and the automatic reset

use civic_login::FlowView;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders};

use crate::ui::layout::{centered_line, centered_rect_fixed};
use crate::ui::Theme;

pub fn draw(frame: &mut Frame, area: Rect, view: &FlowView, theme: &Theme) {
    let dialog = centered_rect_fixed(48, 9, area);

    let block = Block::default()
        .title(" Signed In ")
        .title_style(theme.success())
        .borders(Borders::ALL)
        .border_style(theme.success())
        .style(Style::default().bg(theme.surface));

    let inner = block.inner(dialog);
    frame.render_widget(block, dialog);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

    frame.render_widget(centered_line("✓ Login successful", theme.success()), chunks[0]);
    frame.render_widget(
        centered_line(format!("Welcome, {}!", view.username), theme.text()),
        chunks[1],
    );
    frame.render_widget(
        centered_line("Returning to the sign-in screen...", theme.text_muted()),
        chunks[2],
    );
}
