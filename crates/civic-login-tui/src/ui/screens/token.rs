//! Token step: six digit boxes with expiry and resend countdowns

use civic_login::{FlowView, TOKEN_LENGTH};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::app::App;
use crate::ui::layout::{centered_line, centered_rect_fixed};
use crate::ui::Theme;

const BOX_WIDTH: u16 = 5;
const BOX_GAP: u16 = 1;

/// Expiry line turns amber at or below this many seconds
const EXPIRY_WARNING_SECS: u32 = 10;

/// Draw the token entry dialog
pub fn draw(frame: &mut Frame, area: Rect, app: &App, view: &FlowView) {
    let theme = &app.state.theme;
    let dialog = centered_rect_fixed(56, 18, area);

    let block = Block::default()
        .title(" Two-Step Verification ")
        .title_style(theme.title())
        .borders(Borders::ALL)
        .border_style(theme.border_focused())
        .style(Style::default().bg(theme.surface));

    let inner = block.inner(dialog);
    frame.render_widget(block, dialog);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(2), // Instructions
            Constraint::Length(1), // Spacer
            Constraint::Length(3), // Token boxes
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Expiry countdown
            Constraint::Length(1), // Resend countdown
            Constraint::Length(1), // Alert
            Constraint::Length(1), // Status
            Constraint::Min(0),
        ])
        .split(inner);

    let instructions = Paragraph::new(format!(
        "Enter the 6-digit token from your authenticator app for {}.",
        view.username
    ))
    .style(theme.text_secondary())
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });
    frame.render_widget(instructions, chunks[0]);

    draw_boxes(frame, chunks[2], view, theme);

    let expiry = if view.token_expiry_seconds == 0 {
        centered_line("Token expired", theme.danger())
    } else {
        let style = if view.token_expiry_seconds <= EXPIRY_WARNING_SECS {
            theme.warning()
        } else {
            theme.text()
        };
        centered_line(format!("Token expires in {}", view.expires_in), style)
    };
    frame.render_widget(expiry, chunks[4]);

    let resend = if view.is_resending {
        centered_line("Sending a new token...", theme.info())
    } else if view.can_resend {
        centered_line("[r] Resend token", theme.success())
    } else {
        centered_line(
            format!("Resend available in {}", view.resend_in),
            theme.text_muted(),
        )
    };
    frame.render_widget(resend, chunks[5]);

    if let Some(error) = &view.error {
        frame.render_widget(
            centered_line(format!("✗ {}", error), theme.danger()),
            chunks[6],
        );
    }

    if view.is_submitting {
        frame.render_widget(centered_line("Verifying token...", theme.info()), chunks[7]);
    }
}

/// Six single-digit boxes, centered in `area`
fn draw_boxes(frame: &mut Frame, area: Rect, view: &FlowView, theme: &Theme) {
    let total = TOKEN_LENGTH as u16 * (BOX_WIDTH + BOX_GAP) - BOX_GAP;
    let start = area.x + area.width.saturating_sub(total) / 2;

    for (i, slot) in view.token_slots.iter().enumerate() {
        let x = start + i as u16 * (BOX_WIDTH + BOX_GAP);
        if x + BOX_WIDTH > area.x + area.width {
            break;
        }
        let rect = Rect::new(x, area.y, BOX_WIDTH, area.height);

        let focused = i == view.token_focus && !view.is_submitting;
        let border = if focused {
            theme.border_focused()
        } else {
            theme.border()
        };
        let block = Block::default().borders(Borders::ALL).border_style(border);

        let digit = slot.map(String::from).unwrap_or_default();
        let cell = Paragraph::new(digit)
            .style(theme.token_digit())
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(cell, rect);
    }
}
