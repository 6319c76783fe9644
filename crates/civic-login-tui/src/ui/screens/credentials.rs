//! Credentials step: username and password

use civic_login::utils::mask;
use civic_login::FlowView;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::{App, Field};
use crate::ui::layout::{centered_line, centered_rect_fixed};
use crate::ui::Theme;

/// Attempts-remaining warning shows at or below this count
const WARN_ATTEMPTS: u32 = 3;

/// Draw the credentials form
pub fn draw(frame: &mut Frame, area: Rect, app: &App, view: &FlowView) {
    let theme = &app.state.theme;
    let dialog = centered_rect_fixed(56, 19, area);

    let block = Block::default()
        .title(" Sign In ")
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
            Constraint::Length(1), // Subtitle
            Constraint::Length(1), // Spacer
            Constraint::Length(3), // Username
            Constraint::Length(1), // Username error
            Constraint::Length(3), // Password
            Constraint::Length(1), // Password error
            Constraint::Length(1), // Alert
            Constraint::Length(1), // Status / attempts warning
            Constraint::Min(0),
        ])
        .split(inner);

    frame.render_widget(
        centered_line("Sign in with your portal account", theme.text_secondary()),
        chunks[0],
    );

    let focus = app.state.focus;
    let username_error = view.field_errors.username.as_deref();
    let password_error = view.field_errors.password.as_deref();

    draw_field(
        frame,
        chunks[2],
        "Username",
        &view.username,
        focus == Field::Username,
        username_error.is_some(),
        theme,
    );
    draw_field_error(frame, chunks[3], username_error, theme);

    let password = if app.state.show_password {
        app.flow.state().password.as_str().to_owned()
    } else {
        mask(&app.flow.state().password)
    };
    draw_field(
        frame,
        chunks[4],
        "Password",
        &password,
        focus == Field::Password,
        password_error.is_some(),
        theme,
    );
    draw_field_error(frame, chunks[5], password_error, theme);

    // Authentication-level failures
    if let Some(error) = &view.error {
        frame.render_widget(
            centered_line(format!("✗ {}", error), theme.danger()),
            chunks[6],
        );
    }

    if view.is_submitting {
        frame.render_widget(centered_line("Verifying credentials...", theme.info()), chunks[7]);
    } else if (1..=WARN_ATTEMPTS).contains(&view.attempts_remaining) {
        let warning = format!(
            "⚠ {} attempts remaining before lockout",
            view.attempts_remaining
        );
        frame.render_widget(centered_line(warning, theme.warning()), chunks[7]);
    }
}

fn draw_field(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    value: &str,
    focused: bool,
    invalid: bool,
    theme: &Theme,
) {
    let block = Block::default()
        .title(format!(" {} ", label))
        .borders(Borders::ALL)
        .border_style(theme.input_border(focused, invalid));

    let cursor = if focused { "▏" } else { "" };
    let input = Paragraph::new(format!("{}{}", value, cursor))
        .style(theme.input(focused))
        .block(block);
    frame.render_widget(input, area);
}

fn draw_field_error(frame: &mut Frame, area: Rect, error: Option<&str>, theme: &Theme) {
    if let Some(error) = error {
        let line = Paragraph::new(format!(" {}", error)).style(theme.danger());
        frame.render_widget(line, area);
    }
}
