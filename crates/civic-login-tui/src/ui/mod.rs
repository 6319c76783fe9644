//! UI rendering

pub mod components;
pub mod layout;
pub mod screens;
pub mod theme;

pub use theme::Theme;

use civic_login::Step;
use ratatui::prelude::*;
use ratatui::widgets::Block;

use crate::app::App;
use components::notification;
use layout::{render_footer, render_header, ScreenLayout};

const CREDENTIAL_HINTS: &[(&str, &str)] = &[
    ("Tab", "Next field"),
    ("Enter", "Sign in"),
    ("^R", "Show password"),
    ("^T", "Theme"),
    ("Esc", "Quit"),
];

const TOKEN_HINTS: &[(&str, &str)] = &[
    ("0-9", "Digit"),
    ("←/→", "Move"),
    ("r", "Resend"),
    ("Esc", "Back"),
    ("^D", "Dismiss"),
    ("^L", "Log out"),
];

const SUCCESS_HINTS: &[(&str, &str)] = &[("^L", "Log out"), ("^Q", "Quit")];

/// Main render function - draws the current step and the toast stack
pub fn render(frame: &mut Frame, app: &App) {
    let theme = &app.state.theme;
    let view = app.flow.view();
    let area = frame.area();

    frame.render_widget(Block::default().style(theme.base()), area);

    let layout = ScreenLayout::new(area);

    let (crumb, hints) = if view.login_succeeded {
        ("Signed in", SUCCESS_HINTS)
    } else {
        match view.step {
            Step::Credentials => ("Step 1 of 2 · Credentials", CREDENTIAL_HINTS),
            Step::Token => ("Step 2 of 2 · One-time token", TOKEN_HINTS),
        }
    };
    render_header(frame, layout.header, crumb, theme);

    if view.login_succeeded {
        screens::success::draw(frame, layout.content, &view, theme);
    } else {
        match view.step {
            Step::Credentials => screens::credentials::draw(frame, layout.content, app, &view),
            Step::Token => screens::token::draw(frame, layout.content, app, &view),
        }
    }

    render_footer(frame, layout.footer, hints, theme);

    // Toasts float above everything else
    let toasts = app.flow.notifications().visible(notification::MAX_VISIBLE);
    notification::render_stack(frame, area, &toasts, theme);
}
