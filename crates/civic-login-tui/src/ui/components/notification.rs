//! Toast notification component

use civic_login::{Notification, NotificationKind};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use unicode_width::UnicodeWidthStr;

use crate::ui::Theme;

/// Maximum toasts drawn at once
pub const MAX_VISIBLE: usize = 4;

/// Toast width including borders
const TOAST_WIDTH: u16 = 44;

fn style_for(kind: NotificationKind, theme: &Theme) -> Style {
    match kind {
        NotificationKind::Info => theme.info(),
        NotificationKind::Success => theme.success(),
        NotificationKind::Warning => theme.warning(),
        NotificationKind::Error => theme.danger(),
    }
}

/// Lines needed to show `text` word-wrapped at `width` columns
///
/// Greedy fill like the paragraph wrapper: words move to the next line
/// when they do not fit, and words wider than a line are split.
fn wrapped_lines(text: &str, width: u16) -> u16 {
    let width = usize::from(width.max(1));
    let mut lines = 1;
    let mut used = 0;

    for word in text.split_whitespace() {
        let mut word_width = word.width();
        let needed = if used == 0 { word_width } else { used + 1 + word_width };
        if needed <= width {
            used = needed;
            continue;
        }
        if used > 0 {
            lines += 1;
        }
        while word_width > width {
            word_width -= width;
            lines += 1;
        }
        used = word_width;
    }
    lines
}

/// Height of one toast: borders, optional title, wrapped message
pub fn toast_height(notification: &Notification, width: u16) -> u16 {
    let inner = width.saturating_sub(2);
    match &notification.title {
        Some(_) => 3 + wrapped_lines(&notification.message, inner),
        None => {
            // Untitled toasts put the icon in front of the message
            let line = format!("{} {}", notification.kind.icon(), notification.message);
            2 + wrapped_lines(&line, inner)
        }
    }
}

/// Render one toast into `area`
pub fn render_toast(frame: &mut Frame, area: Rect, notification: &Notification, theme: &Theme) {
    let style = style_for(notification.kind, theme);

    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(style)
        .style(Style::default().bg(theme.surface));

    let mut lines = Vec::with_capacity(2);
    if let Some(title) = &notification.title {
        lines.push(Line::from(vec![
            Span::styled(format!("{} ", notification.kind.icon()), style),
            Span::styled(title.as_str(), style.add_modifier(Modifier::BOLD)),
        ]));
        lines.push(Line::styled(notification.message.as_str(), theme.text()));
    } else {
        lines.push(Line::from(vec![
            Span::styled(format!("{} ", notification.kind.icon()), style),
            Span::styled(notification.message.as_str(), theme.text()),
        ]));
    }

    let content = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(content, area);
}

/// Render the toast stack anchored to the top-right corner of `area`
///
/// `notifications` is oldest first, so the newest toast sits at the bottom.
/// Toasts that no longer fit vertically are skipped.
pub fn render_stack(frame: &mut Frame, area: Rect, notifications: &[Notification], theme: &Theme) {
    let width = TOAST_WIDTH.min(area.width);
    let x = area.x + area.width.saturating_sub(width + 1);
    let bottom = area.y + area.height;
    let mut y = area.y + 1;

    for notification in notifications {
        let height = toast_height(notification, width);
        if y + height > bottom {
            break;
        }
        render_toast(frame, Rect::new(x, y, width, height), notification, theme);
        y += height;
    }
}
