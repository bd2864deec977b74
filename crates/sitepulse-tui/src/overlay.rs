//! Floating chrome drawn over the active screen: toast and help card.

use std::time::{Duration, Instant};

use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::action::{Notification, NotificationLevel};
use crate::theme;

const TOAST_TTL: Duration = Duration::from_secs(3);

const SHORTCUTS: &[(&str, &[(&str, &str)])] = &[
    (
        "Navigation",
        &[
            ("1/2 Tab", "Switch screen"),
            ("j/k ↑/↓", "Move selection"),
            ("n/p", "Next / previous page"),
            ("l/L", "Next / previous location"),
            ("Enter", "Probe location (Locations)"),
        ],
    ),
    (
        "Global",
        &[
            ("/", "Search name, domain, location"),
            ("r", "Reload registry and probe"),
            ("?", "This help"),
            ("q Ctrl+C", "Quit"),
        ],
    ),
];

/// A notification pinned to the bottom-right corner until it ages out.
pub struct Toast {
    notification: Notification,
    shown_at: Instant,
}

impl Toast {
    pub fn new(notification: Notification) -> Self {
        Self {
            notification,
            shown_at: Instant::now(),
        }
    }

    pub fn expired(&self) -> bool {
        self.shown_at.elapsed() > TOAST_TTL
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let message = self.notification.message.as_str();
        let (accent, glyph) = match self.notification.level {
            NotificationLevel::Error => (theme::DOWN_RED, "✗"),
            NotificationLevel::Warning => (theme::WARN_AMBER, "!"),
            NotificationLevel::Info => (theme::HEADING, "·"),
        };

        let width = u16::try_from(message.chars().count())
            .unwrap_or(u16::MAX)
            .saturating_add(6)
            .clamp(20, 60)
            .min(area.width);
        let height = 3.min(area.height);
        // Two rows up keeps the tab and status bars visible.
        let slot = Rect::new(
            area.x + area.width.saturating_sub(width + 1),
            area.y + area.height.saturating_sub(height + 2),
            width,
            height,
        );

        let card = Block::new()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::new().fg(accent))
            .style(Style::new().bg(theme::SURFACE));
        let body = Line::from(vec![
            Span::styled(format!(" {glyph} "), Style::new().fg(accent)),
            Span::styled(message, Style::new().fg(theme::TEXT)),
        ]);

        frame.render_widget(Clear, slot);
        frame.render_widget(Paragraph::new(body).block(card), slot);
    }
}

pub fn render_help(frame: &mut Frame, area: Rect) {
    let mut lines = Vec::new();
    for (heading, keys) in SHORTCUTS {
        lines.push(Line::default());
        lines.push(Line::styled(format!("  {heading}"), Style::new().fg(theme::HEADING)));
        lines.extend(keys.iter().map(|(key, what)| {
            Line::from(vec![
                Span::styled(format!("  {key:<10}"), theme::key_hint_key()),
                Span::styled(*what, theme::key_hint()),
            ])
        }));
    }
    lines.push(Line::default());
    lines.push(Line::styled("Esc or ? to close", theme::key_hint()).centered());

    let height = u16::try_from(lines.len()).unwrap_or(u16::MAX).saturating_add(2);
    let slot = centered(area, 52, height);
    let card = Block::new()
        .title(" Keyboard Shortcuts ")
        .title_style(theme::title_style())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border(true))
        .style(Style::new().bg(theme::SURFACE));

    frame.render_widget(Clear, slot);
    frame.render_widget(Paragraph::new(lines).block(card), slot);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(4));
    Rect::new(
        area.x + area.width.saturating_sub(width) / 2,
        area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_stays_inside_area() {
        let area = Rect::new(0, 0, 30, 10);
        let r = centered(area, 52, 18);
        assert!(r.width <= 26 && r.height <= 6);
        assert!(r.x + r.width <= area.width && r.y + r.height <= area.height);
    }

    #[test]
    fn fresh_toast_is_live() {
        assert!(!Toast::new(Notification::info("hi")).expired());
    }
}
