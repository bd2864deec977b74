//! Colored status badges for table cells.

use ratatui::style::Style;
use ratatui::text::Span;

use sitepulse_core::ClientStatus;

use crate::theme;

pub fn client_badge(status: ClientStatus) -> Span<'static> {
    let icon = match status {
        ClientStatus::Online => "●",
        ClientStatus::Protected => "◐",
        ClientStatus::Offline => "○",
    };
    Span::styled(
        format!("{icon} {}", status.label()),
        Style::default().fg(theme::client_color(status)),
    )
}

pub fn server_badge(reachable: bool) -> Span<'static> {
    let text = if reachable { "● Online" } else { "○ Offline" };
    Span::styled(text, Style::default().fg(theme::server_color(reachable)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn badges_carry_labels_and_colors() {
        let b = client_badge(ClientStatus::Protected);
        assert_eq!(b.content, "◐ Online – Protected");
        assert_eq!(b.style.fg, Some(theme::WARN_AMBER));

        assert_eq!(server_badge(false).style.fg, Some(theme::DOWN_RED));
    }
}
