//! Dashboard palette and semantic styles.

use ratatui::style::{Color, Modifier, Style};

use sitepulse_core::ClientStatus;

// ── Palette ───────────────────────────────────────────────────────────

pub const ACCENT: Color = Color::Rgb(122, 162, 247); // #7aa2f7
pub const HEADING: Color = Color::Rgb(125, 207, 255); // #7dcfff
pub const ORIGIN: Color = Color::Rgb(187, 154, 247); // #bb9af7
pub const UP_GREEN: Color = Color::Rgb(158, 206, 106); // #9ece6a
pub const WARN_AMBER: Color = Color::Rgb(224, 175, 104); // #e0af68
pub const DOWN_RED: Color = Color::Rgb(247, 118, 142); // #f7768e

pub const TEXT: Color = Color::Rgb(192, 202, 245); // #c0caf5
pub const MUTED: Color = Color::Rgb(86, 95, 137); // #565f89
pub const ROW_HIGHLIGHT: Color = Color::Rgb(41, 46, 66); // #292e42
pub const SURFACE: Color = Color::Rgb(26, 27, 38); // #1a1b26

// ── Status colors ─────────────────────────────────────────────────────

pub fn client_color(status: ClientStatus) -> Color {
    match status {
        ClientStatus::Online => UP_GREEN,
        ClientStatus::Protected => WARN_AMBER,
        ClientStatus::Offline => DOWN_RED,
    }
}

pub fn server_color(reachable: bool) -> Color {
    if reachable { UP_GREEN } else { DOWN_RED }
}

// ── Semantic styles ───────────────────────────────────────────────────

pub fn title_style() -> Style {
    Style::new().fg(HEADING).bold()
}

pub fn border(focused: bool) -> Style {
    Style::new().fg(if focused { ACCENT } else { MUTED })
}

pub fn table_header() -> Style {
    Style::new().fg(HEADING).bold().underlined()
}

pub fn table_row() -> Style {
    Style::new().fg(TEXT)
}

pub fn table_selected() -> Style {
    Style::new().bg(ROW_HIGHLIGHT).add_modifier(Modifier::BOLD)
}

pub fn tab(active: bool) -> Style {
    if active {
        Style::new().fg(ACCENT).bold()
    } else {
        Style::new().fg(TEXT)
    }
}

/// Key hint text (e.g. "q quit  ? help").
pub fn key_hint() -> Style {
    Style::new().fg(MUTED)
}

pub fn key_hint_key() -> Style {
    Style::new().fg(HEADING).bold()
}
