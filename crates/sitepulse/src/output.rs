//! Rendering for `--output`: rounded tables, serde formats, and
//! tab-separated plain lines for scripts.

use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;
use tabled::{Table, Tabled, settings::Style};

use sitepulse_core::ClientStatus;

use crate::cli::{ColorMode, OutputFormat};

// ── Color helpers ────────────────────────────────────────────────────

/// `auto` colors only an interactive stdout without `NO_COLOR`.
pub fn should_color(mode: &ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var("NO_COLOR").is_err(),
    }
}

fn paint(text: &str, tint: Tint, color: bool) -> String {
    if !color {
        return text.to_owned();
    }
    match tint {
        Tint::Good => text.green().to_string(),
        Tint::Warn => text.yellow().to_string(),
        Tint::Bad => text.red().to_string(),
    }
}

#[derive(Clone, Copy)]
enum Tint {
    Good,
    Warn,
    Bad,
}

pub fn client_badge(status: ClientStatus, color: bool) -> String {
    let tint = match status {
        ClientStatus::Online => Tint::Good,
        ClientStatus::Protected => Tint::Warn,
        ClientStatus::Offline => Tint::Bad,
    };
    paint(status.label(), tint, color)
}

pub fn server_badge(reachable: bool, color: bool) -> String {
    if reachable {
        paint("Online", Tint::Good, color)
    } else {
        paint("Offline", Tint::Bad, color)
    }
}

// ── Render dispatchers ───────────────────────────────────────────────

/// Render a list in the chosen format. `to_row` feeds the table,
/// `line_fn` the plain one-line-per-item form; the rest go through serde.
pub fn render_list<T, R>(
    format: &OutputFormat,
    data: &[T],
    to_row: impl Fn(&T) -> R,
    line_fn: impl Fn(&T) -> String,
) -> String
where
    T: serde::Serialize,
    R: Tabled,
{
    match format {
        OutputFormat::Table => {
            let rows: Vec<R> = data.iter().map(to_row).collect();
            Table::new(rows).with(Style::rounded()).to_string()
        }
        OutputFormat::Plain => data.iter().map(line_fn).collect::<Vec<_>>().join("\n"),
        structured => render_structured(structured, data),
    }
}

/// Render one item; table and plain share the human-readable `detail_fn`.
pub fn render_single<T>(
    format: &OutputFormat,
    data: &T,
    detail_fn: impl Fn(&T) -> String,
) -> String
where
    T: serde::Serialize,
{
    match format {
        OutputFormat::Table | OutputFormat::Plain => detail_fn(data),
        structured => render_structured(structured, data),
    }
}

/// Write to stdout unless quiet or empty.
pub fn print_output(output: &str, quiet: bool) {
    if !quiet && !output.is_empty() {
        let _ = writeln!(io::stdout().lock(), "{output}");
    }
}

/// Human-facing notes go to stderr so piped stdout stays parseable.
pub fn print_note(note: &str, quiet: bool) {
    if !quiet {
        let _ = writeln!(io::stderr().lock(), "{note}");
    }
}

fn render_structured<T: serde::Serialize + ?Sized>(format: &OutputFormat, data: &T) -> String {
    let rendered = match format {
        OutputFormat::JsonCompact => serde_json::to_string(data).map_err(|e| e.to_string()),
        OutputFormat::Yaml => serde_yaml::to_string(data).map_err(|e| e.to_string()),
        _ => serde_json::to_string_pretty(data).map_err(|e| e.to_string()),
    };
    rendered.expect("serialization should not fail")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn badges_without_color_are_plain_labels() {
        assert_eq!(client_badge(ClientStatus::Protected, false), "Online – Protected");
        assert_eq!(server_badge(false, false), "Offline");
    }

    #[test]
    fn colored_badges_carry_escape_codes() {
        assert!(client_badge(ClientStatus::Offline, true).contains("\u{1b}["));
    }
}
