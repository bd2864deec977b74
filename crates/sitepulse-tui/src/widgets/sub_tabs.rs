//! Horizontal sub-tab bar used inside screens (location selector).

use ratatui::text::{Line, Span};

use crate::theme;

/// One line of tabs with `active_index` bracketed and highlighted.
pub fn render_sub_tabs<'a, S: AsRef<str>>(labels: &'a [S], active_index: usize) -> Line<'a> {
    let mut spans = Vec::with_capacity(labels.len() * 2);

    for (i, label) in labels.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  ", theme::key_hint()));
        }
        let label = label.as_ref();
        if i == active_index {
            spans.push(Span::styled(format!("[{label}]"), theme::tab(true)));
        } else {
            spans.push(Span::styled(label, theme::tab(false)));
        }
    }

    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn active_tab_is_bracketed() {
        let line = render_sub_tabs(&["ALL", "Biznet 1", "Biznet 2"], 1);
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "ALL  [Biznet 1]  Biznet 2");
    }
}
