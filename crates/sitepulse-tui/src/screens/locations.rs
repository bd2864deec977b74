//! Locations screen: per-location counts from the registry and the
//! latest cycle.

use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, TableState};

use sitepulse_core::{BoardSnapshot, ClientStatus, Location, LocationFilter, Site, StatusRecord};

use crate::action::Action;
use crate::component::Component;
use crate::theme;

/// Counts for one location row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationSummary {
    pub tag: String,
    pub label: String,
    /// Sites in the registry.
    pub sites: usize,
    /// Records from the latest cycle.
    pub probed: usize,
    pub online: usize,
    pub protected: usize,
    pub offline: usize,
    pub origins_up: usize,
}

/// One row per configured location, then any registry-only tags in
/// first-seen order.
pub fn summarize(
    locations: &[Location],
    sites: &[Arc<Site>],
    records: &[Arc<StatusRecord>],
) -> Vec<LocationSummary> {
    let mut rows: Vec<LocationSummary> = locations
        .iter()
        .map(|l| LocationSummary {
            tag: l.tag.clone(),
            label: l.label.clone(),
            ..LocationSummary::default()
        })
        .collect();

    for site in sites {
        row_for(&mut rows, &site.location).sites += 1;
    }
    for record in records {
        let row = row_for(&mut rows, &record.site.location);
        row.probed += 1;
        match record.client {
            ClientStatus::Online => row.online += 1,
            ClientStatus::Protected => row.protected += 1,
            ClientStatus::Offline => row.offline += 1,
        }
        if record.origin_reachable {
            row.origins_up += 1;
        }
    }
    rows
}

/// Row for `tag`, appending an unlabelled one if it is not known yet.
fn row_for<'a>(rows: &'a mut Vec<LocationSummary>, tag: &str) -> &'a mut LocationSummary {
    let idx = if let Some(i) = rows.iter().position(|r| r.tag == tag) {
        i
    } else {
        rows.push(LocationSummary {
            tag: tag.to_owned(),
            label: tag.to_owned(),
            ..LocationSummary::default()
        });
        rows.len() - 1
    };
    &mut rows[idx]
}

pub struct LocationsScreen {
    focused: bool,
    locations: Vec<Location>,
    sites: Arc<Vec<Arc<Site>>>,
    board: BoardSnapshot,
    rows: Vec<LocationSummary>,
    table_state: TableState,
}

impl LocationsScreen {
    pub fn new(locations: Vec<Location>) -> Self {
        let mut screen = Self {
            focused: false,
            locations,
            sites: Arc::new(Vec::new()),
            board: BoardSnapshot::default(),
            rows: Vec::new(),
            table_state: TableState::default().with_selected(Some(0)),
        };
        screen.recompute();
        screen
    }

    fn recompute(&mut self) {
        self.rows = summarize(&self.locations, &self.sites, &self.board.records);
        let len = self.rows.len();
        if let Some(sel) = self.table_state.selected() {
            self.table_state.select(Some(sel.min(len.saturating_sub(1))));
        }
    }

    fn selected_row(&self) -> Option<&LocationSummary> {
        self.rows.get(self.table_state.selected().unwrap_or(0))
    }
}

fn count_cell(n: usize, probed: usize, color: ratatui::style::Color) -> Cell<'static> {
    if probed == 0 {
        Cell::from("─").style(theme::key_hint())
    } else {
        Cell::from(n.to_string()).style(Style::default().fg(color))
    }
}

impl Component for LocationsScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                let last = self.rows.len().saturating_sub(1);
                let sel = self.table_state.selected().unwrap_or(0);
                self.table_state.select(Some((sel + 1).min(last)));
                Ok(None)
            }
            KeyCode::Char('k') | KeyCode::Up => {
                let sel = self.table_state.selected().unwrap_or(0);
                self.table_state.select(Some(sel.saturating_sub(1)));
                Ok(None)
            }
            // Probe the highlighted location.
            KeyCode::Enter => Ok(self
                .selected_row()
                .map(|r| Action::SelectLocation(LocationFilter::Tag(r.tag.clone())))),
            _ => Ok(None),
        }
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::SitesUpdated(sites) => {
                self.sites = Arc::clone(sites);
                self.recompute();
            }
            Action::BoardUpdated(snap) => {
                self.board = snap.clone();
                self.recompute();
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(format!(
                " Locations ({} sites, cycle: {}) ",
                self.sites.len(),
                self.board.location
            ))
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border(self.focused));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let layout = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(inner);

        let header = Row::new(
            ["Location", "Tag", "Sites", "Online", "Protected", "Offline", "Origins up"]
                .map(|h| Cell::from(h).style(theme::table_header())),
        );
        let rows: Vec<Row> = self
            .rows
            .iter()
            .map(|r| {
                let origins = if r.probed == 0 {
                    Cell::from("─").style(theme::key_hint())
                } else {
                    Cell::from(format!("{}/{}", r.origins_up, r.probed))
                        .style(Style::default().fg(theme::ORIGIN))
                };
                Row::new(vec![
                    Cell::from(r.label.clone()).style(Style::default().fg(theme::HEADING)),
                    Cell::from(r.tag.clone()),
                    Cell::from(r.sites.to_string()),
                    count_cell(r.online, r.probed, theme::UP_GREEN),
                    count_cell(r.protected, r.probed, theme::WARN_AMBER),
                    count_cell(r.offline, r.probed, theme::DOWN_RED),
                    origins,
                ])
                .style(theme::table_row())
            })
            .collect();
        let widths = [
            Constraint::Fill(2),
            Constraint::Fill(2),
            Constraint::Length(6),
            Constraint::Length(7),
            Constraint::Length(10),
            Constraint::Length(8),
            Constraint::Length(11),
        ];
        let table = Table::new(rows, widths)
            .header(header)
            .row_highlight_style(theme::table_selected());
        frame.render_stateful_widget(table, layout[0], &mut self.table_state.clone());

        let hints = Line::from(vec![
            Span::styled("  j/k ", theme::key_hint_key()),
            Span::styled("move  ", theme::key_hint()),
            Span::styled("Enter ", theme::key_hint_key()),
            Span::styled("probe location", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(hints), layout[1]);
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn site(location: &str, name: &str) -> Arc<Site> {
        Arc::new(Site {
            location: location.into(),
            name: name.into(),
            domain: format!("{name}.com"),
            backend_url: None,
            port: None,
        })
    }

    fn record(site: &Arc<Site>, client: ClientStatus, origin: bool) -> Arc<StatusRecord> {
        Arc::new(StatusRecord {
            site: Arc::clone(site),
            client,
            origin_reachable: origin,
        })
    }

    #[test]
    fn summary_counts_registry_and_cycle_separately() {
        let locations = vec![
            Location::new("biznet-1", "Biznet 1"),
            Location::new("biznet-2", "Biznet 2"),
        ];
        let a = site("biznet-1", "a");
        let b = site("biznet-1", "b");
        let c = site("biznet-2", "c");
        let x = site("lab", "x");
        let sites = vec![Arc::clone(&a), Arc::clone(&b), Arc::clone(&c), Arc::clone(&x)];
        let records = vec![
            record(&a, ClientStatus::Online, true),
            record(&b, ClientStatus::Protected, false),
        ];

        let rows = summarize(&locations, &sites, &records);
        assert_eq!(
            rows,
            vec![
                LocationSummary {
                    tag: "biznet-1".into(),
                    label: "Biznet 1".into(),
                    sites: 2,
                    probed: 2,
                    online: 1,
                    protected: 1,
                    offline: 0,
                    origins_up: 1,
                },
                LocationSummary {
                    tag: "biznet-2".into(),
                    label: "Biznet 2".into(),
                    sites: 1,
                    ..LocationSummary::default()
                },
                LocationSummary {
                    tag: "lab".into(),
                    label: "lab".into(),
                    sites: 1,
                    ..LocationSummary::default()
                },
            ]
        );
    }

    #[test]
    fn enter_requests_cycle_for_highlighted_location() {
        let mut screen = LocationsScreen::new(vec![Location::new("biznet-1", "Biznet 1")]);
        let action = screen
            .handle_key_event(KeyEvent::from(KeyCode::Enter))
            .ok()
            .flatten();
        assert!(matches!(
            action,
            Some(Action::SelectLocation(LocationFilter::Tag(ref t))) if t == "biznet-1"
        ));
    }
}
