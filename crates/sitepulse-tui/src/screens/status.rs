//! Status screen: paginated table of the current cycle's records.

use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, TableState};

use sitepulse_core::{
    BoardSnapshot, CycleState, DisplayFilter, Location, LocationFilter, PageView, Paginator,
    StatusRecord,
};

use crate::action::Action;
use crate::component::Component;
use crate::theme;
use crate::widgets::{badge, sub_tabs};

pub struct StatusScreen {
    focused: bool,
    locations: Vec<Location>,
    /// 0 = ALL, `i` = `locations[i - 1]`.
    location_idx: usize,
    board: BoardSnapshot,
    search_query: String,
    paginator: Paginator,
    page: usize,
    view: Vec<Arc<StatusRecord>>,
    table_state: TableState,
    throbber_state: throbber_widgets_tui::ThrobberState,
}

impl StatusScreen {
    pub fn new(locations: Vec<Location>, page_size: usize) -> Self {
        Self {
            focused: false,
            locations,
            location_idx: 0,
            board: BoardSnapshot::default(),
            search_query: String::new(),
            paginator: Paginator::new(page_size),
            page: 0,
            view: Vec::new(),
            table_state: TableState::default().with_selected(Some(0)),
            throbber_state: throbber_widgets_tui::ThrobberState::default(),
        }
    }

    pub fn location(&self) -> LocationFilter {
        match self.location_idx.checked_sub(1) {
            None => LocationFilter::All,
            Some(i) => self
                .locations
                .get(i)
                .map_or(LocationFilter::All, |l| LocationFilter::Tag(l.tag.clone())),
        }
    }

    /// Step the location selector, wrapping. Returns the new selection.
    fn step_location(&mut self, forward: bool) -> LocationFilter {
        let n = self.locations.len() + 1;
        self.location_idx = if forward {
            (self.location_idx + 1) % n
        } else {
            (self.location_idx + n - 1) % n
        };
        self.page = 0;
        self.table_state.select(Some(0));
        self.recompute_view();
        self.location()
    }

    fn recompute_view(&mut self) {
        let filter = DisplayFilter::new(self.location(), self.search_query.clone());
        self.view = filter.apply(&self.board.records);
        let last = self.paginator.total_pages(self.view.len()) - 1;
        self.page = self.page.min(last);
        self.clamp_selection();
    }

    fn current_page(&self) -> PageView<'_, Arc<StatusRecord>> {
        self.paginator.page(&self.view, self.page)
    }

    fn clamp_selection(&mut self) {
        let len = self.current_page().items.len();
        let sel = self.table_state.selected().unwrap_or(0);
        self.table_state
            .select(Some(if len == 0 { 0 } else { sel.min(len - 1) }));
    }

    fn move_selection(&mut self, down: bool) {
        let len = self.current_page().items.len();
        if len == 0 {
            return;
        }
        let sel = self.table_state.selected().unwrap_or(0);
        let next = if down {
            (sel + 1).min(len - 1)
        } else {
            sel.saturating_sub(1)
        };
        self.table_state.select(Some(next));
    }

    fn turn_page(&mut self, forward: bool) {
        let total = self.paginator.total_pages(self.view.len());
        let next = if forward {
            (self.page + 1).min(total - 1)
        } else {
            self.page.saturating_sub(1)
        };
        if next != self.page {
            self.page = next;
            self.table_state.select(Some(0));
        }
    }

    fn tab_labels(&self) -> Vec<&str> {
        std::iter::once("ALL")
            .chain(self.locations.iter().map(|l| l.label.as_str()))
            .collect()
    }

    fn location_label<'a>(&'a self, tag: &'a str) -> &'a str {
        self.locations
            .iter()
            .find(|l| l.tag == tag)
            .map_or(tag, |l| l.label.as_str())
    }

    fn progress_line(&self) -> Line<'_> {
        let (done, expected) = self.board.progress();
        match self.board.state {
            CycleState::Idle => {
                Line::from(Span::styled("  waiting for registry", theme::key_hint()))
            }
            CycleState::Running => Line::from(Span::styled(
                format!("  probing {done}/{expected}"),
                Style::default().fg(theme::HEADING),
            )),
            CycleState::Complete | CycleState::Cancelled => {
                let took = match (self.board.started_at, self.board.finished_at) {
                    (Some(start), Some(end)) => (end - start)
                        .to_std()
                        .map(|d| {
                            let secs = std::time::Duration::from_secs(d.as_secs());
                            format!(" in {}", humantime::format_duration(secs))
                        })
                        .unwrap_or_default(),
                    _ => String::new(),
                };
                let (word, color) = if self.board.state == CycleState::Complete {
                    ("checked", theme::UP_GREEN)
                } else {
                    ("cancelled after", theme::WARN_AMBER)
                };
                Line::from(Span::styled(
                    format!("  {word} {done}/{expected} sites{took}"),
                    Style::default().fg(color),
                ))
            }
        }
    }

    fn empty_message(&self) -> &'static str {
        if self.board.is_running() {
            "Loading…"
        } else {
            "no data"
        }
    }
}

impl Component for StatusScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.move_selection(true);
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.move_selection(false);
                None
            }
            KeyCode::Char('n') | KeyCode::Right => {
                self.turn_page(true);
                None
            }
            KeyCode::Char('p') | KeyCode::Left => {
                self.turn_page(false);
                None
            }
            KeyCode::Char('l') => Some(Action::SelectLocation(self.step_location(true))),
            KeyCode::Char('L') => Some(Action::SelectLocation(self.step_location(false))),
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            // Selection made elsewhere (Locations screen).
            Action::SelectLocation(filter) if *filter != self.location() => {
                self.location_idx = filter.tag().map_or(0, |tag| {
                    self.locations
                        .iter()
                        .position(|l| l.tag == tag)
                        .map_or(0, |i| i + 1)
                });
                self.page = 0;
                self.table_state.select(Some(0));
                self.recompute_view();
            }
            Action::BoardUpdated(snap) => {
                self.board = snap.clone();
                self.recompute_view();
            }
            Action::SearchInput(query) => {
                self.search_query.clone_from(query);
                self.page = 0;
                self.table_state.select(Some(0));
                self.recompute_view();
            }
            Action::CloseSearch => {
                self.search_query.clear();
                self.recompute_view();
            }
            Action::Tick if self.board.is_running() => {
                self.throbber_state.calc_next();
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let page = self.current_page();
        let title = if self.search_query.is_empty() {
            format!(" Sites ({}/{}) ", self.view.len(), self.board.records.len())
        } else {
            format!(
                " Sites ({}/{}) [\"{}\"] ",
                self.view.len(),
                self.board.records.len(),
                self.search_query
            )
        };
        let block = Block::default()
            .title(title)
            .title_style(theme::title_style())
            .title_bottom(
                Line::from(format!(" page {}/{} ", page.index + 1, page.total_pages))
                    .right_aligned(),
            )
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border(self.focused));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let layout = Layout::vertical([
            Constraint::Length(1), // location tabs
            Constraint::Length(1), // progress
            Constraint::Min(1),    // table
            Constraint::Length(1), // hints
        ])
        .split(inner);

        let labels = self.tab_labels();
        frame.render_widget(
            Paragraph::new(sub_tabs::render_sub_tabs(&labels, self.location_idx)),
            layout[0],
        );

        if self.board.is_running() {
            let (done, expected) = self.board.progress();
            let throbber = throbber_widgets_tui::Throbber::default()
                .label(format!(" probing {done}/{expected}"))
                .style(Style::default().fg(theme::HEADING))
                .throbber_style(Style::default().fg(theme::ACCENT));
            frame.render_stateful_widget(throbber, layout[1], &mut self.throbber_state.clone());
        } else {
            frame.render_widget(Paragraph::new(self.progress_line()), layout[1]);
        }

        if page.items.is_empty() {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    format!("  {}", self.empty_message()),
                    Style::default().fg(theme::TEXT),
                )),
                layout[2],
            );
        } else {
            let header = Row::new(
                ["#", "Location", "Program", "Domain", "Client", "Backend", "Server"]
                    .map(|h| Cell::from(h).style(theme::table_header())),
            );
            let offset = page.index * self.paginator.page_size();
            let rows: Vec<Row> = page
                .items
                .iter()
                .enumerate()
                .map(|(i, r)| {
                    Row::new(vec![
                        Cell::from((offset + i + 1).to_string()),
                        Cell::from(self.location_label(&r.site.location).to_owned()),
                        Cell::from(r.site.name.clone())
                            .style(Style::default().fg(theme::HEADING)),
                        Cell::from(r.site.domain.clone()),
                        Cell::from(badge::client_badge(r.client)),
                        Cell::from(r.site.backend_display().to_owned())
                            .style(Style::default().fg(theme::ORIGIN)),
                        Cell::from(badge::server_badge(r.origin_reachable)),
                    ])
                    .style(theme::table_row())
                })
                .collect();
            let widths = [
                Constraint::Length(4),
                Constraint::Length(14),
                Constraint::Fill(2),
                Constraint::Fill(2),
                Constraint::Length(22),
                Constraint::Fill(2),
                Constraint::Length(10),
            ];
            let table = Table::new(rows, widths)
                .header(header)
                .row_highlight_style(theme::table_selected());
            frame.render_stateful_widget(table, layout[2], &mut self.table_state.clone());
        }

        let hints = Line::from(vec![
            Span::styled("  j/k ", theme::key_hint_key()),
            Span::styled("move  ", theme::key_hint()),
            Span::styled("n/p ", theme::key_hint_key()),
            Span::styled("page  ", theme::key_hint()),
            Span::styled("l/L ", theme::key_hint_key()),
            Span::styled("location  ", theme::key_hint()),
            Span::styled("r ", theme::key_hint_key()),
            Span::styled("refresh", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(hints), layout[3]);
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }
}
