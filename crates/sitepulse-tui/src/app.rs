//! Dashboard shell: owns the screens, routes keys, and applies actions.

use std::time::Duration;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Tabs},
};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use sitepulse_core::{LocationFilter, Monitor};

use crate::action::{Action, Notification};
use crate::component::Component;
use crate::data_bridge::spawn_data_bridge;
use crate::event::{Event, EventReader};
use crate::overlay::{self, Toast};
use crate::screen::ScreenId;
use crate::screens::create_screens;
use crate::theme;
use crate::tui::Tui;

const TICK_RATE: Duration = Duration::from_millis(250);
const FRAME_RATE: Duration = Duration::from_millis(33);

pub struct App {
    monitor: Monitor,
    /// Screens in tab order.
    screens: Vec<(ScreenId, Box<dyn Component>)>,
    active: ScreenId,
    running: bool,
    help_visible: bool,
    /// True while the search prompt is capturing keys.
    typing: bool,
    query: String,
    /// Location of the most recently requested cycle.
    location: LocationFilter,
    toast: Option<Toast>,
    tx: mpsc::UnboundedSender<Action>,
    rx: mpsc::UnboundedReceiver<Action>,
    /// Stops the data bridge, which shuts the monitor down.
    bridge_cancel: CancellationToken,
}

impl App {
    pub fn new(monitor: Monitor, page_size: usize) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let screens = create_screens(&monitor.config().locations, page_size);

        Self {
            monitor,
            screens,
            active: ScreenId::default(),
            running: true,
            help_visible: false,
            typing: false,
            query: String::new(),
            location: LocationFilter::All,
            toast: None,
            tx,
            rx,
            bridge_cancel: CancellationToken::new(),
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;
        if let Some(screen) = self.screen_mut(self.active) {
            screen.set_focused(true);
        }

        tokio::spawn(spawn_data_bridge(
            self.monitor.clone(),
            self.tx.clone(),
            self.bridge_cancel.clone(),
        ));

        let mut events = EventReader::new(TICK_RATE, FRAME_RATE);
        info!(backend = %self.monitor.config().backend_url, "dashboard started");

        while self.running {
            let Some(event) = events.next().await else {
                break;
            };

            let queued = match event {
                Event::Key(key) => self.on_key(key)?,
                Event::Tick => Some(Action::Tick),
                Event::Render | Event::Resize => Some(Action::Render),
            };
            if let Some(action) = queued {
                self.tx.send(action)?;
            }

            while let Ok(action) = self.rx.try_recv() {
                self.apply(&action)?;
                if matches!(action, Action::Render) {
                    tui.draw(|frame| self.draw(frame))?;
                }
            }
        }

        self.bridge_cancel.cancel();
        events.stop();
        info!("dashboard stopped");
        Ok(())
    }

    fn screen_mut(&mut self, id: ScreenId) -> Option<&mut (dyn Component + 'static)> {
        self.screens
            .iter_mut()
            .find_map(|(sid, screen)| (*sid == id).then_some(screen.as_mut()))
    }

    // ── Keys ─────────────────────────────────────────────────────────

    /// Search prompt, then help card, then global keys, then the active screen.
    fn on_key(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.typing {
            return Ok(self.on_search_key(key.code));
        }
        if self.help_visible {
            let closes = matches!(key.code, KeyCode::Esc | KeyCode::Char('?'));
            return Ok(closes.then_some(Action::ToggleHelp));
        }
        if let Some(action) = self.global_action(key) {
            return Ok(Some(action));
        }
        match self.screen_mut(self.active) {
            Some(screen) => screen.handle_key_event(key),
            None => Ok(None),
        }
    }

    fn on_search_key(&mut self, code: KeyCode) -> Option<Action> {
        match code {
            KeyCode::Esc => Some(Action::CloseSearch),
            KeyCode::Enter => Some(Action::SearchSubmit),
            KeyCode::Backspace => {
                self.query.pop();
                Some(Action::SearchInput(self.query.clone()))
            }
            KeyCode::Char(c) => {
                self.query.push(c);
                Some(Action::SearchInput(self.query.clone()))
            }
            _ => None,
        }
    }

    fn global_action(&self, key: KeyEvent) -> Option<Action> {
        if key.modifiers == KeyModifiers::CONTROL && key.code == KeyCode::Char('c') {
            return Some(Action::Quit);
        }
        if key.modifiers != KeyModifiers::NONE {
            return None;
        }
        match key.code {
            KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Char('?') => Some(Action::ToggleHelp),
            KeyCode::Char('/') => Some(Action::OpenSearch),
            KeyCode::Char('r') => Some(Action::Refresh),
            KeyCode::Tab => Some(Action::SwitchScreen(self.active.next())),
            KeyCode::Char(c) => c
                .to_digit(10)
                .and_then(|d| u8::try_from(d).ok())
                .and_then(ScreenId::from_number)
                .map(Action::SwitchScreen),
            _ => None,
        }
    }

    // ── Actions ──────────────────────────────────────────────────────

    fn apply(&mut self, action: &Action) -> Result<()> {
        match action {
            Action::Quit => self.running = false,
            Action::Render => {}
            Action::ToggleHelp => self.help_visible = !self.help_visible,
            Action::SwitchScreen(target) => self.focus(*target),

            Action::OpenSearch => {
                self.typing = true;
                self.query.clear();
            }
            // Enter leaves the query applied; Esc drops it.
            Action::SearchSubmit => self.typing = false,
            Action::CloseSearch => {
                self.typing = false;
                self.query.clear();
                self.broadcast(action)?;
            }

            Action::SearchInput(_) | Action::SitesUpdated(_) | Action::BoardUpdated(_) => {
                self.broadcast(action)?;
            }

            Action::SelectLocation(filter) => {
                self.location = filter.clone();
                self.start_cycle(false);
                self.broadcast(action)?;
                if self.active == ScreenId::Locations {
                    self.focus(ScreenId::Status);
                }
            }

            Action::Refresh => {
                self.start_cycle(true);
                self.tx.send(Action::Notify(Notification::info("Refreshing…")))?;
            }

            Action::Tick => {
                if self.toast.as_ref().is_some_and(Toast::expired) {
                    self.toast = None;
                }
                if let Some(screen) = self.screen_mut(self.active) {
                    screen.update(action)?;
                }
            }

            Action::Notify(n) => self.toast = Some(Toast::new(n.clone())),
        }
        Ok(())
    }

    /// Every screen sees data and filter changes, focused or not.
    fn broadcast(&mut self, action: &Action) -> Result<()> {
        for (_, screen) in &mut self.screens {
            if let Some(follow_up) = screen.update(action)? {
                self.tx.send(follow_up)?;
            }
        }
        Ok(())
    }

    fn focus(&mut self, target: ScreenId) {
        if target == self.active {
            return;
        }
        debug!(from = %self.active, to = %target, "screen switch");
        let previous = std::mem::replace(&mut self.active, target);
        for (id, screen) in &mut self.screens {
            if *id == previous || *id == target {
                screen.set_focused(*id == target);
            }
        }
    }

    /// Probe the current location in the background. A newer cycle
    /// supersedes whatever the monitor is running.
    fn start_cycle(&self, reload_registry: bool) {
        let monitor = self.monitor.clone();
        let location = self.location.clone();
        tokio::spawn(async move {
            let report = if reload_registry {
                monitor.refresh(&location).await
            } else {
                monitor.run_cycle(&location).await
            };
            debug!(generation = report.generation, outcome = ?report.outcome, "cycle task done");
        });
    }

    // ── Drawing ──────────────────────────────────────────────────────

    fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let [body, tabs, status] = Layout::vertical([
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(area);

        if let Some((_, screen)) = self.screens.iter().find(|(id, _)| *id == self.active) {
            screen.render(frame, body);
        }
        frame.render_widget(self.tab_bar(), tabs);
        frame.render_widget(Paragraph::new(self.status_line()), status);

        if let Some(toast) = &self.toast {
            toast.render(frame, area);
        }
        if self.help_visible {
            overlay::render_help(frame, area);
        }
    }

    fn tab_bar(&self) -> Tabs<'static> {
        let titles = ScreenId::ALL.iter().map(|&id| {
            Span::styled(
                format!(" {} {} ", id.number(), id.label()),
                theme::tab(id == self.active),
            )
        });
        let selected = ScreenId::ALL.iter().position(|&id| id == self.active);
        Tabs::new(titles)
            .divider(Span::styled(" ", theme::key_hint()))
            .select(selected)
    }

    fn status_line(&self) -> Line<'_> {
        if self.typing {
            return Line::from(vec![
                Span::styled(" / ", Style::new().fg(theme::ACCENT)),
                Span::styled(self.query.as_str(), Style::new().fg(theme::HEADING)),
                Span::styled("█", Style::new().fg(theme::HEADING)),
                Span::styled("  Esc clear  Enter keep", theme::key_hint()),
            ]);
        }

        Line::from(vec![
            Span::raw(" "),
            Span::styled(
                self.monitor.config().backend_url.as_str(),
                Style::new().fg(theme::ORIGIN),
            ),
            Span::styled(format!(" │ {} ", self.location), Style::new().fg(theme::HEADING)),
            Span::styled("│ ? help  / search  r refresh  q quit", theme::key_hint()),
        ])
    }
}
