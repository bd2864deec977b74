//! All possible UI actions. Actions are the only way state changes.

use std::sync::Arc;

use sitepulse_core::{BoardSnapshot, LocationFilter, Site};

use crate::screen::ScreenId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Warning,
    Error,
}

/// A toast shown for a few seconds in the bottom-right corner.
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
}

impl Notification {
    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Error,
        }
    }

    pub fn warning(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Warning,
        }
    }

    pub fn info(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Info,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Action {
    // ── Lifecycle ──────────────────────────────────────────────────
    Quit,
    Tick,
    Render,

    // ── Navigation ────────────────────────────────────────────────
    SwitchScreen(ScreenId),
    ToggleHelp,

    // ── Search ────────────────────────────────────────────────────
    OpenSearch,
    CloseSearch,
    SearchInput(String),
    SearchSubmit,

    // ── Cycles ────────────────────────────────────────────────────
    /// Probe this location (cancels whatever is running).
    SelectLocation(LocationFilter),
    /// Reload the registry, then probe the current location.
    Refresh,

    // ── Data (from the monitor) ───────────────────────────────────
    SitesUpdated(Arc<Vec<Arc<Site>>>),
    BoardUpdated(BoardSnapshot),

    // ── Notifications ─────────────────────────────────────────────
    Notify(Notification),
}
