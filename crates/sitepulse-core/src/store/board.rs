// ── Status board ──
//
// Single `watch` snapshot of the current cycle. Every write carries the
// cycle's generation; `send_if_modified` drops writes whose generation is
// not the current one, so a stale cycle can never overwrite or interleave
// with a newer cycle's records.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use strum::Display;
use tokio::sync::watch;

use crate::filter::LocationFilter;
use crate::model::StatusRecord;

/// Lifecycle of the cycle shown on the board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CycleState {
    /// No cycle has run yet.
    #[default]
    Idle,
    Running,
    Complete,
    Cancelled,
}

/// What the renderer sees.
#[derive(Debug, Clone, Default)]
pub struct BoardSnapshot {
    pub generation: u64,
    pub state: CycleState,
    /// Location the cycle was started for.
    pub location: LocationFilter,
    /// Number of sites the cycle will probe.
    pub expected: usize,
    pub records: Arc<Vec<Arc<StatusRecord>>>,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl BoardSnapshot {
    pub fn is_running(&self) -> bool {
        self.state == CycleState::Running
    }

    /// `(published, expected)`.
    pub fn progress(&self) -> (usize, usize) {
        (self.records.len(), self.expected)
    }

    /// True when a finished cycle produced nothing to show.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty() && !self.is_running()
    }
}

/// Generation-guarded status board.
pub struct StatusBoard {
    tx: watch::Sender<BoardSnapshot>,
}

impl Default for StatusBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusBoard {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(BoardSnapshot::default());
        Self { tx }
    }

    /// Current snapshot (records are an `Arc` clone).
    pub fn snapshot(&self) -> BoardSnapshot {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<BoardSnapshot> {
        self.tx.subscribe()
    }

    pub fn generation(&self) -> u64 {
        self.tx.borrow().generation
    }

    /// Start `generation`, clearing the previous cycle's records.
    /// Rejected unless `generation` is newer than the board's.
    pub(crate) fn begin(
        &self,
        generation: u64,
        location: LocationFilter,
        expected: usize,
    ) -> bool {
        self.tx.send_if_modified(|snap| {
            if generation <= snap.generation {
                return false;
            }
            *snap = BoardSnapshot {
                generation,
                state: CycleState::Running,
                location,
                expected,
                records: Arc::new(Vec::with_capacity(expected)),
                started_at: Some(Utc::now()),
                finished_at: None,
            };
            true
        })
    }

    /// Publish one settled record.
    pub(crate) fn append(&self, generation: u64, record: Arc<StatusRecord>) -> bool {
        self.tx.send_if_modified(|snap| {
            if !snap.accepts(generation) {
                return false;
            }
            Arc::make_mut(&mut snap.records).push(record);
            true
        })
    }

    /// Publish a whole batch at once.
    pub(crate) fn publish_batch(&self, generation: u64, records: Vec<Arc<StatusRecord>>) -> bool {
        self.tx.send_if_modified(|snap| {
            if !snap.accepts(generation) {
                return false;
            }
            snap.records = Arc::new(records);
            true
        })
    }

    /// Close `generation` with `state` (`Complete` or `Cancelled`).
    pub(crate) fn finish(&self, generation: u64, state: CycleState) -> bool {
        self.tx.send_if_modified(|snap| {
            if !snap.accepts(generation) {
                return false;
            }
            snap.state = state;
            snap.finished_at = Some(Utc::now());
            true
        })
    }
}

impl BoardSnapshot {
    fn accepts(&self, generation: u64) -> bool {
        self.generation == generation && self.state == CycleState::Running
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ClientStatus, Site};

    fn record(name: &str) -> Arc<StatusRecord> {
        Arc::new(StatusRecord {
            site: Arc::new(Site {
                location: "biznet-1".into(),
                name: name.into(),
                domain: format!("{name}.com"),
                backend_url: None,
                port: None,
            }),
            client: ClientStatus::Online,
            origin_reachable: false,
        })
    }

    #[test]
    fn stale_generation_cannot_write() {
        let board = StatusBoard::new();
        assert!(board.begin(1, LocationFilter::All, 2));
        assert!(board.append(1, record("a")));

        assert!(board.begin(2, LocationFilter::All, 1));
        assert!(!board.append(1, record("stale")));
        assert!(!board.finish(1, CycleState::Complete));
        assert!(board.append(2, record("b")));

        let snap = board.snapshot();
        assert_eq!(snap.generation, 2);
        assert_eq!(snap.records.len(), 1);
        assert_eq!(snap.records[0].site.name, "b");
        assert!(snap.is_running());
    }

    #[test]
    fn older_generation_cannot_begin() {
        let board = StatusBoard::new();
        assert!(board.begin(3, LocationFilter::All, 0));
        assert!(!board.begin(2, LocationFilter::All, 0));
        assert_eq!(board.generation(), 3);
    }

    #[test]
    fn finished_cycle_is_frozen() {
        let board = StatusBoard::new();
        assert!(board.begin(1, LocationFilter::All, 1));
        assert!(board.publish_batch(1, vec![record("a")]));
        assert!(board.finish(1, CycleState::Complete));
        assert!(!board.append(1, record("late")));

        let snap = board.snapshot();
        assert_eq!(snap.state, CycleState::Complete);
        assert_eq!(snap.progress(), (1, 1));
        assert!(snap.finished_at.is_some());
    }

    #[test]
    fn subscribers_see_appends() {
        let board = StatusBoard::new();
        let mut rx = board.subscribe();
        assert!(board.begin(1, LocationFilter::All, 1));
        assert!(rx.has_changed().unwrap_or(false));
        rx.mark_unchanged();
        assert!(board.append(1, record("a")));
        assert!(rx.has_changed().unwrap_or(false));
    }
}
