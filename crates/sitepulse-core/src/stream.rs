// ── Board subscriptions ──

use tokio::sync::watch;

use crate::store::BoardSnapshot;

/// A subscription to the status board.
///
/// `current()` is the snapshot seen last; `changed()` waits for the next
/// write from the running cycle.
pub struct BoardStream {
    current: BoardSnapshot,
    receiver: watch::Receiver<BoardSnapshot>,
}

impl BoardStream {
    pub(crate) fn new(receiver: watch::Receiver<BoardSnapshot>) -> Self {
        let current = receiver.borrow().clone();
        Self { current, receiver }
    }

    pub fn current(&self) -> &BoardSnapshot {
        &self.current
    }

    /// Wait for the next change. `None` once the board is dropped.
    pub async fn changed(&mut self) -> Option<BoardSnapshot> {
        self.receiver.changed().await.ok()?;
        let snap = self.receiver.borrow_and_update().clone();
        self.current = snap.clone();
        Some(snap)
    }
}
