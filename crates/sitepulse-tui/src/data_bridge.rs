//! Data bridge: connects [`Monitor`] state to TUI actions.
//!
//! Loads the registry, kicks off the first cycle, then forwards every
//! board write and registry reload as an [`Action`] until cancelled.

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use sitepulse_core::{LocationFilter, Monitor};

use crate::action::{Action, Notification};

pub async fn spawn_data_bridge(
    monitor: Monitor,
    action_tx: mpsc::UnboundedSender<Action>,
    cancel: CancellationToken,
) {
    let mut board = monitor.board_stream();
    let mut sites = monitor.subscribe_sites();

    let _ = action_tx.send(Action::BoardUpdated(board.current().clone()));

    match monitor.try_load_sites().await {
        Ok(loaded) => {
            sites.mark_unchanged();
            if loaded.is_empty() {
                let _ = action_tx.send(Action::Notify(Notification::warning("No sites loaded")));
            }
            let _ = action_tx.send(Action::SitesUpdated(loaded));
        }
        Err(e) => {
            warn!(error = %e, "site registry unavailable");
            let _ = action_tx.send(Action::Notify(Notification::error(format!(
                "Registry unavailable: {e}"
            ))));
        }
    }

    monitor.start().await;

    let first = monitor.clone();
    tokio::spawn(async move {
        first.run_cycle(&LocationFilter::All).await;
    });

    loop {
        tokio::select! {
            biased;

            () = cancel.cancelled() => break,

            Some(snap) = board.changed() => {
                let _ = action_tx.send(Action::BoardUpdated(snap));
            }
            Ok(()) = sites.changed() => {
                let list = sites.borrow_and_update().clone();
                debug!(count = list.len(), "dispatching SitesUpdated");
                if list.is_empty() {
                    let _ = action_tx.send(Action::Notify(Notification::warning("No sites loaded")));
                }
                let _ = action_tx.send(Action::SitesUpdated(list));
            }
        }
    }

    monitor.shutdown().await;
    debug!("data bridge shut down");
}
