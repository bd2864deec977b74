// ── Reactive state ──
//
// The site registry cache and the status board. Both publish through
// `watch` channels so UIs can read the latest snapshot without locking.

mod board;
mod sites;

pub use board::{BoardSnapshot, CycleState, StatusBoard};
pub(crate) use sites::SiteCache;
