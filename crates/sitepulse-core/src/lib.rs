//! Status engine between `sitepulse-api` and the front-ends (CLI / TUI).
//!
//! - **[`Monitor`]** — Facade owning the HTTP clients, the cached site
//!   registry, and the [`StatusBoard`]. [`run_cycle()`](Monitor::run_cycle)
//!   probes every site for a location; starting a new cycle cancels the
//!   previous one. [`Monitor::oneshot()`] is the CLI entry point.
//!
//! - **Classifier** ([`classify`]) — Maps a domain-check outcome to
//!   [`ClientStatus`]. An explicit body token always beats the HTTP code.
//!
//! - **Prober** ([`probe`]) — Origin HEAD→GET reachability and the
//!   per-site probe pair.
//!
//! - **[`StatusBoard`]** — Generation-guarded `watch` snapshot of the
//!   current cycle. Writes from a superseded cycle are dropped.
//!
//! - **View helpers** ([`filter`], [`paginate`]) — Location/search filtering
//!   and page slicing. Both return new views and never touch the source.

pub mod classify;
pub mod config;
pub mod error;
pub mod filter;
pub mod model;
pub mod monitor;
pub mod paginate;
pub mod probe;
pub mod store;
pub mod stream;

// ── Primary re-exports ──────────────────────────────────────────────
pub use classify::{CheckOutcome, StatusToken, classify};
pub use config::{MonitorConfig, Strategy, Timeouts, TlsVerification};
pub use error::CoreError;
pub use filter::{DisplayFilter, LocationFilter, Searchable};
pub use model::{ClientStatus, Location, Site, StatusRecord, default_locations};
pub use monitor::{CycleOutcome, CycleReport, Monitor};
pub use paginate::{PageView, Paginator};
pub use store::{BoardSnapshot, CycleState, StatusBoard};
pub use stream::BoardStream;
