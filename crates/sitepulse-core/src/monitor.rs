// ── Monitor ──
//
// Lifecycle facade for one backend: owns the HTTP clients, the cached
// registry, and the status board. Each cycle gets a fresh child
// cancellation token and a generation number; starting a cycle cancels the
// previous token and the board refuses the old generation's writes.

use std::sync::Arc;
use std::time::Duration;

use futures_util::StreamExt;
use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use sitepulse_api::{BackendClient, OriginClient, TlsMode, TransportConfig};

use crate::config::{MonitorConfig, Strategy, TlsVerification};
use crate::error::CoreError;
use crate::filter::LocationFilter;
use crate::model::{Site, StatusRecord};
use crate::probe::probe_site;
use crate::store::{CycleState, SiteCache, StatusBoard};
use crate::stream::BoardStream;

/// How a cycle ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Every site was probed and published.
    Completed,
    /// The cycle's token was cancelled before it finished.
    Cancelled,
    /// A newer cycle took over the board.
    Superseded,
}

/// Result of one [`Monitor::run_cycle`] call.
#[derive(Debug, Clone)]
pub struct CycleReport {
    pub generation: u64,
    pub outcome: CycleOutcome,
    /// Records this cycle published, in registry order.
    pub records: Vec<Arc<StatusRecord>>,
}

/// Generation, cancellation token and location of the latest requested
/// cycle, updated together under one lock.
struct CycleSlot {
    generation: u64,
    cancel: CancellationToken,
    location: LocationFilter,
}

/// A reserved cycle. It may only touch the board while its generation is
/// still the slot's.
struct Ticket {
    generation: u64,
    token: CancellationToken,
    location: LocationFilter,
}

/// Cheaply cloneable handle; all clones share one board and registry.
#[derive(Clone)]
pub struct Monitor {
    inner: Arc<MonitorInner>,
}

struct MonitorInner {
    config: MonitorConfig,
    backend: BackendClient,
    origin: OriginClient,
    sites: SiteCache,
    board: StatusBoard,
    cancel: CancellationToken,
    cycle: Mutex<CycleSlot>,
    task_handles: Mutex<Vec<JoinHandle<()>>>,
}

impl Monitor {
    /// Build the HTTP clients. No request is made until
    /// [`load_sites()`](Self::load_sites).
    pub fn new(config: MonitorConfig) -> Result<Self, CoreError> {
        let transport = build_transport(&config);
        let timeouts = config.timeouts;

        let backend = BackendClient::new(config.backend_url.clone(), &transport)?
            .with_timeouts(timeouts.registry, timeouts.check);
        let origin = OriginClient::new(&transport)?
            .with_timeouts(timeouts.origin_head, timeouts.origin_get);

        let cancel = CancellationToken::new();
        let first_cycle = cancel.child_token();

        Ok(Self {
            inner: Arc::new(MonitorInner {
                config,
                backend,
                origin,
                sites: SiteCache::new(),
                board: StatusBoard::new(),
                cancel,
                cycle: Mutex::new(CycleSlot {
                    generation: 0,
                    cancel: first_cycle,
                    location: LocationFilter::All,
                }),
                task_handles: Mutex::new(Vec::new()),
            }),
        })
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.inner.config
    }

    // ── Registry ─────────────────────────────────────────────────────

    /// Fetch the registry without touching the cache. Errors propagate.
    pub async fn fetch_sites(&self, selected_server: Option<&str>) -> Result<Vec<Site>, CoreError> {
        let records = self
            .inner
            .backend
            .list_all_sites(self.inner.config.registry_page_limit, selected_server)
            .await?;
        Ok(records.into_iter().map(Site::from).collect())
    }

    /// Refresh the cached registry, propagating fetch errors. The cache is
    /// left untouched on error.
    pub async fn try_load_sites(&self) -> Result<Arc<Vec<Arc<Site>>>, CoreError> {
        let sites = self.fetch_sites(None).await?;
        info!(count = sites.len(), "site registry loaded");
        Ok(self.inner.sites.replace(sites))
    }

    /// Refresh the cached registry. A failed fetch leaves an empty list
    /// ("no data") and is only logged.
    pub async fn load_sites(&self) -> Arc<Vec<Arc<Site>>> {
        match self.try_load_sites().await {
            Ok(sites) => sites,
            Err(e) => {
                warn!(error = %e, "site registry unavailable, showing no data");
                self.inner.sites.replace(Vec::new())
            }
        }
    }

    pub fn sites_snapshot(&self) -> Arc<Vec<Arc<Site>>> {
        self.inner.sites.snapshot()
    }

    pub fn subscribe_sites(&self) -> watch::Receiver<Arc<Vec<Arc<Site>>>> {
        self.inner.sites.subscribe()
    }

    // ── Board ────────────────────────────────────────────────────────

    pub fn board(&self) -> &StatusBoard {
        &self.inner.board
    }

    pub fn board_stream(&self) -> BoardStream {
        BoardStream::new(self.inner.board.subscribe())
    }

    // ── Cycles ───────────────────────────────────────────────────────

    /// Probe every cached site in `location` and publish to the board.
    ///
    /// Cancels whatever cycle is running. Per-site failures are folded into
    /// the records; this never errors.
    pub async fn run_cycle(&self, location: &LocationFilter) -> CycleReport {
        let ticket = self.reserve(Some(location)).await;
        self.run_reserved(ticket).await
    }

    /// Reload the registry, then run a cycle.
    ///
    /// The cycle is reserved before the reload starts, so a cycle requested
    /// while the registry is loading supersedes this one.
    pub async fn refresh(&self, location: &LocationFilter) -> CycleReport {
        let ticket = self.reserve(Some(location)).await;
        self.load_sites().await;
        self.run_reserved(ticket).await
    }

    /// Cancel the previous cycle and take the next generation. `None` keeps
    /// the location of the last requested cycle.
    async fn reserve(&self, location: Option<&LocationFilter>) -> Ticket {
        let mut slot = self.inner.cycle.lock().await;
        slot.cancel.cancel();
        slot.generation += 1;
        slot.cancel = self.inner.cancel.child_token();
        if let Some(location) = location {
            slot.location = location.clone();
        }
        Ticket {
            generation: slot.generation,
            token: slot.cancel.clone(),
            location: slot.location.clone(),
        }
    }

    async fn run_reserved(&self, ticket: Ticket) -> CycleReport {
        let Ticket {
            generation,
            token,
            location,
        } = ticket;

        let sites: Vec<Arc<Site>> = self
            .inner
            .sites
            .snapshot()
            .iter()
            .filter(|s| location.matches(&s.location))
            .cloned()
            .collect();

        let refused = {
            let slot = self.inner.cycle.lock().await;
            match (slot.generation == generation, token.is_cancelled()) {
                (false, _) => Some(CycleOutcome::Superseded),
                (true, true) => Some(CycleOutcome::Cancelled),
                (true, false) if self.inner.board.begin(generation, location.clone(), sites.len()) => {
                    None
                }
                (true, false) => Some(CycleOutcome::Superseded),
            }
        };
        if let Some(outcome) = refused {
            debug!(generation, ?outcome, "cycle dropped before it began");
            return CycleReport {
                generation,
                outcome,
                records: Vec::new(),
            };
        }

        let strategy = self.inner.config.strategy;
        info!(generation, %location, sites = sites.len(), %strategy, "status cycle started");

        let (outcome, records) = match strategy {
            Strategy::Sequential => self.run_sequential(generation, &token, &sites).await,
            Strategy::FanOut => self.run_fan_out(generation, &token, &sites).await,
        };

        let final_state = match outcome {
            CycleOutcome::Completed => CycleState::Complete,
            CycleOutcome::Cancelled | CycleOutcome::Superseded => CycleState::Cancelled,
        };
        self.inner.board.finish(generation, final_state);
        info!(generation, ?outcome, published = records.len(), "status cycle finished");

        CycleReport {
            generation,
            outcome,
            records,
        }
    }

    /// Cancel the running cycle, if any. Its board state becomes
    /// `Cancelled`.
    pub async fn cancel_cycle(&self) {
        self.inner.cycle.lock().await.cancel.cancel();
    }

    async fn run_sequential(
        &self,
        generation: u64,
        token: &CancellationToken,
        sites: &[Arc<Site>],
    ) -> (CycleOutcome, Vec<Arc<StatusRecord>>) {
        let inner = &self.inner;
        let mut records = Vec::with_capacity(sites.len());

        for site in sites {
            if token.is_cancelled() {
                return (CycleOutcome::Cancelled, records);
            }
            let record = tokio::select! {
                biased;
                () = token.cancelled() => return (CycleOutcome::Cancelled, records),
                r = probe_site(&inner.backend, &inner.origin, Arc::clone(site)) => Arc::new(r),
            };
            if !inner.board.append(generation, Arc::clone(&record)) {
                debug!(generation, "board moved on, dropping sequential cycle");
                return (CycleOutcome::Superseded, records);
            }
            records.push(record);
        }

        (CycleOutcome::Completed, records)
    }

    async fn run_fan_out(
        &self,
        generation: u64,
        token: &CancellationToken,
        sites: &[Arc<Site>],
    ) -> (CycleOutcome, Vec<Arc<StatusRecord>>) {
        let inner = &self.inner;
        let limit = match inner.config.max_concurrency {
            0 => sites.len().max(1),
            n => n,
        };

        // Each probe owns its handles so the cycle future stays `Send`.
        // `buffered` keeps registry order regardless of completion order.
        let owned = Arc::clone(inner);
        let batch = futures_util::stream::iter(sites.to_vec().into_iter().map(move |site| {
            let inner = Arc::clone(&owned);
            async move { Arc::new(probe_site(&inner.backend, &inner.origin, site).await) }
        }))
        .buffered(limit)
        .collect::<Vec<_>>();

        let records = tokio::select! {
            biased;
            () = token.cancelled() => return (CycleOutcome::Cancelled, Vec::new()),
            r = batch => r,
        };

        if inner.board.publish_batch(generation, records.clone()) {
            (CycleOutcome::Completed, records)
        } else {
            debug!(generation, "board moved on, dropping fan-out batch");
            (CycleOutcome::Superseded, Vec::new())
        }
    }

    // ── Lifecycle ────────────────────────────────────────────────────

    /// Spawn the periodic refresh task when `refresh_interval_secs > 0`.
    pub async fn start(&self) {
        let interval_secs = self.inner.config.refresh_interval_secs;
        if interval_secs == 0 {
            return;
        }
        let monitor = self.clone();
        let cancel = self.inner.cancel.clone();
        self.inner
            .task_handles
            .lock()
            .await
            .push(tokio::spawn(refresh_task(monitor, interval_secs, cancel)));
        debug!(interval_secs, "periodic refresh started");
    }

    /// Cancel everything and join background tasks.
    pub async fn shutdown(&self) {
        self.inner.cancel.cancel();
        let mut handles = self.inner.task_handles.lock().await;
        for handle in handles.drain(..) {
            let _ = handle.await;
        }
        debug!("monitor shut down");
    }

    // ── One-shot convenience ─────────────────────────────────────────

    /// Build, run the closure, shut down.
    ///
    /// No periodic refresh is started; the closure decides whether to use
    /// the lenient [`load_sites()`](Self::load_sites) or the strict
    /// [`fetch_sites()`](Self::fetch_sites).
    pub async fn oneshot<F, Fut, T>(config: MonitorConfig, f: F) -> Result<T, CoreError>
    where
        F: FnOnce(Monitor) -> Fut,
        Fut: std::future::Future<Output = Result<T, CoreError>>,
    {
        let mut cfg = config;
        cfg.refresh_interval_secs = 0;

        let monitor = Monitor::new(cfg)?;
        let result = f(monitor.clone()).await;
        monitor.shutdown().await;
        result
    }
}

// ── Background tasks ─────────────────────────────────────────────────

async fn refresh_task(monitor: Monitor, interval_secs: u64, cancel: CancellationToken) {
    let mut interval = tokio::time::interval(Duration::from_secs(interval_secs));
    interval.tick().await; // consume the immediate first tick

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            _ = interval.tick() => {
                let ticket = monitor.reserve(None).await;
                monitor.load_sites().await;
                let report = monitor.run_reserved(ticket).await;
                debug!(generation = report.generation, outcome = ?report.outcome, "periodic refresh");
            }
        }
    }
}

// ── Helpers ──────────────────────────────────────────────────────────

fn build_transport(config: &MonitorConfig) -> TransportConfig {
    TransportConfig {
        tls: match &config.tls {
            TlsVerification::SystemDefaults => TlsMode::System,
            TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
        },
        ..TransportConfig::default()
    }
}
