//! `check`: run one probe cycle and report.

use std::cell::Cell;
use std::io::IsTerminal;
use std::sync::Arc;

use tabled::Tabled;
use tracing::debug;

use sitepulse_core::{ClientStatus, CycleReport, Monitor, Paginator, StatusRecord};

use crate::cli::{CheckArgs, GlobalOpts, OutputFormat};
use crate::config;
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct StatusRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Location")]
    location: String,
    #[tabled(rename = "Program")]
    program: String,
    #[tabled(rename = "Domain")]
    domain: String,
    #[tabled(rename = "Client")]
    client: String,
    #[tabled(rename = "Backend")]
    backend: String,
    #[tabled(rename = "Server")]
    server: String,
}

fn plain_line(r: &Arc<StatusRecord>) -> String {
    let server = if r.origin_reachable { "online" } else { "offline" };
    format!("{}\t{}\t{}", r.site.domain, r.client, server)
}

// ── Summary ─────────────────────────────────────────────────────────

#[derive(Debug, Default, PartialEq, Eq)]
struct Tally {
    online: usize,
    protected: usize,
    offline: usize,
    origins_up: usize,
    total: usize,
}

impl Tally {
    fn of(records: &[Arc<StatusRecord>]) -> Self {
        records.iter().fold(Self::default(), |mut t, r| {
            match r.client {
                ClientStatus::Online => t.online += 1,
                ClientStatus::Protected => t.protected += 1,
                ClientStatus::Offline => t.offline += 1,
            }
            if r.origin_reachable {
                t.origins_up += 1;
            }
            t.total += 1;
            t
        })
    }

    fn line(&self) -> String {
        format!(
            "{} online · {} protected · {} offline · {}/{} origins reachable",
            self.online, self.protected, self.offline, self.origins_up, self.total
        )
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(args: CheckArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = config::load(global)?;
    let mut monitor_cfg = config::monitor_config(&cfg, global)?;
    if let Some(strategy) = args.strategy {
        monitor_cfg.strategy = strategy.into();
    }
    if let Some(limit) = args.max_concurrency {
        monitor_cfg.max_concurrency = limit;
    }

    let labels = monitor_cfg.clone();
    let filter = util::display_filter(&args.filter);
    let location = filter.location.clone();
    let show_progress = !global.quiet
        && matches!(global.output, OutputFormat::Table)
        && std::io::stderr().is_terminal();

    let report = Monitor::oneshot(monitor_cfg, |monitor| async move {
        let sites = monitor.try_load_sites().await?;
        let expected = sites.iter().filter(|s| location.matches(&s.location)).count();
        debug!(expected, %location, "running check cycle");

        if !show_progress {
            return Ok(monitor.run_cycle(&location).await);
        }
        Ok(run_with_progress(&monitor, &location, expected).await)
    })
    .await?;

    let records = filter.apply(&report.records);
    let color = output::should_color(&global.color);

    let page_size = args.page_size.unwrap_or(cfg.page_size);
    let (shown, offset): (&[Arc<StatusRecord>], usize) = match args.page {
        Some(page) => {
            let pager = Paginator::new(page_size);
            let view = pager.page(&records, page.saturating_sub(1));
            if matches!(global.output, OutputFormat::Table) {
                output::print_note(
                    &format!(
                        "page {}/{} ({} sites)",
                        view.index + 1,
                        view.total_pages,
                        view.total_items
                    ),
                    global.quiet,
                );
            }
            (view.items, view.index * pager.page_size())
        }
        None => (&records, 0),
    };

    if shown.is_empty() && matches!(global.output, OutputFormat::Table) {
        output::print_output("no data", global.quiet);
    } else {
        let row_no = Cell::new(offset);
        let out = output::render_list(
            &global.output,
            shown,
            |r| {
                row_no.set(row_no.get() + 1);
                StatusRow {
                    index: row_no.get(),
                    location: labels.location_label(&r.site.location).to_owned(),
                    program: r.site.name.clone(),
                    domain: r.site.domain.clone(),
                    client: output::client_badge(r.client, color),
                    backend: r.site.backend_display().to_owned(),
                    server: output::server_badge(r.origin_reachable, color),
                }
            },
            plain_line,
        );
        output::print_output(&out, global.quiet);
    }

    let tally = Tally::of(&records);
    if matches!(global.output, OutputFormat::Table) {
        output::print_note(&tally.line(), global.quiet);
    }

    if args.fail_on_offline && tally.offline > 0 {
        return Err(CliError::OfflineSites {
            count: tally.offline,
        });
    }
    Ok(())
}

/// Run the cycle while mirroring board progress on an indicatif bar.
async fn run_with_progress(
    monitor: &Monitor,
    location: &sitepulse_core::LocationFilter,
    expected: usize,
) -> CycleReport {
    let progress = util::cycle_progress(expected);
    let mut board = monitor.board_stream();

    let cycle = monitor.run_cycle(location);
    tokio::pin!(cycle);

    let report = loop {
        tokio::select! {
            report = &mut cycle => break report,
            Some(snap) = board.changed() => {
                let (done, _) = snap.progress();
                progress.set_position(u64::try_from(done).unwrap_or(u64::MAX));
            }
        }
    };
    progress.finish_and_clear();
    report
}
