//! `sites`: list the registry without probing.

use tabled::Tabled;

use sitepulse_core::{Monitor, Site};

use crate::cli::{GlobalOpts, OutputFormat, SitesArgs};
use crate::config;
use crate::error::CliError;
use crate::output;

use super::util;

/// Registry page size used by `--all-pages` when none is configured.
const ALL_PAGES_LIMIT: u32 = 100;

#[derive(Tabled)]
struct SiteRow {
    #[tabled(rename = "Location")]
    location: String,
    #[tabled(rename = "Program")]
    program: String,
    #[tabled(rename = "Domain")]
    domain: String,
    #[tabled(rename = "Backend")]
    backend: String,
    #[tabled(rename = "Port")]
    port: String,
}

pub async fn handle(args: SitesArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = config::load(global)?;
    let mut monitor_cfg = config::monitor_config(&cfg, global)?;
    if args.all_pages {
        monitor_cfg.registry_page_limit = monitor_cfg.registry_page_limit.max(ALL_PAGES_LIMIT);
    }
    let labels = monitor_cfg.clone();

    let filter = util::display_filter(&args.filter);
    let selected = filter.location.tag().map(str::to_owned);

    let sites = Monitor::oneshot(monitor_cfg, |monitor| async move {
        monitor.fetch_sites(selected.as_deref()).await
    })
    .await?;

    // The backend may ignore selectedServer, so filter locally as well.
    let sites = filter.apply(&sites);

    if sites.is_empty() && matches!(global.output, OutputFormat::Table) {
        output::print_output("no data", global.quiet);
        return Ok(());
    }

    let out = output::render_list(
        &global.output,
        &sites,
        |s: &Site| SiteRow {
            location: labels.location_label(&s.location).to_owned(),
            program: s.name.clone(),
            domain: s.domain.clone(),
            backend: s.backend_display().to_owned(),
            port: s.port.clone().unwrap_or_else(|| "-".into()),
        },
        |s| format!("{}\t{}\t{}", s.location, s.name, s.domain),
    );
    output::print_output(&out, global.quiet);
    if matches!(global.output, OutputFormat::Table) {
        output::print_note(&format!("{} sites", sites.len()), global.quiet);
    }
    Ok(())
}
