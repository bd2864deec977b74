//! Shared helpers for command handlers.

use indicatif::{ProgressBar, ProgressStyle};

use sitepulse_core::{DisplayFilter, LocationFilter};

use crate::cli::FilterArgs;
use crate::error::CliError;

/// Build the display filter from `--location` / `--search`.
pub fn display_filter(args: &FilterArgs) -> DisplayFilter {
    DisplayFilter::new(
        location_filter(&args.location),
        args.search.clone().unwrap_or_default(),
    )
}

pub fn location_filter(raw: &str) -> LocationFilter {
    raw.parse().unwrap_or_default()
}

/// Prompt for confirmation, auto-approving if `force` was passed.
pub fn confirm(message: &str, force: bool) -> Result<bool, CliError> {
    if force {
        return Ok(true);
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(prompt_err)?;
    Ok(confirmed)
}

/// Map a dialoguer / interactive I/O failure into CliError.
pub fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

/// Progress bar for a probe cycle of `total` sites, drawn on stderr.
pub fn cycle_progress(total: usize) -> ProgressBar {
    let progress = ProgressBar::new(u64::try_from(total).unwrap_or(u64::MAX));
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .expect("progress template is hardcoded and should be valid")
            .progress_chars("█▓░"),
    );
    progress.set_message("probing");
    progress
}
