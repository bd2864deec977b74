//! CLI-side config resolution: file + env via `sitepulse-config`, then
//! global flag overrides.

use std::path::PathBuf;

use sitepulse_config::Config;
use sitepulse_core::MonitorConfig;

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Config file in effect: `--config` or the platform path.
pub fn config_path(global: &GlobalOpts) -> PathBuf {
    global
        .config
        .clone()
        .unwrap_or_else(sitepulse_config::config_path)
}

/// Load file + env, then apply `--backend-url` / `--insecure`.
pub fn load(global: &GlobalOpts) -> Result<Config, CliError> {
    let mut cfg = sitepulse_config::load_config(Some(&config_path(global)))?;
    if let Some(ref url) = global.backend_url {
        cfg.backend_url = Some(url.clone());
    }
    if global.insecure {
        cfg.insecure = true;
    }
    Ok(cfg)
}

/// Translate to a `MonitorConfig`, turning a missing URL into a
/// `NoBackend` diagnostic.
pub fn monitor_config(cfg: &Config, global: &GlobalOpts) -> Result<MonitorConfig, CliError> {
    if cfg.backend_url.as_deref().is_none_or(|u| u.trim().is_empty()) {
        return Err(CliError::NoBackend {
            path: config_path(global).display().to_string(),
        });
    }
    Ok(sitepulse_config::to_monitor_config(cfg)?)
}
