//! Shared configuration for the sitepulse CLI and TUI.
//!
//! One TOML file, layered by figment: built-in defaults, then the file,
//! then `SITEPULSE_*` environment variables (`__` separates nested keys,
//! e.g. `SITEPULSE_TIMEOUTS__CHECK=5`). [`to_monitor_config`] turns the
//! result into a `sitepulse_core::MonitorConfig`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use sitepulse_core::{
    Location, MonitorConfig, Strategy, Timeouts, TlsVerification, default_locations,
};

pub const ENV_PREFIX: &str = "SITEPULSE_";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration shared by CLI and TUI.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Backend base URL serving `get-data-client` and `check`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backend_url: Option<String>,

    #[serde(default)]
    pub strategy: Strategy,

    /// Fan-out cap, 0 = unbounded.
    #[serde(default)]
    pub max_concurrency: usize,

    /// Periodic refresh in seconds, 0 = off.
    #[serde(default)]
    pub refresh_interval_secs: u64,

    /// Rows per page in table views.
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Accept invalid TLS certificates.
    #[serde(default)]
    pub insecure: bool,

    /// Extra CA certificate (PEM).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ca_cert: Option<PathBuf>,

    #[serde(default)]
    pub timeouts: TimeoutsConfig,

    #[serde(default)]
    pub registry: RegistryConfig,

    #[serde(default = "default_locations")]
    pub locations: Vec<Location>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: None,
            strategy: Strategy::default(),
            max_concurrency: 0,
            refresh_interval_secs: 0,
            page_size: default_page_size(),
            insecure: false,
            ca_cert: None,
            timeouts: TimeoutsConfig::default(),
            registry: RegistryConfig::default(),
            locations: default_locations(),
        }
    }
}

fn default_page_size() -> usize {
    25
}

/// Per-request timeouts, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct TimeoutsConfig {
    #[serde(default = "default_registry_timeout")]
    pub registry: u64,
    #[serde(default = "default_check_timeout")]
    pub check: u64,
    #[serde(default = "default_origin_head_timeout")]
    pub origin_head: u64,
    #[serde(default = "default_origin_get_timeout")]
    pub origin_get: u64,
}

impl Default for TimeoutsConfig {
    fn default() -> Self {
        Self {
            registry: default_registry_timeout(),
            check: default_check_timeout(),
            origin_head: default_origin_head_timeout(),
            origin_get: default_origin_get_timeout(),
        }
    }
}

fn default_registry_timeout() -> u64 {
    15
}
fn default_check_timeout() -> u64 {
    9
}
fn default_origin_head_timeout() -> u64 {
    6
}
fn default_origin_get_timeout() -> u64 {
    9
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct RegistryConfig {
    /// Page size for paged registry fetches, 0 = single request.
    #[serde(default)]
    pub page_limit: u32,
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("dev", "sitepulse", "sitepulse").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("sitepulse");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// The layered provider stack for `path`.
pub fn figment(path: &Path) -> Figment {
    Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
}

/// Load from `path` (or the platform path) plus environment.
///
/// A missing file is not an error; defaults and env still apply.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let path = path.map_or_else(config_path, Path::to_path_buf);
    let config: Config = figment(&path).extract()?;
    Ok(config)
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write it to `path`, creating parents.
pub fn save_config(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Translation ─────────────────────────────────────────────────────

/// Parse and check a backend URL (http or https only).
pub fn parse_backend_url(raw: &str) -> Result<url::Url, ConfigError> {
    let url: url::Url = raw.trim().parse().map_err(|e| ConfigError::Validation {
        field: "backend_url".into(),
        reason: format!("invalid URL '{raw}': {e}"),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::Validation {
            field: "backend_url".into(),
            reason: format!("expected an http(s) URL, got scheme '{}'", url.scheme()),
        });
    }
    Ok(url)
}

/// Build a `MonitorConfig`. The backend URL is required.
pub fn to_monitor_config(cfg: &Config) -> Result<MonitorConfig, ConfigError> {
    let raw = cfg
        .backend_url
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| ConfigError::Validation {
            field: "backend_url".into(),
            reason: "not set".into(),
        })?;
    let backend_url = parse_backend_url(raw)?;

    let tls = if cfg.insecure {
        TlsVerification::DangerAcceptInvalid
    } else if let Some(ref ca_path) = cfg.ca_cert {
        TlsVerification::CustomCa(ca_path.clone())
    } else {
        TlsVerification::SystemDefaults
    };

    let t = cfg.timeouts;
    let locations = if cfg.locations.is_empty() {
        default_locations()
    } else {
        cfg.locations.clone()
    };

    Ok(MonitorConfig {
        backend_url,
        tls,
        strategy: cfg.strategy,
        max_concurrency: cfg.max_concurrency,
        refresh_interval_secs: cfg.refresh_interval_secs,
        timeouts: Timeouts {
            registry: Duration::from_secs(t.registry),
            check: Duration::from_secs(t.check),
            origin_head: Duration::from_secs(t.origin_head),
            origin_get: Duration::from_secs(t.origin_get),
        },
        registry_page_limit: cfg.registry.page_limit,
        locations,
    })
}
