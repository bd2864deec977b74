// ── Runtime monitor configuration ──
//
// Describes how to reach the backend and how to run a cycle. Never touches
// disk: the CLI/TUI builds a `MonitorConfig` (usually via
// `sitepulse-config`) and hands it in.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use url::Url;

use crate::model::{Location, default_locations};

/// How a cycle schedules its per-site probes.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Strategy {
    /// One site at a time, registry order, each record published as it
    /// lands.
    #[default]
    Sequential,
    /// All sites at once, published together when the batch settles.
    FanOut,
}

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    #[default]
    SystemDefaults,
    CustomCa(PathBuf),
    DangerAcceptInvalid,
}

/// Per-request timeouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub registry: Duration,
    pub check: Duration,
    pub origin_head: Duration,
    pub origin_get: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            registry: Duration::from_secs(15),
            check: Duration::from_secs(9),
            origin_head: Duration::from_secs(6),
            origin_get: Duration::from_secs(9),
        }
    }
}

/// Everything a `Monitor` needs.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Backend base URL (`https://backend.example` or with an `/api` prefix).
    pub backend_url: Url,
    pub tls: TlsVerification,
    pub strategy: Strategy,
    /// Fan-out cap. 0 = unbounded.
    pub max_concurrency: usize,
    /// Periodic refresh (seconds). 0 = never.
    pub refresh_interval_secs: u64,
    pub timeouts: Timeouts,
    /// Registry page size for paged fetches. 0 = single unpaged request.
    pub registry_page_limit: u32,
    pub locations: Vec<Location>,
}

impl MonitorConfig {
    /// Defaults for everything except the backend URL.
    pub fn new(backend_url: Url) -> Self {
        Self {
            backend_url,
            tls: TlsVerification::default(),
            strategy: Strategy::default(),
            max_concurrency: 0,
            refresh_interval_secs: 0,
            timeouts: Timeouts::default(),
            registry_page_limit: 0,
            locations: default_locations(),
        }
    }

    /// Label for a location tag, falling back to the tag itself.
    pub fn location_label<'a>(&'a self, tag: &'a str) -> &'a str {
        self.locations
            .iter()
            .find(|l| l.tag == tag)
            .map_or(tag, |l| l.label.as_str())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn strategy_names() {
        assert_eq!(Strategy::FanOut.to_string(), "fan-out");
        assert_eq!("sequential".parse::<Strategy>().unwrap(), Strategy::Sequential);
    }

    #[test]
    fn location_label_falls_back_to_tag() {
        let cfg = MonitorConfig::new(Url::parse("https://backend.example").unwrap());
        assert_eq!(cfg.location_label("biznet-1"), "Biznet 1");
        assert_eq!(cfg.location_label("mars-1"), "mars-1");
    }
}
