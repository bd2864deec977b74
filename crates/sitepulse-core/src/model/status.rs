// ── Status record ──

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::Site;

/// Public-domain reachability as reported by the check endpoint.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ClientStatus {
    Online,
    /// Responded, but from behind a protective barrier (WAF challenge etc.).
    Protected,
    Offline,
}

impl ClientStatus {
    /// Boolean view: online and protected both count as reachable.
    pub fn is_reachable(self) -> bool {
        !matches!(self, Self::Offline)
    }

    /// Badge text.
    pub fn label(self) -> &'static str {
        match self {
            Self::Online => "Online",
            Self::Protected => "Online – Protected",
            Self::Offline => "Offline",
        }
    }
}

/// Result of probing one site in one cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusRecord {
    pub site: Arc<Site>,
    pub client: ClientStatus,
    pub origin_reachable: bool,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn reachable_view() {
        assert!(ClientStatus::Online.is_reachable());
        assert!(ClientStatus::Protected.is_reachable());
        assert!(!ClientStatus::Offline.is_reachable());
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("PROTECTED".parse::<ClientStatus>().unwrap(), ClientStatus::Protected);
        assert_eq!(ClientStatus::Offline.to_string(), "offline");
    }
}
