// ── Known locations ──

use serde::{Deserialize, Serialize};

/// A location tag with a human label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub tag: String,
    pub label: String,
}

impl Location {
    pub fn new(tag: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            label: label.into(),
        }
    }
}

/// Built-in location set, used when the config names none.
pub fn default_locations() -> Vec<Location> {
    [
        ("biznet-1", "Biznet 1"),
        ("biznet-2", "Biznet 2"),
        ("backup-server", "Backup Server"),
        ("nevacloud-dev", "Nevacloud Dev"),
        ("nevacloud-2", "Nevacloud 2"),
        ("nevacloud-3", "Nevacloud 3"),
    ]
    .into_iter()
    .map(|(tag, label)| Location::new(tag, label))
    .collect()
}
