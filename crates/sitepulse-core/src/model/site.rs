// ── Site domain type ──

use serde::{Deserialize, Serialize};
use url::Url;

use sitepulse_api::SiteRecord;

/// One monitored target from the registry.
///
/// Immutable once fetched. Empty `backend_url` strings are normalised to
/// `None`; `domain` is kept exactly as the registry sent it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Site {
    /// Location tag (`biznet-1`, `nevacloud-dev`, ...).
    pub location: String,
    /// Display name.
    pub name: String,
    /// Bare hostname or full URL, handed to the check endpoint untouched.
    pub domain: String,
    /// Backend origin URL, probed directly.
    pub backend_url: Option<String>,
    pub port: Option<String>,
}

impl Site {
    /// Parsed origin URL. `None` when absent or unparseable.
    pub fn origin_url(&self) -> Option<Url> {
        self.backend_url
            .as_deref()
            .and_then(|raw| Url::parse(raw).ok())
    }

    /// Origin shown in tables: everything before the first `/api` path
    /// segment, or `-`.
    pub fn backend_display(&self) -> &str {
        self.backend_url
            .as_deref()
            .map(|raw| {
                // Skip the scheme so hosts like `api.example.com` survive.
                let start = raw.find("://").map_or(0, |i| i + 3);
                let cut = raw
                    .get(start..)
                    .and_then(|rest| rest.find("/api"))
                    .map_or(raw.len(), |i| start + i);
                raw.get(..cut).unwrap_or(raw)
            })
            .filter(|host| !host.is_empty())
            .unwrap_or("-")
    }
}

impl From<SiteRecord> for Site {
    fn from(rec: SiteRecord) -> Self {
        let non_empty = |s: Option<String>| {
            s.map(|v| v.trim().to_owned()).filter(|v| !v.is_empty())
        };
        Self {
            location: rec.server_location,
            name: rec.program_name,
            domain: rec.domain_name,
            backend_url: non_empty(rec.backend_url),
            port: non_empty(rec.port),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site(backend: Option<&str>) -> Site {
        Site {
            location: "biznet-1".into(),
            name: "Alpha".into(),
            domain: "a.com".into(),
            backend_url: backend.map(String::from),
            port: None,
        }
    }

    #[test]
    fn backend_display_strips_api_suffix() {
        assert_eq!(
            site(Some("https://api.a.com/api/v1/health")).backend_display(),
            "https://api.a.com"
        );
        assert_eq!(site(Some("https://api.a.com")).backend_display(), "https://api.a.com");
        assert_eq!(site(None).backend_display(), "-");
        assert_eq!(site(Some("/api/v1")).backend_display(), "-");
    }

    #[test]
    fn blank_backend_url_becomes_none() {
        let rec = SiteRecord {
            server_location: "biznet-2".into(),
            program_name: "Beta".into(),
            domain_name: "b.com".into(),
            backend_url: Some("  ".into()),
            port: None,
        };
        let site = Site::from(rec);
        assert!(site.backend_url.is_none());
        assert!(site.origin_url().is_none());
    }

    #[test]
    fn unparseable_origin_is_none() {
        assert!(site(Some("not a url")).origin_url().is_none());
        assert!(site(Some("https://api.a.com/api")).origin_url().is_some());
    }
}
