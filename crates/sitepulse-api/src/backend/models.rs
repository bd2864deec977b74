// Wire types for the backend endpoints.
//
// The registry has shipped two envelope shapes over time:
// `{ data: { items, total, page, limit, totalPages } }` and the flat
// `{ data: [...] }`. Both decode into `SitePage`.

use serde::{Deserialize, Deserializer, Serialize};

/// One registry entry, as served by `get-data-client`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteRecord {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub server_location: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub program_name: String,
    /// Bare hostname or full URL; passed to the check endpoint as-is.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub domain_name: String,
    #[serde(default)]
    pub backend_url: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub port: Option<String>,
}

/// Query parameters accepted by `get-data-client`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SiteQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    /// Server-side location filter (`selectedServer`).
    pub selected_server: Option<String>,
}

impl SiteQuery {
    pub(crate) fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(ref server) = self.selected_server {
            pairs.push(("selectedServer", server.clone()));
        }
        pairs
    }
}

/// One page of registry results, normalised across envelope shapes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitePage {
    pub items: Vec<SiteRecord>,
    pub total: u64,
    pub page: u32,
    pub limit: Option<u32>,
    pub total_pages: u32,
}

/// Raw response of the `check` endpoint. Every HTTP status is a valid
/// response here; interpretation happens in the classifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResponse {
    pub status: u16,
    pub body: String,
}

// ── Envelope decoding ───────────────────────────────────────────────

#[derive(Deserialize)]
pub(crate) struct RegistryEnvelope {
    pub data: RegistryData,
}

#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum RegistryData {
    Flat(Vec<SiteRecord>),
    Paged(RegistryPage),
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RegistryPage {
    #[serde(default)]
    items: Vec<SiteRecord>,
    total: Option<u64>,
    page: Option<u32>,
    limit: Option<u32>,
    total_pages: Option<u32>,
}

impl From<RegistryData> for SitePage {
    fn from(data: RegistryData) -> Self {
        match data {
            RegistryData::Flat(items) => Self {
                total: items.len() as u64,
                items,
                page: 1,
                limit: None,
                total_pages: 1,
            },
            RegistryData::Paged(p) => Self {
                total: p.total.unwrap_or(p.items.len() as u64),
                page: p.page.unwrap_or(1),
                limit: p.limit,
                total_pages: p.total_pages.unwrap_or(1),
                items: p.items,
            },
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Ports show up as `"8080"`, `8080`, or `null` depending on who entered them.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn flat_envelope_becomes_single_page() {
        let env: RegistryEnvelope = serde_json::from_value(json!({
            "data": [
                { "server_location": "biznet-1", "program_name": "Alpha",
                  "domain_name": "a.com", "backend_url": "https://api.a.com/api/v1" }
            ]
        }))
        .unwrap();
        let page = SitePage::from(env.data);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.total, 1);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.items[0].backend_url.as_deref(), Some("https://api.a.com/api/v1"));
    }

    #[test]
    fn paged_envelope_keeps_metadata() {
        let env: RegistryEnvelope = serde_json::from_value(json!({
            "data": {
                "items": [{ "server_location": "biznet-2", "program_name": "Beta",
                            "domain_name": "b.com" }],
                "total": 41, "page": 2, "limit": 20, "totalPages": 3
            }
        }))
        .unwrap();
        let page = SitePage::from(env.data);
        assert_eq!(page.total, 41);
        assert_eq!(page.page, 2);
        assert_eq!(page.limit, Some(20));
        assert_eq!(page.total_pages, 3);
        assert!(page.items[0].backend_url.is_none());
    }

    #[test]
    fn null_fields_and_numeric_port_are_tolerated() {
        let rec: SiteRecord = serde_json::from_value(json!({
            "server_location": null, "program_name": "Gamma",
            "domain_name": "c.com", "backend_url": null, "port": 8443
        }))
        .unwrap();
        assert_eq!(rec.server_location, "");
        assert_eq!(rec.port.as_deref(), Some("8443"));
    }

    #[test]
    fn query_pairs_skip_unset_fields() {
        let q = SiteQuery {
            page: Some(2),
            limit: None,
            selected_server: Some("biznet-1".into()),
        };
        assert_eq!(
            q.pairs(),
            vec![("page", "2".to_string()), ("selectedServer", "biznet-1".to_string())]
        );
    }
}
