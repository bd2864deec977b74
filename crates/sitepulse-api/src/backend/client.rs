// Backend HTTP client
//
// Wraps `reqwest::Client` with base-URL handling and the per-endpoint
// timeouts. Registry and domain-check calls are implemented in `sites.rs`
// and `check.rs` to keep this module focused on transport mechanics.

use std::time::Duration;

use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

const DEFAULT_REGISTRY_TIMEOUT: Duration = Duration::from_secs(15);
const DEFAULT_CHECK_TIMEOUT: Duration = Duration::from_secs(9);

/// HTTP client for the sitepulse backend.
///
/// The backend exposes two endpoints: `get-data-client` (the site registry)
/// and `check` (remote domain reachability). Both are addressed relative to
/// `base_url`, which may carry a path prefix (`https://host/api`).
pub struct BackendClient {
    http: reqwest::Client,
    base_url: Url,
    pub(crate) registry_timeout: Duration,
    pub(crate) check_timeout: Duration,
}

impl BackendClient {
    /// Create a backend client from a `TransportConfig`.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self::with_client(http, base_url))
    }

    /// Create a backend client around a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self {
            http,
            base_url,
            registry_timeout: DEFAULT_REGISTRY_TIMEOUT,
            check_timeout: DEFAULT_CHECK_TIMEOUT,
        }
    }

    /// Override the registry and domain-check request timeouts.
    pub fn with_timeouts(mut self, registry: Duration, check: Duration) -> Self {
        self.registry_timeout = registry;
        self.check_timeout = check;
        self
    }

    /// The underlying HTTP client.
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Build `{base}/{path}`, keeping any path prefix on the base URL.
    pub(crate) fn endpoint(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        Ok(Url::parse(&format!("{base}/{path}"))?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn client(base: &str) -> BackendClient {
        BackendClient::with_client(reqwest::Client::new(), Url::parse(base).unwrap())
    }

    #[test]
    fn endpoint_appends_to_bare_host() {
        let c = client("https://backend.example");
        assert_eq!(
            c.endpoint("check").unwrap().as_str(),
            "https://backend.example/check"
        );
    }

    #[test]
    fn endpoint_keeps_path_prefix() {
        let c = client("https://backend.example/api/");
        assert_eq!(
            c.endpoint("/get-data-client").unwrap().as_str(),
            "https://backend.example/api/get-data-client"
        );
    }
}
