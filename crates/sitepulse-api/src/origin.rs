// Direct origin probes
//
// Issues HEAD and GET requests against arbitrary backend origin URLs and
// reports the bare status code. Deciding what counts as "reachable" is the
// core crate's job.

use std::time::Duration;

use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

const DEFAULT_HEAD_TIMEOUT: Duration = Duration::from_secs(6);
const DEFAULT_GET_TIMEOUT: Duration = Duration::from_secs(9);

/// HTTP client for probing site origins directly.
pub struct OriginClient {
    http: reqwest::Client,
    head_timeout: Duration,
    get_timeout: Duration,
}

impl OriginClient {
    /// Create an origin client from a `TransportConfig`.
    pub fn new(transport: &TransportConfig) -> Result<Self, Error> {
        Ok(Self::with_client(transport.build_client()?))
    }

    /// Create an origin client around a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client) -> Self {
        Self {
            http,
            head_timeout: DEFAULT_HEAD_TIMEOUT,
            get_timeout: DEFAULT_GET_TIMEOUT,
        }
    }

    /// Override the HEAD and GET timeouts.
    pub fn with_timeouts(mut self, head: Duration, get: Duration) -> Self {
        self.head_timeout = head;
        self.get_timeout = get;
        self
    }

    /// Lightweight existence probe.
    pub async fn head(&self, url: &Url) -> Result<u16, Error> {
        debug!("HEAD {}", url);
        let resp = self
            .http
            .head(url.clone())
            .timeout(self.head_timeout)
            .send()
            .await?;
        Ok(resp.status().as_u16())
    }

    /// Full probe. The body is not read.
    pub async fn get(&self, url: &Url) -> Result<u16, Error> {
        debug!("GET {}", url);
        let resp = self
            .http
            .get(url.clone())
            .timeout(self.get_timeout)
            .send()
            .await?;
        Ok(resp.status().as_u16())
    }
}
