// Domain-check endpoint: `GET {base}/check?url=<domain>`

use tracing::debug;

use super::client::BackendClient;
use super::models::CheckResponse;
use crate::error::Error;

const CHECK_PATH: &str = "check";

impl BackendClient {
    /// Ask the backend whether `domain` is reachable.
    ///
    /// Every HTTP status is returned as a `CheckResponse`: a 403 or 503 from
    /// this endpoint is a meaningful answer, not a failure. Only transport
    /// failures (no response at all) come back as `Err`. A body that cannot
    /// be read in full is reported as empty.
    pub async fn check_domain(&self, domain: &str) -> Result<CheckResponse, Error> {
        let mut url = self.endpoint(CHECK_PATH)?;
        url.query_pairs_mut().append_pair("url", domain);
        debug!("GET {}", url);

        let resp = self
            .http()
            .get(url)
            .timeout(self.check_timeout)
            .send()
            .await?;

        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();

        Ok(CheckResponse { status, body })
    }
}
