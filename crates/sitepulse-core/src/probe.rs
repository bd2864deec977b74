// ── Probes ──
//
// Per-site probe pair: the domain check (via the backend) and the direct
// origin probe. Failures never escape this module; they become `Offline`
// and `false`.

use std::ops::Range;
use std::sync::Arc;

use tracing::debug;
use url::Url;

use sitepulse_api::{BackendClient, OriginClient};

use crate::classify::{CheckOutcome, classify};
use crate::model::{ClientStatus, Site, StatusRecord};

/// Origin status codes counted as reachable.
pub const REACHABLE_CODES: Range<u16> = 200..400;

pub fn is_reachable_code(code: u16) -> bool {
    REACHABLE_CODES.contains(&code)
}

/// Ask the backend about `domain` and classify the answer.
///
/// An empty domain is offline without a request.
pub async fn check_client(backend: &BackendClient, domain: &str) -> ClientStatus {
    if domain.trim().is_empty() {
        return ClientStatus::Offline;
    }
    let outcome = match backend.check_domain(domain).await {
        Ok(resp) => CheckOutcome::Responded {
            code: resp.status,
            body: resp.body,
        },
        Err(e) => {
            debug!(domain, error = %e, "domain check got no response");
            CheckOutcome::Unreachable
        }
    };
    classify(&outcome)
}

/// HEAD, then GET if HEAD failed or was out of range.
///
/// `None` means no origin is configured: unreachable, no request.
pub async fn probe_origin(origin: &OriginClient, url: Option<&Url>) -> bool {
    let Some(url) = url else {
        return false;
    };

    match origin.head(url).await {
        Ok(code) if is_reachable_code(code) => return true,
        Ok(code) => debug!(%url, code, "HEAD out of range, falling back to GET"),
        Err(e) => debug!(%url, error = %e, "HEAD failed, falling back to GET"),
    }

    match origin.get(url).await {
        Ok(code) => is_reachable_code(code),
        Err(e) => {
            debug!(%url, error = %e, "GET failed");
            false
        }
    }
}

/// Run both probes for one site concurrently.
pub async fn probe_site(
    backend: &BackendClient,
    origin: &OriginClient,
    site: Arc<Site>,
) -> StatusRecord {
    let origin_url = site.origin_url();
    let (client, origin_reachable) = tokio::join!(
        check_client(backend, &site.domain),
        probe_origin(origin, origin_url.as_ref()),
    );
    StatusRecord {
        site,
        client,
        origin_reachable,
    }
}
