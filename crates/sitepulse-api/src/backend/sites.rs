// Registry endpoint: `GET {base}/get-data-client`

use tracing::debug;

use super::client::BackendClient;
use super::models::{RegistryEnvelope, SitePage, SiteQuery, SiteRecord};
use crate::error::Error;

const REGISTRY_PATH: &str = "get-data-client";

/// Hard stop for `list_all_sites`, in case a registry reports a bogus
/// `totalPages`.
const MAX_PAGES: u32 = 1_000;

impl BackendClient {
    /// Fetch one page of the site registry.
    pub async fn list_sites(&self, query: &SiteQuery) -> Result<SitePage, Error> {
        let mut url = self.endpoint(REGISTRY_PATH)?;
        {
            let pairs = query.pairs();
            if !pairs.is_empty() {
                let mut qp = url.query_pairs_mut();
                for (k, v) in &pairs {
                    qp.append_pair(k, v);
                }
            }
        }
        debug!("GET {}", url);

        let resp = self
            .http()
            .get(url)
            .timeout(self.registry_timeout)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Registry {
                status: status.as_u16(),
                message: body.chars().take(200).collect(),
            });
        }

        let body = resp.text().await?;
        let envelope: RegistryEnvelope = serde_json::from_str(&body).map_err(|e| {
            let preview: String = body.chars().take(200).collect();
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body: body.clone(),
            }
        })?;

        Ok(SitePage::from(envelope.data))
    }

    /// Fetch every registry page.
    ///
    /// With `page_limit == 0` a single unpaginated request is made. Otherwise
    /// pages are requested until `totalPages` is reached or a page comes back
    /// empty. Flat envelopes always report a single page, so a registry that
    /// ignores pagination is fetched exactly once.
    pub async fn list_all_sites(
        &self,
        page_limit: u32,
        selected_server: Option<&str>,
    ) -> Result<Vec<SiteRecord>, Error> {
        let selected_server = selected_server.map(String::from);

        if page_limit == 0 {
            let page = self
                .list_sites(&SiteQuery {
                    selected_server,
                    ..SiteQuery::default()
                })
                .await?;
            return Ok(page.items);
        }

        let mut all = Vec::new();
        let mut page_no = 1;
        loop {
            let page = self
                .list_sites(&SiteQuery {
                    page: Some(page_no),
                    limit: Some(page_limit),
                    selected_server: selected_server.clone(),
                })
                .await?;

            let fetched = page.items.len();
            all.extend(page.items);
            debug!(page = page_no, fetched, total_pages = page.total_pages, "registry page");

            if fetched == 0 || page_no >= page.total_pages || page_no >= MAX_PAGES {
                break;
            }
            page_no += 1;
        }

        Ok(all)
    }
}
