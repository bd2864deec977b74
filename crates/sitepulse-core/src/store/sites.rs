// ── Cached site registry ──

use std::sync::Arc;

use tokio::sync::watch;

use crate::model::Site;

pub(crate) struct SiteCache {
    snapshot: watch::Sender<Arc<Vec<Arc<Site>>>>,
}

impl SiteCache {
    pub(crate) fn new() -> Self {
        let (snapshot, _) = watch::channel(Arc::new(Vec::new()));
        Self { snapshot }
    }

    /// Replace the whole list. Sites are immutable, so there is no upsert.
    pub(crate) fn replace(&self, sites: Vec<Site>) -> Arc<Vec<Arc<Site>>> {
        let snap: Arc<Vec<Arc<Site>>> = Arc::new(sites.into_iter().map(Arc::new).collect());
        // `send_modify` updates unconditionally, even with zero receivers.
        self.snapshot.send_modify(|s| *s = Arc::clone(&snap));
        snap
    }

    pub(crate) fn snapshot(&self) -> Arc<Vec<Arc<Site>>> {
        self.snapshot.borrow().clone()
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<Arc<Vec<Arc<Site>>>> {
        self.snapshot.subscribe()
    }
}
