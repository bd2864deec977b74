// sitepulse-api: async HTTP plumbing for the site registry, the domain-check
// endpoint, and direct origin probes.

pub mod backend;
pub mod error;
pub mod origin;
pub mod transport;

pub use backend::models::{CheckResponse, SitePage, SiteQuery, SiteRecord};
pub use backend::BackendClient;
pub use error::Error;
pub use origin::OriginClient;
pub use transport::{TlsMode, TransportConfig};
