// ── Domain model ──

mod location;
mod site;
mod status;

pub use location::{Location, default_locations};
pub use site::Site;
pub use status::{ClientStatus, StatusRecord};
