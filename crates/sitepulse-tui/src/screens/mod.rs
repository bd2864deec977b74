//! Screen implementations. Each screen is a top-level Component.

pub mod locations;
pub mod status;

use sitepulse_core::Location;

use crate::component::Component;
use crate::screen::ScreenId;

pub fn create_screens(
    locations: &[Location],
    page_size: usize,
) -> Vec<(ScreenId, Box<dyn Component>)> {
    vec![
        (
            ScreenId::Status,
            Box::new(status::StatusScreen::new(locations.to_vec(), page_size)),
        ),
        (
            ScreenId::Locations,
            Box::new(locations::LocationsScreen::new(locations.to_vec())),
        ),
    ]
}
