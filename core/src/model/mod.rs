pub mod geo;
pub mod places;

pub use geo::{LngLat, LngLatBounds};
pub use places::{Destination, MapProps, SafetyLevel, SafetyZone, ZoneColor};
