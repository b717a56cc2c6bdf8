//! Core of the travelmap component.
//!
//! A user-supplied access token opens the credential gate, the provider
//! builds one widget, and the marker projector keeps destination and
//! safety-zone markers in step with the inputs until the map is released.

pub mod map;
pub mod model;
pub mod prelude;
pub mod provider;
pub mod telemetry;

pub use map::{LifecycleState, MapComponent};
pub use prelude::{MapError, MapOptions, MapResult};
