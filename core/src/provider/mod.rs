//! Boundary to the external map widget.
//!
//! Rendering, projection and tile loading belong to the provider. The
//! component only constructs a widget with an explicit token and drives it
//! through [`MapWidget`].

pub mod token;

#[cfg(test)]
pub(crate) mod testing;

use crate::model::{LngLat, LngLatBounds, ZoneColor};
use crate::prelude::{ControlPosition, FitOptions, MapOptions, ProviderError};

pub use token::check_public_token;

/// Identifier of the screen container a widget is bound to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContainerId(String);

impl ContainerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Opaque handle returned for every marker added to a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkerHandle(u64);

impl MarkerHandle {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// Zoom in / zoom out / reset bearing.
    Navigation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerStyle {
    Destination,
    SafetyZone(ZoneColor),
}

impl MarkerStyle {
    pub fn diameter_px(self) -> f32 {
        match self {
            MarkerStyle::Destination => 24.0,
            MarkerStyle::SafetyZone(_) => 16.0,
        }
    }

    pub fn fill_rgb(self) -> [u8; 3] {
        match self {
            MarkerStyle::Destination => [0x25, 0x63, 0xeb],
            MarkerStyle::SafetyZone(color) => color.rgb(),
        }
    }
}

/// Plain-text popup attached to a marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Popup {
    pub text: String,
}

impl Popup {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarkerSpec {
    pub position: LngLat,
    pub style: MarkerStyle,
    pub popup: Popup,
}

/// Factory for live widgets. The access token is a construction argument
/// and never process-wide state.
pub trait MapProvider {
    type Widget: MapWidget;

    fn construct(
        &mut self,
        container: &ContainerId,
        token: &str,
        options: &MapOptions,
    ) -> Result<Self::Widget, ProviderError>;
}

/// One live, renderable map surface.
pub trait MapWidget {
    fn add_control(&mut self, control: Control, position: ControlPosition);
    fn add_marker(&mut self, marker: MarkerSpec) -> MarkerHandle;
    fn remove_marker(&mut self, handle: MarkerHandle);
    fn fit_bounds(&mut self, bounds: LngLatBounds, options: FitOptions);
    fn release(&mut self);
}
