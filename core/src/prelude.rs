use crate::model::LngLat;
use serde::{Deserialize, Serialize};

pub use crate::provider::{MapProvider, MapWidget};

/// Screen corner a map control is docked to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ControlPosition {
    TopLeft,
    #[default]
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Construction-time configuration shared by every provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapOptions {
    pub style: String,
    pub center: LngLat,
    pub zoom: f64,
    pub fit_padding: f64,
    pub fit_max_zoom: f64,
    pub control_position: ControlPosition,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            style: "mapbox://styles/mapbox/light-v11".into(),
            center: LngLat::new(0.0, 20.0),
            zoom: 1.5,
            fit_padding: 50.0,
            fit_max_zoom: 14.0,
            control_position: ControlPosition::TopRight,
        }
    }
}

impl MapOptions {
    pub fn fit_options(&self) -> FitOptions {
        FitOptions {
            padding: self.fit_padding,
            max_zoom: self.fit_max_zoom,
        }
    }
}

/// Parameters of a viewport fit. Fits are fire-and-forget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitOptions {
    pub padding: f64,
    pub max_zoom: f64,
}

impl Default for FitOptions {
    fn default() -> Self {
        MapOptions::default().fit_options()
    }
}

/// Error raised by a provider while constructing a widget.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("access token rejected: {0}")]
    RejectedToken(String),
    #[error("widget construction failed: {0}")]
    Construction(String),
}

/// Common error type for the map component.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MapError {
    #[error("map initialization failed: {0}")]
    InitializationFailure(#[from] ProviderError),
    #[error("access token is empty")]
    EmptyToken,
    #[error("map is already initialized")]
    AlreadyInitialized,
    #[error("map component has been released")]
    Released,
}

pub type MapResult<T> = Result<T, MapError>;
