use crate::model::geo::LngLat;
use serde::{Deserialize, Serialize};

/// Named point shown with the prominent destination marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Destination {
    pub name: String,
    pub coordinates: LngLat,
}

impl Destination {
    pub fn new(name: impl Into<String>, coordinates: LngLat) -> Self {
        Self {
            name: name.into(),
            coordinates,
        }
    }
}

/// Point annotated with a free-text risk level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafetyZone {
    pub coordinates: LngLat,
    pub level: String,
}

impl SafetyZone {
    pub fn new(coordinates: LngLat, level: impl Into<String>) -> Self {
        Self {
            coordinates,
            level: level.into(),
        }
    }

    pub fn classification(&self) -> SafetyLevel {
        SafetyLevel::classify(&self.level)
    }
}

/// Closed set of levels a zone is rendered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SafetyLevel {
    Safe,
    Moderate,
    Danger,
}

impl SafetyLevel {
    /// Exact, case-sensitive match. Anything unrecognized is `Danger`.
    pub fn classify(level: &str) -> Self {
        match level {
            "safe" => SafetyLevel::Safe,
            "moderate" => SafetyLevel::Moderate,
            _ => SafetyLevel::Danger,
        }
    }

    pub fn color(self) -> ZoneColor {
        match self {
            SafetyLevel::Safe => ZoneColor::Green,
            SafetyLevel::Moderate => ZoneColor::Yellow,
            SafetyLevel::Danger => ZoneColor::Red,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ZoneColor {
    Green,
    Yellow,
    Red,
}

impl ZoneColor {
    pub fn rgb(self) -> [u8; 3] {
        match self {
            ZoneColor::Green => [0x22, 0xc5, 0x5e],
            ZoneColor::Yellow => [0xea, 0xb3, 0x08],
            ZoneColor::Red => [0xef, 0x44, 0x44],
        }
    }
}

/// Inputs of the map component. Both lists default to empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MapProps {
    #[serde(default)]
    pub destinations: Vec<Destination>,
    #[serde(default, alias = "safetyZones")]
    pub safety_zones: Vec<SafetyZone>,
}

impl MapProps {
    pub fn new(destinations: Vec<Destination>, safety_zones: Vec<SafetyZone>) -> Self {
        Self {
            destinations,
            safety_zones,
        }
    }

    pub fn from_json_str(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }

    pub fn marker_count(&self) -> usize {
        self.destinations.len() + self.safety_zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.marker_count() == 0
    }
}
