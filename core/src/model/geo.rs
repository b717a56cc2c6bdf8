use serde::{Deserialize, Serialize};

/// Geographic point stored as longitude then latitude, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct LngLat {
    pub lng: f64,
    pub lat: f64,
}

impl LngLat {
    pub fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }

    pub fn is_finite(&self) -> bool {
        self.lng.is_finite() && self.lat.is_finite()
    }
}

impl From<[f64; 2]> for LngLat {
    fn from([lng, lat]: [f64; 2]) -> Self {
        Self { lng, lat }
    }
}

impl From<LngLat> for [f64; 2] {
    fn from(point: LngLat) -> Self {
        [point.lng, point.lat]
    }
}

/// Smallest lng/lat rectangle containing a set of points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LngLatBounds {
    pub south_west: LngLat,
    pub north_east: LngLat,
}

impl LngLatBounds {
    pub fn from_point(point: LngLat) -> Self {
        Self {
            south_west: point,
            north_east: point,
        }
    }

    /// Bounds covering every finite point, or `None` when there is none.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = LngLat>,
    {
        points
            .into_iter()
            .filter(LngLat::is_finite)
            .fold(None, |bounds: Option<Self>, point| match bounds {
                Some(mut bounds) => {
                    bounds.extend(point);
                    Some(bounds)
                }
                None => Some(Self::from_point(point)),
            })
    }

    pub fn extend(&mut self, point: LngLat) {
        self.south_west.lng = self.south_west.lng.min(point.lng);
        self.south_west.lat = self.south_west.lat.min(point.lat);
        self.north_east.lng = self.north_east.lng.max(point.lng);
        self.north_east.lat = self.north_east.lat.max(point.lat);
    }

    pub fn center(&self) -> LngLat {
        LngLat::new(
            (self.south_west.lng + self.north_east.lng) / 2.0,
            (self.south_west.lat + self.north_east.lat) / 2.0,
        )
    }

    pub fn contains(&self, point: LngLat) -> bool {
        point.lng >= self.south_west.lng
            && point.lng <= self.north_east.lng
            && point.lat >= self.south_west.lat
            && point.lat <= self.north_east.lat
    }

    pub fn is_point(&self) -> bool {
        self.south_west == self.north_east
    }
}
