use std::collections::BTreeMap;
use std::f64::consts::PI;

use travelmapcore::model::{LngLat, LngLatBounds};
use travelmapcore::prelude::{ControlPosition, FitOptions, MapOptions, ProviderError};
use travelmapcore::provider::{
    check_public_token, ContainerId, Control, MapProvider, MapWidget, MarkerHandle, MarkerSpec,
};

/// World size in pixels at zoom 0.
pub const TILE_SIZE: f64 = 512.0;
pub const MAP_WIDTH: f64 = 960.0;
pub const MAP_HEIGHT: f64 = 560.0;
const MAX_LATITUDE: f64 = 85.051_128_78;
const MAX_ZOOM: f64 = 22.0;

/// Web-Mercator position in world units at zoom 0.
fn project(point: LngLat) -> (f64, f64) {
    let lat = point.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();
    let x = (point.lng + 180.0) / 360.0;
    let y = (1.0 - (lat.tan() + 1.0 / lat.cos()).ln() / PI) / 2.0;
    (x * TILE_SIZE, y * TILE_SIZE)
}

fn unproject(x: f64, y: f64) -> LngLat {
    let lng = x / TILE_SIZE * 360.0 - 180.0;
    let n = PI * (1.0 - 2.0 * y / TILE_SIZE);
    let lat = n.sinh().atan().to_degrees();
    LngLat::new(lng, lat)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub center: LngLat,
    pub zoom: f64,
}

impl Viewport {
    /// Screen position of `point` on a `width` x `height` surface.
    pub fn to_screen(&self, point: LngLat, width: f64, height: f64) -> (f64, f64) {
        let scale = 2f64.powf(self.zoom);
        let (cx, cy) = project(self.center);
        let (px, py) = project(point);
        (
            (px - cx) * scale + width / 2.0,
            (py - cy) * scale + height / 2.0,
        )
    }

    /// Viewport showing `bounds` inside a padded `width` x `height` surface.
    pub fn fit(bounds: LngLatBounds, options: FitOptions, width: f64, height: f64) -> Self {
        let (x0, y1) = project(bounds.south_west);
        let (x1, y0) = project(bounds.north_east);
        let available_w = (width - 2.0 * options.padding).max(1.0);
        let available_h = (height - 2.0 * options.padding).max(1.0);

        let zoom_x = (available_w / (x1 - x0).abs()).log2();
        let zoom_y = (available_h / (y1 - y0).abs()).log2();
        let max_zoom = options.max_zoom.min(MAX_ZOOM);
        let zoom = zoom_x.min(zoom_y).clamp(0.0, max_zoom);

        Self {
            center: unproject((x0 + x1) / 2.0, (y0 + y1) / 2.0),
            zoom,
        }
    }
}

/// Builds [`CanvasWidget`]s after checking the token shape.
#[derive(Debug, Default)]
pub struct CanvasProvider {
    constructed: usize,
}

impl MapProvider for CanvasProvider {
    type Widget = CanvasWidget;

    fn construct(
        &mut self,
        container: &ContainerId,
        token: &str,
        options: &MapOptions,
    ) -> Result<Self::Widget, ProviderError> {
        check_public_token(token)?;
        if !options.center.is_finite() || !options.zoom.is_finite() {
            return Err(ProviderError::Construction(
                "initial center and zoom must be finite".into(),
            ));
        }
        self.constructed += 1;
        log::debug!(
            "canvas widget #{} bound to '{}'",
            self.constructed,
            container.as_str()
        );

        let home = Viewport {
            center: options.center,
            zoom: options.zoom.clamp(0.0, MAX_ZOOM),
        };
        Ok(CanvasWidget {
            style: options.style.clone(),
            home,
            viewport: home,
            markers: BTreeMap::new(),
            next_handle: 0,
            controls: Vec::new(),
            selected: None,
        })
    }
}

/// Minimal map surface drawn on an iced canvas.
#[derive(Debug)]
pub struct CanvasWidget {
    style: String,
    home: Viewport,
    viewport: Viewport,
    markers: BTreeMap<MarkerHandle, MarkerSpec>,
    next_handle: u64,
    controls: Vec<(Control, ControlPosition)>,
    selected: Option<MarkerHandle>,
}

impl CanvasWidget {
    pub fn style(&self) -> &str {
        &self.style
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn markers(&self) -> impl Iterator<Item = (MarkerHandle, &MarkerSpec)> {
        self.markers.iter().map(|(handle, spec)| (*handle, spec))
    }

    pub fn navigation_position(&self) -> Option<ControlPosition> {
        self.controls
            .iter()
            .find(|(control, _)| *control == Control::Navigation)
            .map(|(_, position)| *position)
    }

    pub fn zoom_by(&mut self, delta: f64) {
        self.viewport.zoom = (self.viewport.zoom + delta).clamp(0.0, MAX_ZOOM);
    }

    pub fn reset_view(&mut self) {
        self.viewport = self.home;
    }

    /// Opens the popup of `handle`, or closes it when already open.
    pub fn toggle_popup(&mut self, handle: MarkerHandle) {
        if !self.markers.contains_key(&handle) {
            return;
        }
        self.selected = if self.selected == Some(handle) {
            None
        } else {
            Some(handle)
        };
    }

    pub fn open_popup(&self) -> Option<&MarkerSpec> {
        self.selected.and_then(|handle| self.markers.get(&handle))
    }
}

impl MapWidget for CanvasWidget {
    fn add_control(&mut self, control: Control, position: ControlPosition) {
        self.controls.push((control, position));
    }

    fn add_marker(&mut self, marker: MarkerSpec) -> MarkerHandle {
        self.next_handle += 1;
        let handle = MarkerHandle::new(self.next_handle);
        self.markers.insert(handle, marker);
        handle
    }

    fn remove_marker(&mut self, handle: MarkerHandle) {
        self.markers.remove(&handle);
        if self.selected == Some(handle) {
            self.selected = None;
        }
    }

    fn fit_bounds(&mut self, bounds: LngLatBounds, options: FitOptions) {
        self.viewport = Viewport::fit(bounds, options, MAP_WIDTH, MAP_HEIGHT);
    }

    fn release(&mut self) {
        self.markers.clear();
        self.controls.clear();
        self.selected = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use travelmapcore::provider::{MarkerStyle, Popup};

    const TOKEN: &str = "pk.eyJ1IjoidHJhdmVsIn0.c2lnbmF0dXJl";

    fn widget() -> CanvasWidget {
        CanvasProvider::default()
            .construct(&ContainerId::new("map"), TOKEN, &MapOptions::default())
            .unwrap()
    }

    fn marker(name: &str) -> MarkerSpec {
        MarkerSpec {
            position: LngLat::new(2.35, 48.86),
            style: MarkerStyle::Destination,
            popup: Popup::new(name),
        }
    }

    #[test]
    fn provider_rejects_malformed_tokens() {
        let result = CanvasProvider::default().construct(
            &ContainerId::new("map"),
            "hello",
            &MapOptions::default(),
        );
        assert!(matches!(result, Err(ProviderError::RejectedToken(_))));
    }

    #[test]
    fn center_projects_to_screen_middle() {
        let viewport = Viewport {
            center: LngLat::new(2.35, 48.86),
            zoom: 5.0,
        };
        let (x, y) = viewport.to_screen(LngLat::new(2.35, 48.86), MAP_WIDTH, MAP_HEIGHT);
        assert!((x - MAP_WIDTH / 2.0).abs() < 1e-6);
        assert!((y - MAP_HEIGHT / 2.0).abs() < 1e-6);
    }

    #[test]
    fn fit_keeps_corners_inside_padding() {
        let bounds = LngLatBounds::from_points([
            LngLat::new(-9.14, 38.72),
            LngLat::new(30.52, 50.45),
        ])
        .unwrap();
        let options = FitOptions {
            padding: 50.0,
            max_zoom: 14.0,
        };
        let viewport = Viewport::fit(bounds, options, MAP_WIDTH, MAP_HEIGHT);

        for corner in [bounds.south_west, bounds.north_east] {
            let (x, y) = viewport.to_screen(corner, MAP_WIDTH, MAP_HEIGHT);
            assert!(x >= 49.0 && x <= MAP_WIDTH - 49.0, "x = {x}");
            assert!(y >= 49.0 && y <= MAP_HEIGHT - 49.0, "y = {y}");
        }
    }

    #[test]
    fn single_point_fit_stops_at_max_zoom() {
        let bounds = LngLatBounds::from_point(LngLat::new(2.35, 48.86));
        let viewport = Viewport::fit(bounds, FitOptions::default(), MAP_WIDTH, MAP_HEIGHT);
        assert_eq!(viewport.zoom, 14.0);
        assert!((viewport.center.lng - 2.35).abs() < 1e-9);
        assert!((viewport.center.lat - 48.86).abs() < 1e-9);
    }

    #[test]
    fn removing_marker_closes_its_popup() {
        let mut widget = widget();
        let handle = widget.add_marker(marker("Paris"));
        widget.toggle_popup(handle);
        assert_eq!(widget.open_popup().unwrap().popup.text, "Paris");

        widget.remove_marker(handle);
        assert!(widget.open_popup().is_none());
        assert_eq!(widget.markers().count(), 0);
    }

    #[test]
    fn zoom_controls_stay_in_range_and_reset() {
        let mut widget = widget();
        widget.zoom_by(-10.0);
        assert_eq!(widget.viewport().zoom, 0.0);
        widget.zoom_by(100.0);
        assert_eq!(widget.viewport().zoom, MAX_ZOOM);
        widget.reset_view();
        assert_eq!(widget.viewport().zoom, MapOptions::default().zoom);
    }

    #[test]
    fn release_drops_everything() {
        let mut widget = widget();
        widget.add_control(Control::Navigation, ControlPosition::TopRight);
        widget.add_marker(marker("Paris"));
        widget.release();
        assert!(widget.navigation_position().is_none());
        assert_eq!(widget.markers().count(), 0);
    }
}
