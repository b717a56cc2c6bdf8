use iced::{
    mouse,
    widget::canvas::{self, Frame, Geometry, Path, Stroke},
    Color, Pixels, Point, Rectangle, Renderer, Size, Theme,
};
use travelmapcore::model::LngLat;
use travelmapcore::provider::{MarkerHandle, MarkerSpec};

use crate::canvas_map::{CanvasWidget, Viewport};
use crate::Message;

const GRATICULE_STEP: usize = 30;
/// Extra pixels around a marker that still count as a click on it.
const HIT_SLACK: f32 = 3.0;

/// Immutable copy of a widget taken for one frame.
#[derive(Clone)]
pub struct MapCanvas {
    viewport: Viewport,
    style: String,
    markers: Vec<(MarkerHandle, MarkerSpec)>,
    popup: Option<MarkerSpec>,
}

impl MapCanvas {
    pub fn new(widget: &CanvasWidget) -> Self {
        Self {
            viewport: widget.viewport(),
            style: widget.style().to_string(),
            markers: widget
                .markers()
                .map(|(handle, spec)| (handle, spec.clone()))
                .collect(),
            popup: widget.open_popup().cloned(),
        }
    }

    fn screen(&self, point: LngLat, bounds: Rectangle) -> Option<Point> {
        let (x, y) = self
            .viewport
            .to_screen(point, bounds.width as f64, bounds.height as f64);
        (x.is_finite() && y.is_finite()).then(|| Point::new(x as f32, y as f32))
    }

    /// Topmost marker under `point`, given in canvas-local coordinates.
    pub fn marker_at(&self, point: Point, bounds: Rectangle) -> Option<MarkerHandle> {
        self.markers.iter().rev().find_map(|(handle, spec)| {
            let center = self.screen(spec.position, bounds)?;
            let reach = spec.style.diameter_px() / 2.0 + HIT_SLACK;
            (center.distance(point) <= reach).then_some(*handle)
        })
    }
}

impl canvas::Program<Message> for MapCanvas {
    type State = ();

    fn update(
        &self,
        _state: &mut Self::State,
        event: &canvas::Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<canvas::Action<Message>> {
        let canvas::Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) = event else {
            return None;
        };
        let position = cursor.position_in(bounds)?;
        let handle = self.marker_at(position, bounds)?;
        Some(canvas::Action::publish(Message::TogglePopup(handle)).and_capture())
    }

    fn mouse_interaction(
        &self,
        _state: &Self::State,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        match cursor.position_in(bounds) {
            Some(position) if self.marker_at(position, bounds).is_some() => {
                mouse::Interaction::Pointer
            }
            _ => mouse::Interaction::default(),
        }
    }

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        frame.fill_rectangle(
            Point::ORIGIN,
            bounds.size(),
            Color::from_rgb(0.80, 0.88, 0.93),
        );

        let graticule = Path::new(|builder| {
            for lng in (-180..=180).step_by(GRATICULE_STEP) {
                if let Some(p) = self.screen(LngLat::new(lng as f64, 0.0), bounds) {
                    builder.move_to(Point::new(p.x, 0.0));
                    builder.line_to(Point::new(p.x, bounds.height));
                }
            }
            for lat in (-60..=60).step_by(GRATICULE_STEP) {
                if let Some(p) = self.screen(LngLat::new(0.0, lat as f64), bounds) {
                    builder.move_to(Point::new(0.0, p.y));
                    builder.line_to(Point::new(bounds.width, p.y));
                }
            }
        });
        frame.stroke(
            &graticule,
            Stroke::default()
                .with_width(1.0)
                .with_color(Color::from_rgb(0.65, 0.74, 0.80)),
        );

        for (_, marker) in &self.markers {
            let Some(center) = self.screen(marker.position, bounds) else {
                continue;
            };
            let [r, g, b] = marker.style.fill_rgb();
            let circle = Path::circle(center, marker.style.diameter_px() / 2.0);
            frame.fill(&circle, Color::from_rgb8(r, g, b));
            frame.stroke(
                &circle,
                Stroke::default().with_width(2.0).with_color(Color::WHITE),
            );
        }

        if let Some(popup) = &self.popup {
            if let Some(anchor) = self.screen(popup.position, bounds) {
                let width = 12.0 + popup.popup.text.chars().count() as f32 * 7.5;
                let height = 26.0;
                let offset = popup.style.diameter_px() / 2.0 + 6.0;
                let top_left = Point::new(anchor.x - width / 2.0, anchor.y - offset - height);
                frame.fill(
                    &Path::rectangle(top_left, Size::new(width, height)),
                    Color::WHITE,
                );
                frame.fill_text(canvas::Text {
                    content: popup.popup.text.clone(),
                    position: Point::new(top_left.x + 6.0, top_left.y + 6.0),
                    color: Color::from_rgb(0.1, 0.1, 0.12),
                    size: Pixels(13.0),
                    ..canvas::Text::default()
                });
            }
        }

        frame.fill_text(canvas::Text {
            content: format!("{} | zoom {:.1}", self.style, self.viewport.zoom),
            position: Point::new(8.0, bounds.height - 20.0),
            color: Color::from_rgb(0.25, 0.3, 0.35),
            size: Pixels(11.0),
            ..canvas::Text::default()
        });

        vec![frame.into_geometry()]
    }
}
