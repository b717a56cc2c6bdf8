use crate::model::{Destination, LngLatBounds, SafetyZone};
use crate::prelude::FitOptions;
use crate::provider::{MapWidget, MarkerHandle, MarkerSpec, MarkerStyle, Popup};
use crate::telemetry::LogManager;

/// Result of one clear-and-redraw pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RedrawSummary {
    pub cleared: usize,
    pub destinations: usize,
    pub safety_zones: usize,
    pub fitted: Option<LngLatBounds>,
}

impl RedrawSummary {
    pub fn marker_count(&self) -> usize {
        self.destinations + self.safety_zones
    }
}

/// Keeps the widget's markers in line with the input lists.
///
/// Only handles created by this projector are ever removed.
pub struct MarkerProjector {
    owned: Vec<MarkerHandle>,
    fit: FitOptions,
    logger: LogManager,
}

impl MarkerProjector {
    pub fn new(fit: FitOptions) -> Self {
        Self {
            owned: Vec::new(),
            fit,
            logger: LogManager::new("projector"),
        }
    }

    pub fn marker_count(&self) -> usize {
        self.owned.len()
    }

    /// Removes every marker this projector added. Returns how many were removed.
    pub fn clear<W: MapWidget>(&mut self, widget: &mut W) -> usize {
        let cleared = self.owned.len();
        for handle in self.owned.drain(..) {
            widget.remove_marker(handle);
        }
        cleared
    }

    pub fn redraw<W: MapWidget>(
        &mut self,
        widget: &mut W,
        destinations: &[Destination],
        safety_zones: &[SafetyZone],
    ) -> RedrawSummary {
        let cleared = self.clear(widget);

        for destination in destinations {
            let handle = widget.add_marker(MarkerSpec {
                position: destination.coordinates,
                style: MarkerStyle::Destination,
                popup: Popup::new(destination.name.clone()),
            });
            self.owned.push(handle);
        }

        for zone in safety_zones {
            let handle = widget.add_marker(MarkerSpec {
                position: zone.coordinates,
                style: MarkerStyle::SafetyZone(zone.classification().color()),
                popup: Popup::new(zone.level.clone()),
            });
            self.owned.push(handle);
        }

        let fitted = if destinations.is_empty() {
            None
        } else {
            LngLatBounds::from_points(destinations.iter().map(|d| d.coordinates))
        };
        match fitted {
            Some(bounds) => widget.fit_bounds(bounds, self.fit),
            None if !destinations.is_empty() => {
                self.logger
                    .warn("no finite destination coordinates, viewport left unchanged");
            }
            None => {}
        }

        let summary = RedrawSummary {
            cleared,
            destinations: destinations.len(),
            safety_zones: safety_zones.len(),
            fitted,
        };
        self.logger.detail(&format!(
            "redraw: cleared {} / drew {} destinations, {} zones",
            summary.cleared, summary.destinations, summary.safety_zones
        ));
        summary
    }
}
