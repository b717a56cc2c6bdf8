use crate::map::gate::CredentialGate;
use crate::map::notice::{Notification, INITIALIZED_MESSAGE, INVALID_TOKEN_MESSAGE};
use crate::map::projector::{MarkerProjector, RedrawSummary};
use crate::model::{Destination, MapProps, SafetyZone};
use crate::prelude::{MapError, MapOptions, MapResult};
use crate::provider::{ContainerId, MapProvider, MapWidget};
use crate::telemetry::{LogManager, MetricsRecorder, MetricsSnapshot};
use std::collections::VecDeque;

/// Whole-component state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    /// Waiting for an accepted token. Failed attempts stay here.
    Uncredentialed,
    /// Widget live, redraws on every input change.
    Active,
    /// Widget released. Terminal.
    Released,
}

/// One mounted map: credential gate, marker projection and widget lifetime.
pub struct MapComponent<P: MapProvider> {
    provider: P,
    container: ContainerId,
    options: MapOptions,
    gate: CredentialGate,
    projector: MarkerProjector,
    widget: Option<P::Widget>,
    state: LifecycleState,
    props: MapProps,
    notifications: VecDeque<Notification>,
    logger: LogManager,
    metrics: MetricsRecorder,
}

impl<P: MapProvider> MapComponent<P> {
    pub fn new(provider: P, container: ContainerId, options: MapOptions) -> Self {
        let projector = MarkerProjector::new(options.fit_options());
        Self {
            provider,
            container,
            options,
            gate: CredentialGate::new(),
            projector,
            widget: None,
            state: LifecycleState::Uncredentialed,
            props: MapProps::default(),
            notifications: VecDeque::new(),
            logger: LogManager::new("lifecycle"),
            metrics: MetricsRecorder::new(),
        }
    }

    pub fn with_props(mut self, props: MapProps) -> Self {
        self.props = props;
        self
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn is_initialized(&self) -> bool {
        self.state == LifecycleState::Active
    }

    pub fn options(&self) -> &MapOptions {
        &self.options
    }

    pub fn token(&self) -> &str {
        self.gate.token()
    }

    pub fn set_token(&mut self, token: impl Into<String>) {
        self.gate.set_token(token);
    }

    /// Whether the "Initialize Map" action is enabled.
    pub fn can_initialize(&self) -> bool {
        self.state == LifecycleState::Uncredentialed && self.gate.can_submit()
    }

    /// Runs the credential gate once.
    ///
    /// A provider failure is logged, queued as an error notification and
    /// returned; the gate stays open for another attempt.
    pub fn initialize(&mut self) -> MapResult<()> {
        match self.state {
            LifecycleState::Active => return Err(MapError::AlreadyInitialized),
            LifecycleState::Released => return Err(MapError::Released),
            LifecycleState::Uncredentialed => {}
        }

        match self
            .gate
            .submit(&mut self.provider, &self.container, &self.options)
        {
            Ok(widget) => {
                self.widget = Some(widget);
                self.state = LifecycleState::Active;
                self.metrics.record_initialized();
                self.logger.record(&format!(
                    "map initialized in container '{}'",
                    self.container.as_str()
                ));
                self.notifications
                    .push_back(Notification::success(INITIALIZED_MESSAGE));
                self.redraw();
                Ok(())
            }
            Err(MapError::EmptyToken) => Err(MapError::EmptyToken),
            Err(err) => {
                self.metrics.record_initialization_failure();
                self.logger.error(&format!("error initializing map: {err}"));
                self.notifications
                    .push_back(Notification::error(INVALID_TOKEN_MESSAGE));
                Err(err)
            }
        }
    }

    pub fn props(&self) -> &MapProps {
        &self.props
    }

    pub fn set_destinations(&mut self, destinations: Vec<Destination>) -> Option<RedrawSummary> {
        self.props.destinations = destinations;
        self.redraw()
    }

    pub fn set_safety_zones(&mut self, safety_zones: Vec<SafetyZone>) -> Option<RedrawSummary> {
        self.props.safety_zones = safety_zones;
        self.redraw()
    }

    /// Replaces both inputs and redraws once.
    pub fn set_props(&mut self, props: MapProps) -> Option<RedrawSummary> {
        self.props = props;
        self.redraw()
    }

    /// Clear-and-redraw pass. Does nothing unless the map is active.
    pub fn redraw(&mut self) -> Option<RedrawSummary> {
        if self.state != LifecycleState::Active {
            return None;
        }
        let widget = self.widget.as_mut()?;
        let summary = self.projector.redraw(
            widget,
            &self.props.destinations,
            &self.props.safety_zones,
        );
        self.metrics.record_redraw(summary.marker_count());
        Some(summary)
    }

    pub fn marker_count(&self) -> usize {
        self.projector.marker_count()
    }

    pub fn widget(&self) -> Option<&P::Widget> {
        self.widget.as_ref()
    }

    pub fn widget_mut(&mut self) -> Option<&mut P::Widget> {
        self.widget.as_mut()
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        self.notifications.drain(..).collect()
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    /// Releases the widget if one exists. Returns `true` only on the call
    /// that actually released it.
    pub fn unmount(&mut self) -> bool {
        if self.state == LifecycleState::Released {
            return false;
        }
        self.state = LifecycleState::Released;

        match self.widget.take() {
            Some(mut widget) => {
                self.projector.clear(&mut widget);
                widget.release();
                self.logger.record("map released");
                true
            }
            None => {
                self.logger.detail("unmounted before initialization");
                false
            }
        }
    }
}

impl<P: MapProvider> Drop for MapComponent<P> {
    fn drop(&mut self) {
        self.unmount();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::notice::NotificationKind;
    use crate::model::{LngLat, LngLatBounds, ZoneColor};
    use crate::provider::testing::{RecordingProvider, GOOD_TOKEN};
    use crate::provider::MarkerStyle;

    fn component() -> (RecordingProvider, MapComponent<RecordingProvider>) {
        let provider = RecordingProvider::new();
        let component = MapComponent::new(
            provider.clone(),
            ContainerId::new("map"),
            MapOptions::default(),
        );
        (provider, component)
    }

    fn active_component() -> (RecordingProvider, MapComponent<RecordingProvider>) {
        let (provider, mut component) = component();
        component.set_token(GOOD_TOKEN);
        component.initialize().unwrap();
        component.take_notifications();
        (provider, component)
    }

    #[test]
    fn accepted_token_activates_with_single_success_notice() {
        let (provider, mut component) = component();
        assert!(!component.can_initialize());
        component.set_token(GOOD_TOKEN);
        assert!(component.can_initialize());

        component.initialize().unwrap();

        assert_eq!(component.state(), LifecycleState::Active);
        assert!(!component.can_initialize());
        assert_eq!(
            component.take_notifications(),
            vec![Notification::success(INITIALIZED_MESSAGE)]
        );
        assert!(component.take_notifications().is_empty());
        assert_eq!(provider.ledger.borrow().constructed, 1);
        assert_eq!(component.metrics().initializations, 1);
    }

    #[test]
    fn rejected_token_keeps_gate_open_without_leaks() {
        let (provider, mut component) = component();
        component.set_token("pk.broken");

        for _ in 0..2 {
            let err = component.initialize().unwrap_err();
            assert!(matches!(err, MapError::InitializationFailure(_)));
            assert_eq!(component.state(), LifecycleState::Uncredentialed);
            let notices = component.take_notifications();
            assert_eq!(notices.len(), 1);
            assert_eq!(notices[0].kind, NotificationKind::Error);
            assert_eq!(notices[0].message, INVALID_TOKEN_MESSAGE);
        }

        assert_eq!(provider.ledger.borrow().rejected, 2);
        assert_eq!(provider.ledger.borrow().live_widgets(), 0);
        assert_eq!(component.metrics().initialization_failures, 2);

        component.set_token(GOOD_TOKEN);
        component.initialize().unwrap();
        assert!(component.is_initialized());
        assert_eq!(provider.ledger.borrow().live_widgets(), 1);
    }

    #[test]
    fn empty_token_is_refused_silently() {
        let (provider, mut component) = component();
        assert_eq!(component.initialize(), Err(MapError::EmptyToken));
        assert!(component.take_notifications().is_empty());
        assert_eq!(component.metrics().initialization_failures, 0);
        assert!(provider.ledger.borrow().last_token.is_none());
    }

    #[test]
    fn second_initialize_is_refused() {
        let (provider, mut component) = active_component();
        assert_eq!(component.initialize(), Err(MapError::AlreadyInitialized));
        assert_eq!(provider.ledger.borrow().constructed, 1);
    }

    #[test]
    fn inputs_before_activation_are_drawn_on_activation() {
        let (provider, mut component) = component();
        assert!(component
            .set_destinations(vec![Destination::new("Rome", LngLat::new(12.49, 41.9))])
            .is_none());
        assert!(provider.ledger.borrow().markers.is_empty());

        component.set_token(GOOD_TOKEN);
        component.initialize().unwrap();

        assert_eq!(component.marker_count(), 1);
        assert_eq!(provider.ledger.borrow().markers.len(), 1);
    }

    #[test]
    fn paris_scenario_fits_to_the_single_point() {
        let (provider, mut component) = active_component();
        let summary = component
            .set_props(MapProps::new(
                vec![Destination::new("Paris", LngLat::new(2.35, 48.86))],
                Vec::new(),
            ))
            .unwrap();

        assert_eq!(summary.marker_count(), 1);
        let ledger = provider.ledger.borrow();
        let marker = ledger.markers.values().next().unwrap();
        assert_eq!(marker.position, LngLat::new(2.35, 48.86));
        assert_eq!(marker.popup.text, "Paris");
        assert_eq!(
            ledger.fits.last().unwrap().0,
            LngLatBounds::from_point(LngLat::new(2.35, 48.86))
        );
    }

    #[test]
    fn danger_zone_only_leaves_viewport_untouched() {
        let (provider, mut component) = active_component();
        component.set_safety_zones(vec![SafetyZone::new(LngLat::new(0.0, 0.0), "danger")]);

        let ledger = provider.ledger.borrow();
        assert_eq!(ledger.markers.len(), 1);
        let marker = ledger.markers.values().next().unwrap();
        assert_eq!(marker.style, MarkerStyle::SafetyZone(ZoneColor::Red));
        assert_eq!(marker.position, LngLat::new(0.0, 0.0));
        assert!(ledger.fits.is_empty());
    }

    #[test]
    fn every_change_redraws_with_matching_marker_count() {
        let (provider, mut component) = active_component();
        component.set_destinations(vec![
            Destination::new("Oslo", LngLat::new(10.75, 59.91)),
            Destination::new("Bergen", LngLat::new(5.32, 60.39)),
        ]);
        component.set_safety_zones(vec![SafetyZone::new(LngLat::new(10.7, 59.9), "moderate")]);
        component.set_safety_zones(vec![SafetyZone::new(LngLat::new(10.7, 59.9), "moderate")]);

        assert_eq!(component.marker_count(), 3);
        assert_eq!(provider.ledger.borrow().markers.len(), 3);
        let metrics = component.metrics();
        // one redraw on activation plus three input changes
        assert_eq!(metrics.redraws, 4);
        assert_eq!(metrics.markers_drawn, 3);
    }

    #[test]
    fn unmount_releases_exactly_once() {
        let (provider, mut component) = active_component();
        component.set_destinations(vec![Destination::new("Paris", LngLat::new(2.35, 48.86))]);

        assert!(component.unmount());
        assert!(!component.unmount());

        assert_eq!(component.state(), LifecycleState::Released);
        assert!(component.widget().is_none());
        assert!(component.set_destinations(Vec::new()).is_none());
        assert_eq!(component.initialize(), Err(MapError::Released));

        drop(component);
        let ledger = provider.ledger.borrow();
        assert_eq!(ledger.released, 1);
        assert_eq!(ledger.live_widgets(), 0);
        assert!(ledger.markers.is_empty());
    }

    #[test]
    fn unmount_before_initialization_is_harmless() {
        let (provider, mut component) = component();
        assert!(!component.unmount());
        assert!(!component.unmount());
        assert_eq!(provider.ledger.borrow().released, 0);
    }

    #[test]
    fn drop_releases_active_widget() {
        let (provider, component) = active_component();
        drop(component);
        assert_eq!(provider.ledger.borrow().released, 1);
    }
}
