//! In-memory provider that records every call made against it.

use crate::model::LngLatBounds;
use crate::prelude::{ControlPosition, FitOptions, MapOptions, ProviderError};
use crate::provider::{
    check_public_token, ContainerId, Control, MapProvider, MapWidget, MarkerHandle, MarkerSpec,
};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

#[derive(Debug, Default)]
pub(crate) struct Ledger {
    pub constructed: usize,
    pub rejected: usize,
    pub released: usize,
    pub last_token: Option<String>,
    pub controls: Vec<(Control, ControlPosition)>,
    pub markers: BTreeMap<MarkerHandle, MarkerSpec>,
    pub added: usize,
    pub fits: Vec<(LngLatBounds, FitOptions)>,
}

impl Ledger {
    pub fn live_widgets(&self) -> usize {
        self.constructed - self.released
    }
}

#[derive(Clone, Default)]
pub(crate) struct RecordingProvider {
    pub ledger: Rc<RefCell<Ledger>>,
}

impl RecordingProvider {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MapProvider for RecordingProvider {
    type Widget = RecordingWidget;

    fn construct(
        &mut self,
        _container: &ContainerId,
        token: &str,
        _options: &MapOptions,
    ) -> Result<Self::Widget, ProviderError> {
        let mut ledger = self.ledger.borrow_mut();
        ledger.last_token = Some(token.to_string());
        if let Err(err) = check_public_token(token) {
            ledger.rejected += 1;
            return Err(err);
        }
        ledger.constructed += 1;
        Ok(RecordingWidget {
            ledger: self.ledger.clone(),
            next_handle: 0,
        })
    }
}

pub(crate) struct RecordingWidget {
    ledger: Rc<RefCell<Ledger>>,
    next_handle: u64,
}

impl MapWidget for RecordingWidget {
    fn add_control(&mut self, control: Control, position: ControlPosition) {
        self.ledger.borrow_mut().controls.push((control, position));
    }

    fn add_marker(&mut self, marker: MarkerSpec) -> MarkerHandle {
        self.next_handle += 1;
        let handle = MarkerHandle::new(self.next_handle);
        let mut ledger = self.ledger.borrow_mut();
        ledger.markers.insert(handle, marker);
        ledger.added += 1;
        handle
    }

    fn remove_marker(&mut self, handle: MarkerHandle) {
        self.ledger.borrow_mut().markers.remove(&handle);
    }

    fn fit_bounds(&mut self, bounds: LngLatBounds, options: FitOptions) {
        self.ledger.borrow_mut().fits.push((bounds, options));
    }

    fn release(&mut self) {
        self.ledger.borrow_mut().released += 1;
    }
}

pub(crate) const GOOD_TOKEN: &str = "pk.eyJ1IjoidHJhdmVsIn0.c2lnbmF0dXJl";
