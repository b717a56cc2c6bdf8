use std::sync::Mutex;

pub struct MetricsRecorder {
    inner: Mutex<MetricsSnapshot>,
}

/// Counters for one component instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub initializations: usize,
    pub initialization_failures: usize,
    pub redraws: usize,
    pub markers_drawn: usize,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(MetricsSnapshot::default()),
        }
    }

    pub fn record_initialized(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.initializations += 1;
        }
    }

    pub fn record_initialization_failure(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.initialization_failures += 1;
        }
    }

    /// Records a completed redraw and the markers now on the map.
    pub fn record_redraw(&self, markers: usize) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.redraws += 1;
            metrics.markers_drawn = markers;
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        self.inner
            .lock()
            .map(|metrics| *metrics)
            .unwrap_or_default()
    }
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}
