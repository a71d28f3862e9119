use serde::Serialize;
use std::sync::Mutex;

/// Counts snapshot refreshes and failed refresh attempts.
pub struct MetricsRecorder {
    inner: Mutex<RefreshMetrics>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RefreshMetrics {
    pub refreshes: usize,
    pub failures: usize,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(RefreshMetrics::default()),
        }
    }

    pub fn record_refresh(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.refreshes += 1;
        }
    }

    pub fn record_failure(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.failures += 1;
        }
    }

    pub fn snapshot(&self) -> RefreshMetrics {
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
