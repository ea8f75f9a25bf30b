use serde::Serialize;
use std::sync::Mutex;

/// Counters for a front-end session.
pub struct MetricsRecorder {
    inner: Mutex<MetricsSnapshot>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub predictions: usize,
    pub advisories: usize,
    pub missing_images: usize,
    pub failures: usize,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(MetricsSnapshot::default()),
        }
    }

    pub fn record_prediction(&self, advisories: usize, image_missing: bool) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.predictions += 1;
            metrics.advisories += advisories;
            if image_missing {
                metrics.missing_images += 1;
            }
        }
    }

    pub fn record_failure(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.failures += 1;
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_accumulate() {
        let metrics = MetricsRecorder::new();
        metrics.record_prediction(2, true);
        metrics.record_prediction(0, false);
        metrics.record_failure();
        assert_eq!(
            metrics.snapshot(),
            MetricsSnapshot {
                predictions: 2,
                advisories: 2,
                missing_images: 1,
                failures: 1,
            }
        );
    }
}
