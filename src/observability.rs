//! Observability stubs (metrics, tracing)

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics handle for recording counters/gauges
#[derive(Debug, Default)]
pub struct Metrics {
    jobs_submitted: AtomicU64,
    jobs_rejected: AtomicU64,
    status_checks: AtomicU64,
    media_bytes_served: AtomicU64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn job_submitted(&self) {
        self.jobs_submitted.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "jobs_submitted", "Metric incremented");
    }

    pub fn job_rejected(&self) {
        self.jobs_rejected.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "jobs_rejected", "Metric incremented");
    }

    pub fn status_checked(&self) {
        self.status_checks.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "status_checks", "Metric incremented");
    }

    pub fn media_served(&self, bytes: u64) {
        self.media_bytes_served.fetch_add(bytes, Ordering::Relaxed);
        tracing::debug!(counter = "media_bytes_served", bytes, "Metric incremented");
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            jobs_submitted: self.jobs_submitted.load(Ordering::Relaxed),
            jobs_rejected: self.jobs_rejected.load(Ordering::Relaxed),
            status_checks: self.status_checks.load(Ordering::Relaxed),
            media_bytes_served: self.media_bytes_served.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MetricsSnapshot {
    pub jobs_submitted: u64,
    pub jobs_rejected: u64,
    pub status_checks: u64,
    pub media_bytes_served: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_accumulate() {
        let metrics = Metrics::new();
        metrics.job_submitted();
        metrics.job_submitted();
        metrics.job_rejected();
        metrics.status_checked();
        metrics.media_served(100);
        metrics.media_served(28);

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.jobs_submitted, 2);
        assert_eq!(snapshot.jobs_rejected, 1);
        assert_eq!(snapshot.status_checks, 1);
        assert_eq!(snapshot.media_bytes_served, 128);
    }
}
