//! Projection metrics
//!
//! Counters shared by every projection made through a subscription.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::projection::ProjectionReport;

/// Metrics for one subscription
#[derive(Debug, Default)]
pub struct ProjectionMetrics {
    /// Samples projected successfully
    pub samples_projected: AtomicU64,

    /// Samples rejected as malformed
    pub failures: AtomicU64,

    /// Actor steps removed by the actor filter
    pub steps_dropped: AtomicU64,

    /// Payload slots emptied by liveness truncation
    pub payloads_truncated: AtomicU64,

    /// Payload bytes not carried into projected samples
    pub bytes_released: AtomicU64,

    /// Total time spent projecting (nanoseconds)
    pub total_time_ns: AtomicU64,
}

impl ProjectionMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a successful projection
    pub fn record(&self, report: &ProjectionReport, duration: Duration) {
        self.samples_projected.fetch_add(1, Ordering::Relaxed);
        self.steps_dropped
            .fetch_add(report.steps_dropped as u64, Ordering::Relaxed);
        self.payloads_truncated
            .fetch_add(report.payloads_truncated as u64, Ordering::Relaxed);
        self.bytes_released
            .fetch_add(report.bytes_released as u64, Ordering::Relaxed);
        self.total_time_ns
            .fetch_add(duration.as_nanos() as u64, Ordering::Relaxed);
    }

    /// Record a malformed sample
    pub fn record_failure(&self) {
        self.failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Reset all metrics
    pub fn reset(&self) {
        self.samples_projected.store(0, Ordering::Relaxed);
        self.failures.store(0, Ordering::Relaxed);
        self.steps_dropped.store(0, Ordering::Relaxed);
        self.payloads_truncated.store(0, Ordering::Relaxed);
        self.bytes_released.store(0, Ordering::Relaxed);
        self.total_time_ns.store(0, Ordering::Relaxed);
    }

    /// Get a snapshot of current metrics
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            samples: self.samples_projected.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
            steps_dropped: self.steps_dropped.load(Ordering::Relaxed),
            payloads_truncated: self.payloads_truncated.load(Ordering::Relaxed),
            bytes_released: self.bytes_released.load(Ordering::Relaxed),
            total_time_ns: self.total_time_ns.load(Ordering::Relaxed),
        }
    }
}

/// A point-in-time snapshot of projection metrics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MetricsSnapshot {
    pub samples: u64,
    pub failures: u64,
    pub steps_dropped: u64,
    pub payloads_truncated: u64,
    pub bytes_released: u64,
    pub total_time_ns: u64,
}

impl MetricsSnapshot {
    /// Average time per projected sample
    pub fn avg_projection_time(&self) -> Duration {
        if self.samples == 0 {
            Duration::ZERO
        } else {
            Duration::from_nanos(self.total_time_ns / self.samples)
        }
    }
}

impl std::fmt::Display for MetricsSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "Samples: {} | Failures: {} | Steps dropped: {}",
            self.samples, self.failures, self.steps_dropped
        )?;
        writeln!(
            f,
            "  Payloads truncated: {} | Bytes released: {}",
            self.payloads_truncated, self.bytes_released
        )?;
        writeln!(
            f,
            "  Avg Time: {:.3}ms",
            self.avg_projection_time().as_secs_f64() * 1000.0
        )?;
        Ok(())
    }
}
