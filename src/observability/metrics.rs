//! Metrics registry for accountdb
//!
//! - Counters only (no gauges, no histograms)
//! - Monotonic increase, reset only on process start
//! - Thread-safe, lock-free (atomics)

use std::sync::atomic::{AtomicU64, Ordering};

/// Operational counters for the request path.
///
/// All values are exact; `Relaxed` ordering is used because counters are
/// independent of each other and never gate correctness decisions.
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    requests_total: AtomicU64,
    cache_hits_total: AtomicU64,
    bad_requests_total: AtomicU64,
    not_found_total: AtomicU64,
    internal_errors_total: AtomicU64,
}

/// Point-in-time snapshot of [`MetricsRegistry`], suitable for the
/// diagnostic surface (`explain` CLI command).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MetricsSnapshot {
    pub requests_total: u64,
    pub cache_hits_total: u64,
    pub bad_requests_total: u64,
    pub not_found_total: u64,
    pub internal_errors_total: u64,
}

impl MetricsRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_request(&self) {
        self.requests_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_cache_hit(&self) {
        self.cache_hits_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_bad_request(&self) {
        self.bad_requests_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_not_found(&self) {
        self.not_found_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_internal_error(&self) {
        self.internal_errors_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            requests_total: self.requests_total.load(Ordering::Relaxed),
            cache_hits_total: self.cache_hits_total.load(Ordering::Relaxed),
            bad_requests_total: self.bad_requests_total.load(Ordering::Relaxed),
            not_found_total: self.not_found_total.load(Ordering::Relaxed),
            internal_errors_total: self.internal_errors_total.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_start_at_zero() {
        let m = MetricsRegistry::new();
        assert_eq!(m.snapshot(), MetricsSnapshot::default());
    }

    #[test]
    fn counters_increment_independently() {
        let m = MetricsRegistry::new();
        m.record_request();
        m.record_request();
        m.record_cache_hit();
        m.record_bad_request();

        let snap = m.snapshot();
        assert_eq!(snap.requests_total, 2);
        assert_eq!(snap.cache_hits_total, 1);
        assert_eq!(snap.bad_requests_total, 1);
        assert_eq!(snap.not_found_total, 0);
    }
}
