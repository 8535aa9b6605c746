//! Language switching metrics.
//!
//! Counters are owned by a single controller (shared with its scheduled
//! tasks through an `Arc`), so independent controllers never mix numbers.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Counters for one language controller.
#[derive(Debug, Default)]
pub struct SwitchMetrics {
    /// Number of language changes that passed the no-op guard
    switches: AtomicUsize,

    /// Number of navigations to a language variant of the current page
    redirects: AtomicUsize,

    /// Number of translatable elements whose key had no entry
    missed_lookups: AtomicUsize,

    /// Number of pending transitions aborted by a newer request
    cancelled_transitions: AtomicUsize,
}

impl SwitchMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_switch(&self) {
        self.switches.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_redirect(&self) {
        self.redirects.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_missed_lookups(&self, count: usize) {
        self.missed_lookups.fetch_add(count, Ordering::Relaxed);
    }

    pub fn record_cancelled_transition(&self) {
        self.cancelled_transitions.fetch_add(1, Ordering::Relaxed);
    }

    pub fn switches(&self) -> usize {
        self.switches.load(Ordering::Relaxed)
    }

    pub fn redirects(&self) -> usize {
        self.redirects.load(Ordering::Relaxed)
    }

    pub fn missed_lookups(&self) -> usize {
        self.missed_lookups.load(Ordering::Relaxed)
    }

    pub fn cancelled_transitions(&self) -> usize {
        self.cancelled_transitions.load(Ordering::Relaxed)
    }

    /// Generate a metrics report.
    pub fn report(&self) -> MetricsReport {
        MetricsReport {
            switches: self.switches(),
            redirects: self.redirects(),
            missed_lookups: self.missed_lookups(),
            cancelled_transitions: self.cancelled_transitions(),
        }
    }
}

/// Snapshot of [`SwitchMetrics`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsReport {
    pub switches: usize,
    pub redirects: usize,
    pub missed_lookups: usize,
    pub cancelled_transitions: usize,
}
