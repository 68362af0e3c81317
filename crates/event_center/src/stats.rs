//! Statistics tracking for the event center

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Snapshot of event center activity for monitoring
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventStats {
    /// Dispatch rounds that found at least one subscriber
    pub events_emitted: u64,
    /// Emits that found no subscriber
    pub events_unhandled: u64,
    /// Handler invocations that returned normally
    pub handlers_invoked: u64,
    /// Rounds stopped early by a handler returning `false`
    pub short_circuits: u64,
    /// Handler invocations that returned an error
    pub handler_failures: u64,
    /// Subscriptions currently registered across all events
    pub total_handlers: usize,
}

/// Lock-free counters behind [`EventStats`]
#[derive(Debug, Default)]
pub(crate) struct StatsCollector {
    events_emitted: AtomicU64,
    events_unhandled: AtomicU64,
    handlers_invoked: AtomicU64,
    short_circuits: AtomicU64,
    handler_failures: AtomicU64,
}

impl StatsCollector {
    pub(crate) fn record_emitted(&self) {
        self.events_emitted.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_unhandled(&self) {
        self.events_unhandled.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_invoked(&self) {
        self.handlers_invoked.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_short_circuit(&self) {
        self.short_circuits.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_failure(&self) {
        self.handler_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self, total_handlers: usize) -> EventStats {
        EventStats {
            events_emitted: self.events_emitted.load(Ordering::Relaxed),
            events_unhandled: self.events_unhandled.load(Ordering::Relaxed),
            handlers_invoked: self.handlers_invoked.load(Ordering::Relaxed),
            short_circuits: self.short_circuits.load(Ordering::Relaxed),
            handler_failures: self.handler_failures.load(Ordering::Relaxed),
            total_handlers,
        }
    }
}
