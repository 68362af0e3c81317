//! Core event center: named buckets of ordered subscriptions

use crate::config::EventCenterConfig;
use crate::error::{EventCenterError, EventError};
use crate::handler::{Handler, HandlerId, HandlerOutcome, Propagation, Subscription, Unsubscribe};
use crate::payload::{deep_copy, EventParam};
use crate::stats::{EventStats, StatsCollector};
use compact_str::CompactString;
use dashmap::DashMap;
use serde::Serialize;
use smallvec::SmallVec;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, error, trace, warn};

/// Ordered subscriptions registered under one event name
pub(crate) type Bucket = SmallVec<[Subscription; 4]>;

/// Synchronous publish/subscribe dispatcher.
///
/// Handlers are invoked inline on the emitting thread, in registration
/// order. Buckets are created on first subscription and are emptied, never
/// removed, by [`Unsubscribe::All`].
///
/// Dispatch iterates a snapshot of the bucket taken when the round starts, and
/// no map guard is held while a handler runs. Handlers may therefore call
/// back into the same center; changes they make apply from the next round.
pub struct EventCenter {
    /// Event name to its ordered subscriptions
    events: DashMap<CompactString, Bucket>,
    /// Last id handed out; pre-incremented on every subscription
    next_id: AtomicU64,
    config: EventCenterConfig,
    stats: StatsCollector,
}

impl std::fmt::Debug for EventCenter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventCenter")
            .field("events", &self.events.len())
            .field("next_id", &self.next_id.load(Ordering::Relaxed))
            .field("config", &self.config)
            .finish()
    }
}

impl EventCenter {
    /// Creates an event center with the default configuration.
    pub fn new() -> Self {
        Self::from_valid_config(EventCenterConfig::default())
    }

    /// Creates an event center from a custom configuration.
    pub fn with_config(config: EventCenterConfig) -> Result<Self, EventCenterError> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: EventCenterConfig) -> Self {
        Self {
            events: DashMap::new(),
            next_id: AtomicU64::new(config.first_handler_id),
            config,
            stats: StatsCollector::default(),
        }
    }

    /// The configuration this center was built with
    pub fn config(&self) -> &EventCenterConfig {
        &self.config
    }

    /// Subscribes a closure to `name`.
    ///
    /// Returns the new subscription's id, or [`HandlerId::NONE`] when `name`
    /// is empty or the id counter is exhausted. A rejected subscription
    /// creates no bucket.
    ///
    /// ```
    /// use event_center::{EventCenter, EventParam};
    ///
    /// let center = EventCenter::new();
    /// let id = center.subscribe("ping", |param: EventParam| {
    ///     println!("got {}", param.data);
    /// });
    /// assert_eq!(id.as_u64(), 2);
    /// ```
    pub fn subscribe<F, R>(&self, name: &str, handler: F) -> HandlerId
    where
        F: Fn(EventParam) -> R + Send + Sync + 'static,
        R: HandlerOutcome,
    {
        self.subscribe_handler(name, &Handler::new(handler))
    }

    /// Subscribes an existing [`Handler`] to `name`.
    ///
    /// Keep a clone of the handler to unsubscribe it by reference later. The
    /// same handler may be subscribed more than once; each registration gets
    /// its own id.
    pub fn subscribe_handler(&self, name: &str, handler: &Handler) -> HandlerId {
        if name.is_empty() {
            debug!("Rejected subscription with empty event name");
            return HandlerId::NONE;
        }

        let entry = self.events.entry(CompactString::new(name));
        // Allocated under the entry guard so ids stay ordered within the bucket
        let Some(id) = self.allocate_id() else {
            debug!("Rejected subscription for '{}': handler ids exhausted", name);
            return HandlerId::NONE;
        };
        let mut bucket = entry.or_default();
        bucket.push(Subscription {
            id,
            handler: handler.clone(),
        });
        drop(bucket);

        debug!(
            "📝 Registered handler {} ({}) for '{}'",
            id,
            handler.handler_name(),
            name
        );
        id
    }

    /// Next id, or `None` once the counter cannot advance without wrapping
    fn allocate_id(&self) -> Option<HandlerId> {
        self.next_id
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |last| last.checked_add(1))
            .ok()
            .map(|last| HandlerId(last + 1))
    }

    /// Removes subscriptions from `name`.
    ///
    /// `Unsubscribe::Handler` and `Unsubscribe::Id` remove only the first
    /// match. `Unsubscribe::All` and the sentinel id empty the bucket. Unknown
    /// names, handlers and ids are ignored. Returns how many subscriptions
    /// were removed.
    pub fn unsubscribe<'a>(&self, name: &str, target: impl Into<Unsubscribe<'a>>) -> usize {
        let Some(mut bucket) = self.events.get_mut(name) else {
            return 0;
        };

        let position = match target.into() {
            Unsubscribe::All | Unsubscribe::Id(HandlerId::NONE) => {
                let removed = bucket.len();
                bucket.clear();
                debug!("🧹 Cleared {} handler(s) for '{}'", removed, name);
                return removed;
            }
            Unsubscribe::Handler(handler) => bucket
                .iter()
                .position(|subscription| subscription.handler.same_handler(handler)),
            Unsubscribe::Id(id) => bucket.iter().position(|subscription| subscription.id == id),
        };

        match position {
            Some(index) => {
                let removed = bucket.remove(index);
                debug!("🗑️ Removed handler {} from '{}'", removed.id, name);
                1
            }
            None => 0,
        }
    }

    /// Removes every subscription under `name`, keeping the bucket.
    pub fn unsubscribe_all(&self, name: &str) -> usize {
        self.unsubscribe(name, Unsubscribe::All)
    }

    /// Emits `payload` to every subscriber of `name`.
    ///
    /// Each handler receives `EventParam { data }` holding its own structural
    /// copy of the payload. The round stops early when a handler returns
    /// `false`. A handler error aborts the round and is returned here. Emitting
    /// to a name without subscribers does nothing.
    pub fn emit<T: Serialize + ?Sized>(&self, name: &str, payload: &T) -> Result<(), EventError> {
        let subscriptions = match self.events.get(name) {
            Some(bucket) if !bucket.is_empty() => bucket.value().clone(),
            _ => {
                self.report_unhandled(name);
                return Ok(());
            }
        };

        let data = deep_copy(payload)?;
        self.stats.record_emitted();
        trace!("📤 Emitting '{}' to {} handler(s)", name, subscriptions.len());

        self.dispatch(name, &subscriptions, data)
    }

    /// Emits `name` with a `null` payload.
    pub fn emit_empty(&self, name: &str) -> Result<(), EventError> {
        self.emit(name, &())
    }

    fn dispatch(
        &self,
        name: &str,
        subscriptions: &[Subscription],
        data: serde_json::Value,
    ) -> Result<(), EventError> {
        for subscription in subscriptions {
            match subscription.handler.call(EventParam::new(data.clone())) {
                Ok(Propagation::Continue) => self.stats.record_invoked(),
                Ok(Propagation::Stop) => {
                    self.stats.record_invoked();
                    self.stats.record_short_circuit();
                    trace!("Handler {} stopped dispatch of '{}'", subscription.id, name);
                    break;
                }
                Err(e) => {
                    self.stats.record_failure();
                    error!(
                        "❌ Handler {} ({}) failed on '{}': {}",
                        subscription.id,
                        subscription.handler.handler_name(),
                        name,
                        e
                    );
                    return Err(e);
                }
            }
        }

        Ok(())
    }

    fn report_unhandled(&self, name: &str) {
        self.stats.record_unhandled();
        if self.config.is_quiet(name) {
            return;
        }
        if self.config.warn_on_unhandled {
            warn!("⚠️ No handlers for event: {}", name);
        } else {
            debug!("No handlers for event: {}", name);
        }
    }

    /// True when a bucket exists for `name`, even an empty one
    pub fn has_event(&self, name: &str) -> bool {
        self.events.contains_key(name)
    }

    /// Number of subscriptions registered under `name`
    pub fn handler_count(&self, name: &str) -> usize {
        self.events.get(name).map_or(0, |bucket| bucket.len())
    }

    /// Ids registered under `name`, in dispatch order
    pub fn handler_ids(&self, name: &str) -> Vec<HandlerId> {
        self.events.get(name).map_or_else(Vec::new, |bucket| {
            bucket.iter().map(|subscription| subscription.id).collect()
        })
    }

    /// All event names that have a bucket
    pub fn registered_events(&self) -> Vec<String> {
        self.events.iter().map(|entry| entry.key().to_string()).collect()
    }

    /// Subscriptions registered across all events
    pub fn total_handlers(&self) -> usize {
        self.events.iter().map(|entry| entry.value().len()).sum()
    }

    /// Gets the current statistics
    pub fn stats(&self) -> EventStats {
        self.stats.snapshot(self.total_handlers())
    }
}

impl Default for EventCenter {
    fn default() -> Self {
        Self::new()
    }
}
