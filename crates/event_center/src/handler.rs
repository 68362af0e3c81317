//! Handler values, handler ids and propagation control

use crate::error::EventError;
use crate::payload::EventParam;
use compact_str::CompactString;
use std::fmt;
use std::sync::Arc;

/// Identifier assigned to a subscription at registration time.
///
/// Ids are handed out by a per-center counter and are never reused while the
/// center lives. [`HandlerId::NONE`] is returned when a subscription is
/// rejected and never identifies a real subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct HandlerId(pub u64);

impl HandlerId {
    /// Sentinel for a rejected subscription
    pub const NONE: HandlerId = HandlerId(0);

    /// Returns true for the rejection sentinel
    pub fn is_none(&self) -> bool {
        self.0 == 0
    }

    /// Raw counter value
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for HandlerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for HandlerId {
    fn from(id: u64) -> Self {
        HandlerId(id)
    }
}

/// Whether a dispatch round continues after a handler returns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
    /// Invoke the next handler in the bucket
    Continue,
    /// Skip the remaining handlers for this emit call
    Stop,
}

/// Values a handler may return.
///
/// `()` and `true` continue the round, `false` stops it, and an `Err` aborts
/// the round and is handed back to the emitter.
pub trait HandlerOutcome {
    fn into_outcome(self) -> Result<Propagation, EventError>;
}

impl HandlerOutcome for () {
    fn into_outcome(self) -> Result<Propagation, EventError> {
        Ok(Propagation::Continue)
    }
}

impl HandlerOutcome for bool {
    fn into_outcome(self) -> Result<Propagation, EventError> {
        Ok(if self { Propagation::Continue } else { Propagation::Stop })
    }
}

impl HandlerOutcome for Propagation {
    fn into_outcome(self) -> Result<Propagation, EventError> {
        Ok(self)
    }
}

impl<R: HandlerOutcome> HandlerOutcome for Result<R, EventError> {
    fn into_outcome(self) -> Result<Propagation, EventError> {
        self.and_then(HandlerOutcome::into_outcome)
    }
}

type HandlerFn = dyn Fn(EventParam) -> Result<Propagation, EventError> + Send + Sync;

/// A shareable event handler.
///
/// Cloning a `Handler` yields the same handler: clones compare equal and can
/// be used to unsubscribe the original registration by reference.
#[derive(Clone)]
pub struct Handler {
    func: Arc<HandlerFn>,
    name: CompactString,
}

impl Handler {
    /// Wrap a closure, naming it after its type for diagnostics
    pub fn new<F, R>(handler: F) -> Self
    where
        F: Fn(EventParam) -> R + Send + Sync + 'static,
        R: HandlerOutcome,
    {
        Self::named(std::any::type_name::<F>(), handler)
    }

    /// Wrap a closure under an explicit diagnostic name
    pub fn named<F, R>(name: &str, handler: F) -> Self
    where
        F: Fn(EventParam) -> R + Send + Sync + 'static,
        R: HandlerOutcome,
    {
        Self {
            func: Arc::new(move |param: EventParam| handler(param).into_outcome()),
            name: CompactString::new(name),
        }
    }

    /// Handler name for debugging
    pub fn handler_name(&self) -> &str {
        &self.name
    }

    /// True when both values wrap the same underlying handler
    pub fn same_handler(&self, other: &Handler) -> bool {
        Arc::ptr_eq(&self.func, &other.func)
    }

    pub(crate) fn call(&self, param: EventParam) -> Result<Propagation, EventError> {
        (self.func)(param)
    }
}

impl PartialEq for Handler {
    fn eq(&self, other: &Self) -> bool {
        self.same_handler(other)
    }
}

impl Eq for Handler {}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handler")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// A handler paired with the id it was registered under
#[derive(Debug, Clone)]
pub struct Subscription {
    pub id: HandlerId,
    pub handler: Handler,
}

/// Selects what [`EventCenter::unsubscribe`](crate::EventCenter::unsubscribe) removes
#[derive(Debug, Clone, Copy)]
pub enum Unsubscribe<'a> {
    /// Every subscription under the name
    All,
    /// The first subscription holding this handler
    Handler(&'a Handler),
    /// The first subscription registered under this id
    Id(HandlerId),
}

impl<'a> From<&'a Handler> for Unsubscribe<'a> {
    fn from(handler: &'a Handler) -> Self {
        Unsubscribe::Handler(handler)
    }
}

impl From<HandlerId> for Unsubscribe<'_> {
    fn from(id: HandlerId) -> Self {
        Unsubscribe::Id(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_outcome_conversion() {
        assert_eq!(().into_outcome().unwrap(), Propagation::Continue);
        assert_eq!(true.into_outcome().unwrap(), Propagation::Continue);
        assert_eq!(false.into_outcome().unwrap(), Propagation::Stop);
        assert_eq!(
            Ok::<bool, EventError>(false).into_outcome().unwrap(),
            Propagation::Stop
        );

        let failed: Result<(), EventError> =
            Err(EventError::HandlerExecutionFailed("boom".to_string()));
        assert!(failed.into_outcome().is_err());
    }

    #[test]
    fn test_handler_identity() {
        let first = Handler::new(|_param: EventParam| {});
        let second = Handler::new(|_param: EventParam| {});
        let clone = first.clone();

        assert_eq!(first, clone);
        assert_ne!(first, second);
    }

    #[test]
    fn test_handler_call_and_name() {
        let handler = Handler::named("stopper", |param: EventParam| param.data != Value::Null);

        assert_eq!(handler.handler_name(), "stopper");
        assert_eq!(
            handler.call(EventParam::new(Value::Null)).unwrap(),
            Propagation::Stop
        );
    }

    #[test]
    fn test_handler_id_sentinel() {
        assert!(HandlerId::NONE.is_none());
        assert!(!HandlerId(2).is_none());
        assert_eq!(HandlerId::from(5).to_string(), "5");
    }
}
