//! # Event Center
//!
//! A minimal in-process publish/subscribe dispatcher. Callers register
//! handlers under event names, emit named events with any serializable
//! payload, and every matching handler runs synchronously in registration
//! order.
//!
//! ## Key Features
//!
//! - **Ordered dispatch**: handlers fire in the order they subscribed
//! - **Short-circuiting**: a handler returning `false` stops the round
//! - **Isolated payloads**: each handler gets its own structural copy
//! - **Flexible removal**: unsubscribe by handler, by id, or all at once
//! - **Global instance**: a process-wide center for ambient use
//!
//! ## Usage Examples
//!
//! ```rust
//! use event_center::{EventCenter, EventParam, Handler};
//! use serde_json::json;
//!
//! let center = EventCenter::new();
//!
//! // Register a handler and keep its id
//! let id = center.subscribe("ping", |param: EventParam| {
//!     println!("ping {}", param.data["n"]);
//! });
//!
//! // Handlers can also be shared and removed by reference
//! let guard = Handler::new(|param: EventParam| param.data["n"] != 0);
//! center.subscribe_handler("ping", &guard);
//!
//! center.emit("ping", &json!({ "n": 1 }))?;
//!
//! center.unsubscribe("ping", id);
//! center.unsubscribe("ping", &guard);
//! # Ok::<(), event_center::EventError>(())
//! ```
//!
//! ### Global Instance
//!
//! ```rust
//! use event_center::{global, EventParam};
//!
//! global().subscribe("app:ready", |_param: EventParam| {});
//! global().emit_empty("app:ready")?;
//! # Ok::<(), event_center::EventError>(())
//! ```

pub mod center;
pub mod config;
pub mod error;
pub mod global;
pub mod handler;
pub mod payload;
pub mod stats;


// Re-exports for convenience
pub use center::EventCenter;
pub use config::EventCenterConfig;
pub use error::{EventCenterError, EventError};
pub use global::{global, init_global};
pub use handler::{Handler, HandlerId, HandlerOutcome, Propagation, Subscription, Unsubscribe};
pub use payload::{deep_copy, EventParam};
pub use stats::EventStats;

/// Result type used throughout the crate
pub type Result<T> = std::result::Result<T, EventCenterError>;
