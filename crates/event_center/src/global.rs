//! Process-wide default event center

use crate::center::EventCenter;
use crate::config::EventCenterConfig;
use crate::error::EventCenterError;
use std::sync::OnceLock;
use tracing::info;

/// Global event center shared by the whole process.
///
/// Created once, either by [`init_global`] at startup or lazily with the
/// default configuration on first use, and lives until the process exits.
static GLOBAL_EVENT_CENTER: OnceLock<EventCenter> = OnceLock::new();

/// Initialize the global event center from `config`.
///
/// Returns `Ok(true)` when this call created the instance and `Ok(false)` if
/// it already existed, in which case the existing instance and its
/// configuration are kept.
pub fn init_global(config: EventCenterConfig) -> Result<bool, EventCenterError> {
    let center = EventCenter::with_config(config)?;
    let mut created = false;
    GLOBAL_EVENT_CENTER.get_or_init(|| {
        created = true;
        center
    });

    if created {
        info!("🔧 Global event center initialized");
    }
    Ok(created)
}

/// Get the global event center, creating it with defaults if necessary.
///
/// Safe to call from multiple threads concurrently.
pub fn global() -> &'static EventCenter {
    GLOBAL_EVENT_CENTER.get_or_init(EventCenter::new)
}
