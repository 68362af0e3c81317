//! Configuration for an [`EventCenter`](crate::EventCenter).
//!
//! Every field has a serde default, so an empty TOML document yields the same
//! configuration as [`EventCenterConfig::default`].

use crate::error::EventCenterError;
use serde::{Deserialize, Serialize};

/// Default starting value of the handler id counter
fn default_first_handler_id() -> u64 {
    1
}

/// Event center configuration settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventCenterConfig {
    /// Initial counter value; the first subscription receives this plus one
    #[serde(default = "default_first_handler_id")]
    pub first_handler_id: u64,
    /// Log emits that reach no subscriber at warn level instead of debug
    #[serde(default)]
    pub warn_on_unhandled: bool,
    /// Event names that are never reported as unhandled (e.g. high-frequency ticks)
    #[serde(default)]
    pub quiet_events: Vec<String>,
}

impl Default for EventCenterConfig {
    fn default() -> Self {
        Self {
            first_handler_id: default_first_handler_id(),
            warn_on_unhandled: false,
            quiet_events: Vec::new(),
        }
    }
}

impl EventCenterConfig {
    /// Parses and validates a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, EventCenterError> {
        let config: EventCenterConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration values.
    ///
    /// The counter is pre-incremented, so starting at `u64::MAX` would hand
    /// out the rejection sentinel as the first id.
    pub fn validate(&self) -> Result<(), EventCenterError> {
        if self.first_handler_id == u64::MAX {
            return Err(EventCenterError::InvalidConfig(
                "first_handler_id must be below u64::MAX".to_string(),
            ));
        }

        if self.quiet_events.iter().any(|name| name.is_empty()) {
            return Err(EventCenterError::InvalidConfig(
                "quiet_events cannot contain empty names".to_string(),
            ));
        }

        Ok(())
    }

    pub(crate) fn is_quiet(&self, name: &str) -> bool {
        self.quiet_events.iter().any(|quiet| quiet == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = EventCenterConfig::default();

        assert_eq!(config.first_handler_id, 1);
        assert_eq!(config.warn_on_unhandled, false);
        assert!(config.quiet_events.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_toml_matches_default() {
        let config = EventCenterConfig::from_toml_str("").unwrap();
        assert_eq!(config, EventCenterConfig::default());
    }

    #[test]
    fn test_toml_parsing() {
        let config = EventCenterConfig::from_toml_str(
            r#"
            first_handler_id = 100
            warn_on_unhandled = true
            quiet_events = ["tick", "heartbeat"]
            "#,
        )
        .unwrap();

        assert_eq!(config.first_handler_id, 100);
        assert!(config.warn_on_unhandled);
        assert!(config.is_quiet("tick"));
        assert!(!config.is_quiet("ping"));
    }

    #[test]
    fn test_toml_parse_error() {
        let result = EventCenterConfig::from_toml_str("first_handler_id = \"one\"");
        assert!(matches!(result, Err(EventCenterError::ConfigParse(_))));
    }

    #[test]
    fn test_validation_rejects_wrapping_counter() {
        let config = EventCenterConfig {
            first_handler_id: u64::MAX,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(EventCenterError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_validation_rejects_empty_quiet_name() {
        let config = EventCenterConfig {
            quiet_events: vec![String::new()],
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
