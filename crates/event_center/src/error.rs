//! Error types for the event center

/// Main error type for the event center crate
#[derive(Debug, thiserror::Error)]
pub enum EventCenterError {
    /// Configuration failed validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration text could not be parsed
    #[error("Configuration parse error: {0}")]
    ConfigParse(String),

    /// Event dispatch error
    #[error("Event error: {0}")]
    EventError(#[from] EventError),
}

/// Errors that can occur while dispatching an event
#[derive(Debug, thiserror::Error)]
pub enum EventError {
    /// A handler reported a failure; the dispatch round was aborted
    #[error("Handler execution failed: {0}")]
    HandlerExecutionFailed(String),

    /// Payload could not be turned into a structural copy
    #[error("Event serialization failed: {0}")]
    SerializationFailed(String),

    /// Delivered data did not match the requested type
    #[error("Event deserialization failed: {0}")]
    DeserializationFailed(String),
}

impl From<serde_json::Error> for EventError {
    fn from(err: serde_json::Error) -> Self {
        EventError::SerializationFailed(err.to_string())
    }
}

impl From<toml::de::Error> for EventCenterError {
    fn from(err: toml::de::Error) -> Self {
        EventCenterError::ConfigParse(err.to_string())
    }
}
