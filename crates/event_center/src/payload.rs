//! Payload cloning and the parameter object delivered to handlers

use crate::error::EventError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Produce a structural copy of `value` with JSON semantics.
///
/// The value is serialized into a [`Value`] tree that shares nothing with the
/// original. Unit and `None` become `null`, and so do non-finite floats. Maps
/// whose keys cannot be written as JSON strings fail with
/// [`EventError::SerializationFailed`].
pub fn deep_copy<T: Serialize + ?Sized>(value: &T) -> Result<Value, EventError> {
    serde_json::to_value(value).map_err(EventError::from)
}

/// Parameter object passed to every handler.
///
/// Each handler receives its own copy, so mutating it never affects the
/// emitter's payload or what other handlers see.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventParam {
    /// Structural copy of the emitted payload
    pub data: Value,
}

impl EventParam {
    /// Wrap an already-copied value
    pub fn new(data: Value) -> Self {
        Self { data }
    }

    /// Borrow the delivered data
    pub fn data(&self) -> &Value {
        &self.data
    }

    /// Take ownership of the delivered data
    pub fn into_data(self) -> Value {
        self.data
    }

    /// Deserialize the delivered data into a concrete type
    pub fn deserialize<T: for<'de> Deserialize<'de>>(&self) -> Result<T, EventError> {
        T::deserialize(&self.data).map_err(|e| EventError::DeserializationFailed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::BTreeMap;

    #[test]
    fn test_deep_copy_normalizes_absent_values_to_null() {
        assert_eq!(deep_copy(&()).unwrap(), Value::Null);
        assert_eq!(deep_copy(&None::<u32>).unwrap(), Value::Null);
        assert_eq!(deep_copy(&f64::NAN).unwrap(), Value::Null);
    }

    #[test]
    fn test_deep_copy_is_independent() {
        let original = json!({ "n": 1, "tags": ["a", "b"] });
        let mut copy = deep_copy(&original).unwrap();
        copy["tags"][0] = json!("changed");

        assert_eq!(original["tags"][0], "a");
        assert_eq!(copy["n"], 1);
    }

    #[test]
    fn test_deep_copy_rejects_non_string_keys() {
        let mut map = BTreeMap::new();
        map.insert((1, 2), "pair");

        let err = deep_copy(&map).unwrap_err();
        assert!(matches!(err, EventError::SerializationFailed(_)));
    }

    #[test]
    fn test_event_param_deserialize() {
        #[derive(Deserialize, Debug, PartialEq)]
        struct Ping {
            n: u32,
        }

        let param = EventParam::new(json!({ "n": 7 }));
        assert_eq!(param.deserialize::<Ping>().unwrap(), Ping { n: 7 });

        let bad = EventParam::new(json!("nope"));
        assert!(matches!(
            bad.deserialize::<Ping>(),
            Err(EventError::DeserializationFailed(_))
        ));
    }
}
