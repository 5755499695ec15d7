//! Opaque transaction payloads.
//!
//! A payload is an order-independent JSON object carrying the
//! application-level update (for example zone-access grants and
//! revocations). The consensus core never interprets payload semantics;
//! the helpers here only exist so callers and tests can build the common
//! access-edit shapes.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Application payload carried by a [`Transaction`](super::Transaction).
///
/// The backing map keeps its keys in sorted order, so serializing two
/// equal payloads always yields identical JSON text. That text is the
/// canonical payload form used for signing and hashing.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Payload(pub Map<String, Value>);

impl Payload {
    /// Creates an empty payload.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps a JSON value; anything other than an object is rejected.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Payload(map)),
            _ => None,
        }
    }

    /// Canonical JSON text of this payload.
    ///
    /// # Panics
    ///
    /// Panics if encoding fails, which is a programming error: a JSON
    /// object is always serializable.
    pub fn canonical_json(&self) -> String {
        serde_json::to_string(&self.0).expect("JSON object should always be serializable")
    }

    /// Builds the `{"add": [{"uuid": …, "zone": […]}]}` grant payload.
    pub fn grant(uuid: &str, zones: &[&str]) -> Self {
        Self::access_edit("add", uuid, zones)
    }

    /// Builds the `{"remove": [{"uuid": …, "zone": […]}]}` revocation payload.
    pub fn revoke(uuid: &str, zones: &[&str]) -> Self {
        Self::access_edit("remove", uuid, zones)
    }

    fn access_edit(op: &str, uuid: &str, zones: &[&str]) -> Self {
        let mut entry = Map::new();
        entry.insert("uuid".to_string(), Value::String(uuid.to_string()));
        entry.insert(
            "zone".to_string(),
            Value::Array(zones.iter().map(|z| Value::String((*z).to_string())).collect()),
        );

        let mut map = Map::new();
        map.insert(op.to_string(), Value::Array(vec![Value::Object(entry)]));
        Payload(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_json_is_key_order_independent() {
        let mut first = Map::new();
        first.insert("b".to_string(), Value::from(2));
        first.insert("a".to_string(), Value::from(1));

        let mut second = Map::new();
        second.insert("a".to_string(), Value::from(1));
        second.insert("b".to_string(), Value::from(2));

        assert_eq!(
            Payload(first).canonical_json(),
            Payload(second).canonical_json()
        );
    }

    #[test]
    fn grant_payload_has_expected_shape() {
        let payload = Payload::grant("u1", &["door1", "door2"]);
        let text = payload.canonical_json();
        assert_eq!(
            text,
            r#"{"add":[{"uuid":"u1","zone":["door1","door2"]}]}"#
        );
    }

    #[test]
    fn from_value_rejects_non_objects() {
        assert!(Payload::from_value(Value::from(42)).is_none());
        assert!(Payload::from_value(Value::Array(vec![])).is_none());
        assert!(Payload::from_value(serde_json::json!({"remove": []})).is_some());
    }
}
