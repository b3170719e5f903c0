// SPDX-License-Identifier: MIT

//! Per-evaluation view of upstream node data
//!
//! The execution engine assembles a [`ContextSnapshot`] from the recorded
//! outputs of already-executed nodes before resolving a node's configuration,
//! and discards it afterwards. The snapshot is read-only for the whole
//! evaluation; every accessor is total and degrades to absence instead of
//! failing.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value as JsonValue;

use crate::error::EngineError;
use crate::value::Value;

/// Recorded data for one upstream node
#[derive(Debug, Clone)]
pub struct NodeRecord {
    /// The node's output as captured by the execution engine
    pub output: Value,
    /// Node metadata (name, type, timing, ...), always a Mapping
    pub metadata: Value,
}

/// Immutable per-evaluation table of upstream node records, keyed by node name
#[derive(Debug, Clone, Default)]
pub struct ContextSnapshot {
    nodes: HashMap<String, NodeRecord>,
}

/// Wire shape accepted by [`ContextSnapshot::from_json`]:
/// `{ "<node name>": { "output": ..., "metadata": { ... } } }`
#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(default)]
    output: JsonValue,
    #[serde(default)]
    metadata: JsonValue,
}

impl ContextSnapshot {
    /// Create a snapshot with no node records
    pub fn empty() -> Self {
        Self::default()
    }

    /// Record one node's output and metadata. Called while the snapshot is
    /// being assembled, before it is handed to the evaluator.
    pub fn record(&mut self, name: impl Into<String>, output: Value, metadata: Value) {
        self.nodes.insert(name.into(), NodeRecord { output, metadata });
    }

    /// Build a snapshot from the collaborator wire shape
    pub fn from_json(raw: JsonValue) -> Result<Self, EngineError> {
        let records: HashMap<String, RawRecord> = serde_json::from_value(raw)?;
        let mut snapshot = Self::empty();
        for (name, record) in records {
            let metadata = match record.metadata {
                JsonValue::Null => Value::Mapping(Vec::new()),
                other => Value::from(other),
            };
            snapshot.record(name, Value::from(record.output), metadata);
        }
        Ok(snapshot)
    }

    /// A node's recorded output, if the node exists
    pub fn output(&self, node: &str) -> Option<&Value> {
        self.nodes.get(node).map(|record| &record.output)
    }

    /// A node's metadata mapping, if the node exists
    pub fn metadata(&self, node: &str) -> Option<&Value> {
        self.nodes.get(node).map(|record| &record.metadata)
    }

    /// Names of all recorded nodes
    pub fn node_names(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(String::as_str)
    }

    /// `$json` semantics: the node's whole output, or the value at a dotted
    /// path inside it. `Undefined` for a missing node, a missing key or
    /// index, or a path step through a non-container.
    pub fn json_path(&self, node: &str, path: Option<&str>) -> Value {
        let Some(output) = self.output(node) else {
            return Value::Undefined;
        };
        match path {
            None => output.clone(),
            Some(path) => output.get_path(path).cloned().unwrap_or(Value::Undefined),
        }
    }

    /// `$node` semantics: the node's whole metadata mapping, or a single
    /// property of it. Property lookup is single-level, not a dotted path.
    pub fn node_property(&self, node: &str, property: Option<&str>) -> Value {
        let Some(metadata) = self.metadata(node) else {
            return Value::Undefined;
        };
        match property {
            None => metadata.clone(),
            Some(property) => metadata
                .get_key(property)
                .cloned()
                .unwrap_or(Value::Undefined),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn snapshot_with(pairs: Vec<(&str, JsonValue)>) -> ContextSnapshot {
        let mut snapshot = ContextSnapshot::empty();
        for (name, output) in pairs {
            snapshot.record(name, Value::from(output), Value::Mapping(Vec::new()));
        }
        snapshot
    }

    #[test]
    fn test_json_path_whole_output() {
        let snapshot = snapshot_with(vec![("Set", json!({"a": 1}))]);
        assert_eq!(
            snapshot.json_path("Set", None),
            Value::from(json!({"a": 1}))
        );
    }

    #[test]
    fn test_json_path_nested() {
        let snapshot = snapshot_with(vec![(
            "HTTP Request",
            json!({"data": {"users": [{"email": "a@b.com"}]}}),
        )]);
        assert_eq!(
            snapshot.json_path("HTTP Request", Some("data.users.0.email")),
            Value::from(json!("a@b.com"))
        );
    }

    #[test]
    fn test_missing_node_degrades_to_undefined() {
        let snapshot = ContextSnapshot::empty();
        assert_eq!(snapshot.json_path("Nope", None), Value::Undefined);
        assert_eq!(snapshot.json_path("Nope", Some("a.b")), Value::Undefined);
        assert_eq!(snapshot.node_property("Nope", None), Value::Undefined);
    }

    #[test]
    fn test_missing_path_degrades_to_undefined() {
        let snapshot = snapshot_with(vec![("Set", json!({"a": 1}))]);
        assert_eq!(snapshot.json_path("Set", Some("a.b.c")), Value::Undefined);
        assert_eq!(snapshot.json_path("Set", Some("missing")), Value::Undefined);
    }

    #[test]
    fn test_node_property() {
        let mut snapshot = ContextSnapshot::empty();
        snapshot.record(
            "Webhook",
            Value::Null,
            Value::from(json!({"type": "trigger", "runs": 3})),
        );
        assert_eq!(
            snapshot.node_property("Webhook", Some("type")),
            Value::from(json!("trigger"))
        );
        assert_eq!(
            snapshot.node_property("Webhook", None),
            Value::from(json!({"type": "trigger", "runs": 3}))
        );
        assert_eq!(
            snapshot.node_property("Webhook", Some("missing")),
            Value::Undefined
        );
    }

    #[test]
    fn test_from_json_wire_shape() {
        let snapshot = ContextSnapshot::from_json(json!({
            "HTTP Request": {
                "output": {"status": 200},
                "metadata": {"type": "http"}
            },
            "Set": {
                "output": [1, 2, 3]
            }
        }))
        .unwrap();

        assert_eq!(
            snapshot.json_path("HTTP Request", Some("status")),
            Value::Number(200.0)
        );
        assert_eq!(
            snapshot.node_property("HTTP Request", Some("type")),
            Value::from(json!("http"))
        );
        // metadata omitted on the wire becomes an empty mapping
        assert_eq!(
            snapshot.node_property("Set", None),
            Value::Mapping(Vec::new())
        );
        assert_eq!(snapshot.node_property("Set", Some("x")), Value::Undefined);
    }

    #[test]
    fn test_from_json_rejects_non_object() {
        assert!(ContextSnapshot::from_json(json!([1, 2])).is_err());
    }
}
