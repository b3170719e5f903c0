//! Context-aware accessors: `$json` and `$node`
//!
//! The only helpers that see the context snapshot, and they receive it as an
//! explicit parameter threaded through the evaluator. Both are total: any
//! missing node, key, or index degrades to `Undefined`.

use super::arg;
use crate::context::ContextSnapshot;
use crate::error::EngineError;
use crate::registry::{HelperFn, HelperRegistry};
use crate::value::Value;

pub fn register(registry: &mut HelperRegistry) -> Result<(), EngineError> {
    registry.register("$json", HelperFn::Contextual(json_accessor))?;
    registry.register("$node", HelperFn::Contextual(node_accessor))?;
    Ok(())
}

/// `$json(nodeName, path?)` — the named node's output, optionally narrowed by
/// a dotted path
fn json_accessor(snapshot: &ContextSnapshot, args: &[Value]) -> Value {
    let node = match arg(args, 0) {
        Value::Undefined => return Value::Undefined,
        name => name.render(),
    };
    let path = match arg(args, 1) {
        Value::Undefined => None,
        selector => Some(selector.render()),
    };
    snapshot.json_path(&node, path.as_deref())
}

/// `$node(nodeName, property?)` — the named node's metadata, optionally a
/// single property of it
fn node_accessor(snapshot: &ContextSnapshot, args: &[Value]) -> Value {
    let node = match arg(args, 0) {
        Value::Undefined => return Value::Undefined,
        name => name.render(),
    };
    let property = match arg(args, 1) {
        Value::Undefined => None,
        selector => Some(selector.render()),
    };
    snapshot.node_property(&node, property.as_deref())
}
