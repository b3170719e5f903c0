//! Data access helpers: `$first`, `$last`, `$get`, `$keys`, `$values`,
//! `$length`

use super::arg;
use crate::error::EngineError;
use crate::registry::{HelperFn, HelperRegistry};
use crate::value::Value;

pub fn register(registry: &mut HelperRegistry) -> Result<(), EngineError> {
    registry.register("$first", HelperFn::Pure(first))?;
    registry.register("$last", HelperFn::Pure(last))?;
    registry.register("$get", HelperFn::Pure(get))?;
    registry.register("$keys", HelperFn::Pure(keys))?;
    registry.register("$values", HelperFn::Pure(values))?;
    registry.register("$length", HelperFn::Pure(length))?;
    Ok(())
}

fn first(args: &[Value]) -> Value {
    match arg(args, 0) {
        Value::Sequence(items) => items.first().cloned().unwrap_or(Value::Undefined),
        _ => Value::Undefined,
    }
}

fn last(args: &[Value]) -> Value {
    match arg(args, 0) {
        Value::Sequence(items) => items.last().cloned().unwrap_or(Value::Undefined),
        _ => Value::Undefined,
    }
}

/// `mapping[key]` if present and not `Undefined`, else the default (which is
/// itself `Undefined` when not given). Non-mapping input yields the default
/// immediately instead of failing.
fn get(args: &[Value]) -> Value {
    let mapping = arg(args, 0);
    let default = arg(args, 2);
    if !matches!(mapping, Value::Mapping(_)) {
        return default.clone();
    }
    let key = arg(args, 1).render();
    match mapping.get_key(&key) {
        Some(Value::Undefined) | None => default.clone(),
        Some(value) => value.clone(),
    }
}

fn keys(args: &[Value]) -> Value {
    match arg(args, 0) {
        Value::Mapping(entries) => Value::Sequence(
            entries.iter().map(|(k, _)| Value::String(k.clone())).collect(),
        ),
        _ => Value::Sequence(Vec::new()),
    }
}

fn values(args: &[Value]) -> Value {
    match arg(args, 0) {
        Value::Mapping(entries) => {
            Value::Sequence(entries.iter().map(|(_, v)| v.clone()).collect())
        }
        _ => Value::Sequence(Vec::new()),
    }
}

/// Element count for sequences, character count for strings, 0 for anything
/// else. Length is deliberately not defined over mappings.
fn length(args: &[Value]) -> Value {
    let n = match arg(args, 0) {
        Value::Sequence(items) => items.len(),
        Value::String(s) => s.chars().count(),
        _ => 0,
    };
    Value::Number(n as f64)
}
