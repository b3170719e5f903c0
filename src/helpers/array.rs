//! Sequence helpers: `$filter`, `$find`, `$pluck`, `$unique`, `$sort`,
//! `$reverse`, `$slice`, `$concat`, `$flatten`
//!
//! All helpers return fresh sequences and never mutate their input. A
//! non-sequence where a sequence is required degrades to an empty sequence
//! (`$find` degrades to `Undefined`).

use super::arg;
use crate::error::EngineError;
use crate::registry::{HelperFn, HelperRegistry};
use crate::value::Value;

pub fn register(registry: &mut HelperRegistry) -> Result<(), EngineError> {
    registry.register("$filter", HelperFn::Pure(filter))?;
    registry.register("$find", HelperFn::Pure(find))?;
    registry.register("$pluck", HelperFn::Pure(pluck))?;
    registry.register("$unique", HelperFn::Pure(unique))?;
    registry.register("$sort", HelperFn::Pure(sort))?;
    registry.register("$reverse", HelperFn::Pure(reverse))?;
    registry.register("$slice", HelperFn::Pure(slice))?;
    registry.register("$concat", HelperFn::Pure(concat))?;
    registry.register("$flatten", HelperFn::Pure(flatten))?;
    Ok(())
}

fn seq_items(value: &Value) -> &[Value] {
    match value {
        Value::Sequence(items) => items,
        _ => &[],
    }
}

/// Keep items whose `key` property strictly equals `value`. Items that are
/// not mappings (or lack the key) are dropped silently.
fn filter(args: &[Value]) -> Value {
    let key = arg(args, 1).render();
    let expected = arg(args, 2);
    Value::Sequence(
        seq_items(arg(args, 0))
            .iter()
            .filter(|item| item.get_key(&key) == Some(expected))
            .cloned()
            .collect(),
    )
}

/// First item whose `key` property strictly equals `value`, or `Undefined`
fn find(args: &[Value]) -> Value {
    let key = arg(args, 1).render();
    let expected = arg(args, 2);
    seq_items(arg(args, 0))
        .iter()
        .find(|item| item.get_key(&key) == Some(expected))
        .cloned()
        .unwrap_or(Value::Undefined)
}

/// Map each item to its `key` property. Length and order are preserved;
/// non-mapping items and absent keys become `Undefined` holes, so this is
/// not a filter.
fn pluck(args: &[Value]) -> Value {
    let key = arg(args, 1).render();
    Value::Sequence(
        seq_items(arg(args, 0))
            .iter()
            .map(|item| item.get_key(&key).cloned().unwrap_or(Value::Undefined))
            .collect(),
    )
}

/// De-duplicate by the value model's structural equality, keeping the first
/// occurrence. Cross-kind values are always distinct (1 and "1" both stay).
fn unique(args: &[Value]) -> Value {
    let mut kept: Vec<Value> = Vec::new();
    for item in seq_items(arg(args, 0)) {
        if !kept.iter().any(|existing| existing == item) {
            kept.push(item.clone());
        }
    }
    Value::Sequence(kept)
}

/// Stable sort. Without a key: the value model's default total order. With a
/// key: lexicographic over the rendered key values, absent keys reading as "".
fn sort(args: &[Value]) -> Value {
    let mut items = seq_items(arg(args, 0)).to_vec();
    match arg(args, 1) {
        Value::Undefined => items.sort_by(|a, b| a.default_order(b)),
        key => {
            let key = key.render();
            items.sort_by_key(|item| item.get_key(&key).map(Value::render).unwrap_or_default());
        }
    }
    Value::Sequence(items)
}

fn reverse(args: &[Value]) -> Value {
    let mut items = seq_items(arg(args, 0)).to_vec();
    items.reverse();
    Value::Sequence(items)
}

/// Sub-sequence from `start` (inclusive) to `end` (exclusive, defaults to the
/// length). Negative indices count from the end; out-of-range indices clamp.
fn slice(args: &[Value]) -> Value {
    let items = seq_items(arg(args, 0));
    let len = items.len() as i64;
    let start = clamp_index(arg(args, 1).as_number(), len);
    let end = match arg(args, 2) {
        Value::Undefined => items.len(),
        other => clamp_index(other.as_number(), len),
    };
    if start >= end {
        return Value::Sequence(Vec::new());
    }
    Value::Sequence(items[start..end].to_vec())
}

fn clamp_index(raw: f64, len: i64) -> usize {
    if raw.is_nan() {
        return 0;
    }
    let index = raw as i64;
    let index = if index < 0 { len + index } else { index };
    index.clamp(0, len) as usize
}

/// Concatenate any number of sequences; non-sequence arguments are dropped
/// silently, not errored.
fn concat(args: &[Value]) -> Value {
    let mut out = Vec::new();
    for value in args {
        if let Value::Sequence(items) = value {
            out.extend(items.iter().cloned());
        }
    }
    Value::Sequence(out)
}

/// Flatten nested sequences `depth` levels (default 1)
fn flatten(args: &[Value]) -> Value {
    let depth = match arg(args, 1) {
        Value::Undefined => 1,
        other => {
            let n = other.as_number();
            if n.is_nan() || n < 0.0 {
                0
            } else {
                n as u32
            }
        }
    };
    Value::Sequence(flatten_into(seq_items(arg(args, 0)), depth))
}

fn flatten_into(items: &[Value], depth: u32) -> Vec<Value> {
    let mut out = Vec::new();
    for item in items {
        match item {
            Value::Sequence(inner) if depth > 0 => out.extend(flatten_into(inner, depth - 1)),
            other => out.push(other.clone()),
        }
    }
    out
}
