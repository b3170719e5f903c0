// SPDX-License-Identifier: MIT

//! Closed value union shared by all helpers and the template evaluator
//!
//! Every helper takes and returns this type only; no helper may reach for a
//! richer host type. `Undefined` is the dedicated resolution-gap value
//! produced when a node, key, or index is absent. `Null` is data that is
//! explicitly null.

use std::cmp::Ordering;

use serde_json::Value as JsonValue;

/// A runtime value inside a template evaluation
#[derive(Debug, Clone)]
pub enum Value {
    /// Resolution gap: requested data was absent
    Undefined,
    /// Explicit null in node data
    Null,
    Bool(bool),
    /// IEEE-754 double, same as the JSON number model
    Number(f64),
    String(String),
    /// Ordered, duplicates allowed
    Sequence(Vec<Value>),
    /// Unique keys, insertion order preserved for iteration
    Mapping(Vec<(String, Value)>),
}

impl Value {
    /// Truthiness used by `$if`, `$and`/`$or`/`$not`, and `$default`.
    ///
    /// 0 and NaN are false, "" is false, empty collections are false,
    /// `Null`/`Undefined` are false. Everything else is true.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Undefined | Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::String(s) => !s.is_empty(),
            Value::Sequence(items) => !items.is_empty(),
            Value::Mapping(entries) => !entries.is_empty(),
        }
    }

    /// Numeric coercion used by the ordering comparators and `$slice`.
    ///
    /// Numbers pass through, strings parse or become NaN, every other kind
    /// is NaN so that non-numeric operands compare false uniformly.
    pub fn as_number(&self) -> f64 {
        match self {
            Value::Number(n) => *n,
            Value::String(s) => s.trim().parse::<f64>().unwrap_or(f64::NAN),
            _ => f64::NAN,
        }
    }

    /// String form used when a value is spliced into surrounding literal
    /// text. `Undefined` renders as the empty string; collections render as
    /// compact JSON.
    pub fn render(&self) -> String {
        match self {
            Value::Undefined => String::new(),
            Value::Null => "null".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => render_number(*n),
            Value::String(s) => s.clone(),
            Value::Sequence(_) | Value::Mapping(_) => {
                serde_json::to_string(&self.to_json()).unwrap_or_default()
            }
        }
    }

    /// Short kind name, used in trace output
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Sequence(_) => "sequence",
            Value::Mapping(_) => "mapping",
        }
    }

    fn kind_rank(&self) -> u8 {
        match self {
            Value::Undefined => 0,
            Value::Null => 1,
            Value::Bool(_) => 2,
            Value::Number(_) => 3,
            Value::String(_) => 4,
            Value::Sequence(_) => 5,
            Value::Mapping(_) => 6,
        }
    }

    /// Look up a single mapping key. `None` for non-mappings and absent keys.
    pub fn get_key(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Mapping(entries) => entries.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    /// Walk a dotted path through nested mappings and sequences, e.g.
    /// `data.users.0.email`. Numeric parts index into sequences. The walk
    /// stops with `None` at any non-container.
    ///
    /// Keys containing a literal `.` cannot be addressed; there is no escape
    /// syntax. This is a known limitation of the path language.
    pub fn get_path(&self, path: &str) -> Option<&Value> {
        let mut current = self;
        for part in path.split('.') {
            current = match current {
                Value::Mapping(entries) => {
                    entries.iter().find(|(k, _)| k == part).map(|(_, v)| v)?
                }
                Value::Sequence(items) => part.parse::<usize>().ok().and_then(|i| items.get(i))?,
                _ => return None,
            };
        }
        Some(current)
    }

    /// Total order used by `$sort` without a key: rank by kind, then natural
    /// order within the kind. NaN sorts after other numbers. Sequences and
    /// mappings compare equal within their kind; the stable sort keeps their
    /// input order.
    pub fn default_order(&self, other: &Value) -> Ordering {
        let ranks = (self.kind_rank(), other.kind_rank());
        if ranks.0 != ranks.1 {
            return ranks.0.cmp(&ranks.1);
        }
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            (Value::Number(a), Value::Number(b)) => {
                a.partial_cmp(b).unwrap_or_else(|| match (a.is_nan(), b.is_nan()) {
                    (true, false) => Ordering::Greater,
                    (false, true) => Ordering::Less,
                    _ => Ordering::Equal,
                })
            }
            (Value::String(a), Value::String(b)) => a.cmp(b),
            _ => Ordering::Equal,
        }
    }

    /// Convert back to JSON. `Undefined` serializes as null.
    pub fn to_json(&self) -> JsonValue {
        match self {
            Value::Undefined | Value::Null => JsonValue::Null,
            Value::Bool(b) => JsonValue::Bool(*b),
            Value::Number(n) if n.is_finite() && n.fract() == 0.0 && n.abs() < 9.0e15 => {
                JsonValue::Number(serde_json::Number::from(*n as i64))
            }
            Value::Number(n) => serde_json::Number::from_f64(*n)
                .map(JsonValue::Number)
                .unwrap_or(JsonValue::Null),
            Value::String(s) => JsonValue::String(s.clone()),
            Value::Sequence(items) => JsonValue::Array(items.iter().map(Value::to_json).collect()),
            Value::Mapping(entries) => JsonValue::Object(
                entries.iter().map(|(k, v)| (k.clone(), v.to_json())).collect(),
            ),
        }
    }
}

fn render_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 9.0e15 {
        return (n as i64).to_string();
    }
    n.to_string()
}

/// Strict equality: same kind and same content, no cross-kind coercion.
/// Mapping equality ignores insertion order; NaN is never equal to anything.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) => true,
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Sequence(a), Value::Sequence(b)) => a == b,
            (Value::Mapping(a), Value::Mapping(b)) => {
                a.len() == b.len()
                    && a.iter().all(|(key, value)| {
                        b.iter().any(|(other_key, other_value)| {
                            key == other_key && value == other_value
                        })
                    })
            }
            _ => false,
        }
    }
}

impl From<JsonValue> for Value {
    fn from(value: JsonValue) -> Self {
        match value {
            JsonValue::Null => Value::Null,
            JsonValue::Bool(b) => Value::Bool(b),
            JsonValue::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            JsonValue::String(s) => Value::String(s),
            JsonValue::Array(items) => {
                Value::Sequence(items.into_iter().map(Value::from).collect())
            }
            JsonValue::Object(entries) => Value::Mapping(
                entries.into_iter().map(|(k, v)| (k, Value::from(v))).collect(),
            ),
        }
    }
}
