// SPDX-License-Identifier: MIT

//! Built-in helper families
//!
//! Each module registers one family of pure helpers over [`crate::Value`];
//! only `node` holds the context-aware `$json`/`$node` accessors. Helpers
//! never mutate their arguments and never fail: bad or missing input degrades
//! to `Undefined` or an empty collection.

pub mod array;
pub mod data;
pub mod logic;
pub mod node;
pub mod string;

use crate::value::Value;

/// Positional argument access with the permissive-degradation policy:
/// a missing argument reads as `Undefined`.
pub(crate) fn arg(args: &[Value], index: usize) -> &Value {
    args.get(index).unwrap_or(&Value::Undefined)
}
