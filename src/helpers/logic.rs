//! Logic helpers: `$if`, `$and`, `$or`, `$not`, equality, ordering,
//! emptiness, and fallbacks
//!
//! `$and`/`$or` always return a plain boolean, never one of the operands.
//! `$default` falls back on falsiness (so 0, "" and false trigger it) while
//! `$isDefined` is false only for `Null`/`Undefined`; the asymmetry is
//! intentional.

use super::arg;
use crate::error::EngineError;
use crate::registry::{HelperFn, HelperRegistry};
use crate::value::Value;

pub fn register(registry: &mut HelperRegistry) -> Result<(), EngineError> {
    registry.register("$if", HelperFn::Pure(if_branch))?;
    registry.register("$and", HelperFn::Pure(and))?;
    registry.register("$or", HelperFn::Pure(or))?;
    registry.register("$not", HelperFn::Pure(not))?;
    registry.register("$eq", HelperFn::Pure(eq))?;
    registry.register("$ne", HelperFn::Pure(ne))?;
    registry.register("$gt", HelperFn::Pure(gt))?;
    registry.register("$gte", HelperFn::Pure(gte))?;
    registry.register("$lt", HelperFn::Pure(lt))?;
    registry.register("$lte", HelperFn::Pure(lte))?;
    registry.register("$isEmpty", HelperFn::Pure(is_empty))?;
    registry.register("$isNotEmpty", HelperFn::Pure(is_not_empty))?;
    registry.register("$isDefined", HelperFn::Pure(is_defined))?;
    registry.register("$default", HelperFn::Pure(default_of))?;
    Ok(())
}

fn if_branch(args: &[Value]) -> Value {
    if arg(args, 0).is_truthy() {
        arg(args, 1).clone()
    } else {
        arg(args, 2).clone()
    }
}

fn and(args: &[Value]) -> Value {
    Value::Bool(arg(args, 0).is_truthy() && arg(args, 1).is_truthy())
}

fn or(args: &[Value]) -> Value {
    Value::Bool(arg(args, 0).is_truthy() || arg(args, 1).is_truthy())
}

fn not(args: &[Value]) -> Value {
    Value::Bool(!arg(args, 0).is_truthy())
}

fn eq(args: &[Value]) -> Value {
    Value::Bool(arg(args, 0) == arg(args, 1))
}

fn ne(args: &[Value]) -> Value {
    Value::Bool(arg(args, 0) != arg(args, 1))
}

fn compare_numeric<F>(args: &[Value], cmp: F) -> Value
where
    F: Fn(f64, f64) -> bool,
{
    // NaN operands make every comparison false
    Value::Bool(cmp(arg(args, 0).as_number(), arg(args, 1).as_number()))
}

fn gt(args: &[Value]) -> Value {
    compare_numeric(args, |a, b| a > b)
}

fn gte(args: &[Value]) -> Value {
    compare_numeric(args, |a, b| a >= b)
}

fn lt(args: &[Value]) -> Value {
    compare_numeric(args, |a, b| a < b)
}

fn lte(args: &[Value]) -> Value {
    compare_numeric(args, |a, b| a <= b)
}

fn emptiness(value: &Value) -> bool {
    match value {
        Value::Undefined | Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Sequence(items) => items.is_empty(),
        Value::Mapping(entries) => entries.is_empty(),
        // booleans and numbers are never considered empty
        Value::Bool(_) | Value::Number(_) => false,
    }
}

fn is_empty(args: &[Value]) -> Value {
    Value::Bool(emptiness(arg(args, 0)))
}

fn is_not_empty(args: &[Value]) -> Value {
    Value::Bool(!emptiness(arg(args, 0)))
}

fn is_defined(args: &[Value]) -> Value {
    Value::Bool(!matches!(arg(args, 0), Value::Undefined | Value::Null))
}

fn default_of(args: &[Value]) -> Value {
    let value = arg(args, 0);
    if value.is_truthy() {
        value.clone()
    } else {
        arg(args, 1).clone()
    }
}
