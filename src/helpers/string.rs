//! String helpers: `$upper`, `$lower`, `$trim`, `$join`, `$split`
//!
//! Non-string input is rendered to its string form first, so these compose
//! with the other families without type errors.

use super::arg;
use crate::error::EngineError;
use crate::registry::{HelperFn, HelperRegistry};
use crate::value::Value;

pub fn register(registry: &mut HelperRegistry) -> Result<(), EngineError> {
    registry.register("$upper", HelperFn::Pure(upper))?;
    registry.register("$lower", HelperFn::Pure(lower))?;
    registry.register("$trim", HelperFn::Pure(trim))?;
    registry.register("$join", HelperFn::Pure(join))?;
    registry.register("$split", HelperFn::Pure(split))?;
    Ok(())
}

fn upper(args: &[Value]) -> Value {
    Value::String(arg(args, 0).render().to_uppercase())
}

fn lower(args: &[Value]) -> Value {
    Value::String(arg(args, 0).render().to_lowercase())
}

fn trim(args: &[Value]) -> Value {
    Value::String(arg(args, 0).render().trim().to_string())
}

/// Join a sequence's rendered elements with a separator (default ",").
/// Non-sequence input joins to "".
fn join(args: &[Value]) -> Value {
    let Value::Sequence(items) = arg(args, 0) else {
        return Value::String(String::new());
    };
    let separator = match arg(args, 1) {
        Value::Undefined => ",".to_string(),
        other => other.render(),
    };
    let parts: Vec<String> = items.iter().map(Value::render).collect();
    Value::String(parts.join(&separator))
}

/// Split a string on a separator; an empty separator splits into characters
fn split(args: &[Value]) -> Value {
    let input = arg(args, 0).render();
    let separator = arg(args, 1).render();
    let parts: Vec<Value> = if separator.is_empty() {
        input.chars().map(|c| Value::String(c.to_string())).collect()
    } else {
        input
            .split(separator.as_str())
            .map(|part| Value::String(part.to_string()))
            .collect()
    };
    Value::Sequence(parts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn v(raw: serde_json::Value) -> Value {
        Value::from(raw)
    }

    #[test]
    fn test_case_helpers() {
        assert_eq!(upper(&[v(json!("hello"))]), v(json!("HELLO")));
        assert_eq!(lower(&[v(json!("HeLLo"))]), v(json!("hello")));
        // non-strings render first
        assert_eq!(upper(&[v(json!(true))]), v(json!("TRUE")));
        assert_eq!(lower(&[Value::Undefined]), v(json!("")));
    }

    #[test]
    fn test_trim() {
        assert_eq!(trim(&[v(json!("  padded \n"))]), v(json!("padded")));
    }

    #[test]
    fn test_join() {
        assert_eq!(join(&[v(json!(["a", "b", "c"]))]), v(json!("a,b,c")));
        assert_eq!(
            join(&[v(json!([1, 2, 3])), v(json!(" - "))]),
            v(json!("1 - 2 - 3"))
        );
        assert_eq!(join(&[v(json!("not a seq"))]), v(json!("")));
    }

    #[test]
    fn test_split() {
        assert_eq!(
            split(&[v(json!("a,b,c")), v(json!(","))]),
            v(json!(["a", "b", "c"]))
        );
        assert_eq!(split(&[v(json!("abc")), v(json!(""))]), v(json!(["a", "b", "c"])));
    }
}
