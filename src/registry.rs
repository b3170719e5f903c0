// SPDX-License-Identifier: MIT

//! Helper registry
//!
//! Built once at startup and read-only afterwards. Each helper family module
//! contributes its helpers exactly once through [`HelperRegistry::register`];
//! a name collision is a configuration error surfaced at build time, never at
//! evaluation time.

use std::collections::HashMap;

use crate::context::ContextSnapshot;
use crate::error::EngineError;
use crate::helpers;
use crate::value::Value;

/// A pure helper: arguments in, value out, nothing else
pub type PureFn = fn(&[Value]) -> Value;

/// A context-aware helper (`$json`, `$node`): the snapshot is threaded in
/// explicitly rather than held as ambient state
pub type ContextualFn = fn(&ContextSnapshot, &[Value]) -> Value;

/// A registered helper function
#[derive(Debug, Clone, Copy)]
pub enum HelperFn {
    Pure(PureFn),
    Contextual(ContextualFn),
}

impl HelperFn {
    /// Invoke the helper with already-evaluated arguments
    pub fn call(&self, snapshot: &ContextSnapshot, args: &[Value]) -> Value {
        match self {
            HelperFn::Pure(f) => f(args),
            HelperFn::Contextual(f) => f(snapshot, args),
        }
    }
}

/// Name-keyed table of helpers available to template expressions
#[derive(Debug, Clone, Default)]
pub struct HelperRegistry {
    helpers: HashMap<String, HelperFn>,
}

impl HelperRegistry {
    /// Create a registry with no helpers
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a registry populated with every built-in family
    pub fn with_builtins() -> Result<Self, EngineError> {
        let mut registry = Self::empty();
        helpers::array::register(&mut registry)?;
        helpers::data::register(&mut registry)?;
        helpers::logic::register(&mut registry)?;
        helpers::string::register(&mut registry)?;
        helpers::node::register(&mut registry)?;
        Ok(registry)
    }

    /// Register a helper under a unique name (convention: `$`-prefixed).
    /// Registering the same name twice is a configuration error.
    pub fn register(&mut self, name: &str, helper: HelperFn) -> Result<(), EngineError> {
        if self.helpers.contains_key(name) {
            return Err(EngineError::duplicate_helper(name));
        }
        self.helpers.insert(name.to_string(), helper);
        Ok(())
    }

    /// Look up a helper by name
    pub fn get(&self, name: &str) -> Option<&HelperFn> {
        self.helpers.get(name)
    }

    /// Number of registered helpers
    pub fn len(&self) -> usize {
        self.helpers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.helpers.is_empty()
    }

    /// Sorted helper names, for diagnostics and the CLI listing
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.helpers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn echo(args: &[Value]) -> Value {
        args.first().cloned().unwrap_or(Value::Undefined)
    }

    #[test]
    fn test_register_and_get() {
        let mut registry = HelperRegistry::empty();
        registry.register("$echo", HelperFn::Pure(echo)).unwrap();

        let helper = registry.get("$echo").unwrap();
        let snapshot = ContextSnapshot::empty();
        assert_eq!(
            helper.call(&snapshot, &[Value::from(json!("hi"))]),
            Value::from(json!("hi"))
        );
    }

    #[test]
    fn test_duplicate_name_is_a_build_time_error() {
        let mut registry = HelperRegistry::empty();
        registry.register("$echo", HelperFn::Pure(echo)).unwrap();

        let err = registry.register("$echo", HelperFn::Pure(echo)).unwrap_err();
        assert!(matches!(err, EngineError::DuplicateHelper { name } if name == "$echo"));
    }

    #[test]
    fn test_duplicate_of_builtin_is_rejected() {
        let mut registry = HelperRegistry::with_builtins().unwrap();
        let err = registry.register("$filter", HelperFn::Pure(echo)).unwrap_err();
        assert!(matches!(err, EngineError::DuplicateHelper { .. }));
    }

    #[test]
    fn test_builtins_present() {
        let registry = HelperRegistry::with_builtins().unwrap();
        for name in [
            "$filter", "$find", "$pluck", "$unique", "$sort", "$reverse", "$slice", "$concat",
            "$flatten", "$first", "$last", "$get", "$keys", "$values", "$length", "$if", "$and",
            "$or", "$not", "$eq", "$ne", "$gt", "$gte", "$lt", "$lte", "$isEmpty", "$isNotEmpty",
            "$isDefined", "$default", "$upper", "$lower", "$trim", "$join", "$split", "$json",
            "$node",
        ] {
            assert!(registry.get(name).is_some(), "missing builtin {name}");
        }
    }

    #[test]
    fn test_names_sorted() {
        let registry = HelperRegistry::with_builtins().unwrap();
        let names = registry.names();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
        assert_eq!(names.len(), registry.len());
    }

    #[test]
    fn test_unknown_name() {
        let registry = HelperRegistry::with_builtins().unwrap();
        assert!(registry.get("$nope").is_none());
    }
}
