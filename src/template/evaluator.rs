//! Template evaluator
//!
//! Evaluates parsed templates against a context snapshot, one expression at a
//! time, left to right, with no dependency between segments. A template that
//! is exactly one expression yields that expression's value unchanged; any
//! mix of literal text and expressions yields a string with rendered results
//! spliced in. Resolution gaps never abort an evaluation.

use tracing::trace;

use super::ast::{Expr, Segment, Template};
use super::parser;
use crate::context::ContextSnapshot;
use crate::error::EngineError;
use crate::registry::HelperRegistry;
use crate::value::Value;

/// Evaluates templates using an immutable helper registry
pub struct Evaluator {
    registry: HelperRegistry,
}

impl Evaluator {
    /// Create an evaluator with all built-in helpers
    pub fn new() -> Result<Self, EngineError> {
        Ok(Self {
            registry: HelperRegistry::with_builtins()?,
        })
    }

    /// Create an evaluator over a custom registry
    pub fn with_registry(registry: HelperRegistry) -> Self {
        Self { registry }
    }

    /// The registry this evaluator dispatches helpers through
    pub fn registry(&self) -> &HelperRegistry {
        &self.registry
    }

    /// Parse and evaluate a template string into a resolved value
    pub fn evaluate(
        &self,
        template: &str,
        snapshot: &ContextSnapshot,
    ) -> Result<Value, EngineError> {
        let template = parser::parse(template)?;
        self.evaluate_template(&template, snapshot)
    }

    /// Parse and evaluate a template string into its string rendering
    pub fn render(&self, template: &str, snapshot: &ContextSnapshot) -> Result<String, EngineError> {
        Ok(self.evaluate(template, snapshot)?.render())
    }

    /// Evaluate an already-parsed template
    pub fn evaluate_template(
        &self,
        template: &Template,
        snapshot: &ContextSnapshot,
    ) -> Result<Value, EngineError> {
        // a lone expression keeps its value kind instead of being stringified
        if let [Segment::Expr(expr)] = template.segments.as_slice() {
            return self.eval_expr(expr, snapshot);
        }

        let mut out = String::new();
        for segment in &template.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Expr(expr) => {
                    let value = self.eval_expr(expr, snapshot)?;
                    out.push_str(&value.render());
                }
            }
        }
        Ok(Value::String(out))
    }

    fn eval_expr(&self, expr: &Expr, snapshot: &ContextSnapshot) -> Result<Value, EngineError> {
        match expr {
            Expr::Literal(value) => Ok(value.clone()),
            Expr::Path(path) => Ok(resolve_bare_path(snapshot, path)),
            Expr::Call { name, args } => {
                let helper = self
                    .registry
                    .get(name)
                    .ok_or_else(|| EngineError::unknown_helper(name))?;
                let mut values = Vec::with_capacity(args.len());
                for arg in args {
                    values.push(self.eval_expr(arg, snapshot)?);
                }
                let result = helper.call(snapshot, &values);
                trace!(helper = %name, result_kind = result.kind(), "helper evaluated");
                Ok(result)
            }
        }
    }
}

/// A bare path's first dotted segment names a node; the rest walks its
/// output. `items` is shorthand for `$json "items"`.
fn resolve_bare_path(snapshot: &ContextSnapshot, path: &str) -> Value {
    match path.split_once('.') {
        None => snapshot.json_path(path, None),
        Some((node, rest)) => snapshot.json_path(node, Some(rest)),
    }
}
