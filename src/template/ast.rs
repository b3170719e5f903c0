// SPDX-License-Identifier: MIT

//! Parsed form of a configuration template

use crate::value::Value;

/// A single expression inside `{{ }}` delimiters
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Quoted string, number, boolean, or null written directly in the template
    Literal(Value),
    /// Bare context path: the first dotted segment names a node, the rest
    /// walks that node's output
    Path(String),
    /// Helper invocation: `$name arg1 arg2 ...`
    Call { name: String, args: Vec<Expr> },
}

/// One segment of a template: literal text or an expression
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    Literal(String),
    Expr(Expr),
}

/// An ordered sequence of literal and expression segments
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    pub segments: Vec<Segment>,
}

impl Template {
    /// Whether the template contains any expression at all
    pub fn has_expressions(&self) -> bool {
        self.segments.iter().any(|s| matches!(s, Segment::Expr(_)))
    }
}
