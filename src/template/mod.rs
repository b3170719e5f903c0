// SPDX-License-Identifier: MIT

//! Template parsing and evaluation
//!
//! A template is a configuration string mixing literal text with
//! `{{ expression }}` segments:
//! - `Hello {{ $json "User" "name" }}`
//! - `{{ $filter items 'status' 'active' }}`
//! - `{{ $default ($json "Set" "retries") 3 }}`

mod ast;
mod evaluator;
mod parser;

pub use ast::{Expr, Segment, Template};
pub use evaluator::Evaluator;
pub use parser::parse;
