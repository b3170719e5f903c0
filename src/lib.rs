// SPDX-License-Identifier: MIT

//! flowexpr — the expression evaluation engine behind workflow node
//! configuration
//!
//! Node configuration fields may embed `{{ ... }}` expressions that are
//! resolved at execution time against the outputs of upstream nodes:
//!
//! ```
//! use flowexpr::{ContextSnapshot, Evaluator, Value};
//! use serde_json::json;
//!
//! let mut snapshot = ContextSnapshot::empty();
//! snapshot.record(
//!     "HTTP Request",
//!     Value::from(json!({"data": {"users": [{"email": "a@b.com"}]}})),
//!     Value::from(json!({"type": "http"})),
//! );
//!
//! let evaluator = Evaluator::new().unwrap();
//! let url = evaluator
//!     .render(
//!         "https://api.example.com/{{ $json \"HTTP Request\" \"data.users.0.email\" }}",
//!         &snapshot,
//!     )
//!     .unwrap();
//! assert_eq!(url, "https://api.example.com/a@b.com");
//! ```
//!
//! The engine is synchronous and side-effect free: helpers are pure functions
//! over the closed [`Value`] union, the snapshot is immutable per evaluation,
//! and missing data degrades to `Value::Undefined` instead of failing.

pub mod context;
pub mod error;
pub mod helpers;
pub mod registry;
pub mod template;
pub mod value;

pub use context::{ContextSnapshot, NodeRecord};
pub use error::EngineError;
pub use registry::{HelperFn, HelperRegistry};
pub use template::{Evaluator, Template};
pub use value::Value;
