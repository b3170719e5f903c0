//! Typed error handling for flowexpr
//!
//! Only configuration mistakes are errors: helper name collisions, templates
//! that cannot be split into segments, unknown helper names. Missing data at
//! evaluation time is never an error; it degrades to `Value::Undefined`.

use thiserror::Error;

/// Top-level error type for the expression engine
#[derive(Debug, Error)]
pub enum EngineError {
    /// Two helpers registered under the same name
    #[error("helper '{name}' is already registered")]
    DuplicateHelper { name: String },

    /// Template references a helper the registry does not know
    #[error("unknown helper '{name}'")]
    UnknownHelper { name: String },

    /// Template text that cannot be parsed into segments
    #[error("template syntax error: {0}")]
    Syntax(String),

    /// JSON deserialization errors (context snapshot wire shape)
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl EngineError {
    /// Create a duplicate-helper error
    pub fn duplicate_helper(name: impl Into<String>) -> Self {
        Self::DuplicateHelper { name: name.into() }
    }

    /// Create an unknown-helper error
    pub fn unknown_helper(name: impl Into<String>) -> Self {
        Self::UnknownHelper { name: name.into() }
    }

    /// Create a syntax error
    pub fn syntax(message: impl Into<String>) -> Self {
        Self::Syntax(message.into())
    }
}
