//! Error types for tag parameter parsing.

use thiserror::Error;

/// Error while parsing a tag's parameter payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct TagError {
    /// The error message.
    pub message: String,
    /// Error kind for programmatic handling.
    pub kind: TagErrorKind,
}

impl std::fmt::Display for TagError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Kinds of tag parameter errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagErrorKind {
    /// A parameter key the tag does not recognize.
    InvalidParameterKey,
    /// A parameter item with no `=`.
    ParameterRequiresArgument,
    /// A boolean parameter whose value is not a strict `true`/`false`.
    InvalidBooleanValue,
    /// A required parameter was not supplied.
    MissingParameter,
}

impl TagError {
    /// Create a new tag error.
    pub fn new(message: impl Into<String>, kind: TagErrorKind) -> Self {
        Self {
            message: message.into(),
            kind,
        }
    }

    /// Create an invalid-parameter-key error.
    pub fn invalid_parameter(tag: &str, key: &str) -> Self {
        Self::new(
            format!("invalid parameter [{}] for @{}", key.trim(), tag),
            TagErrorKind::InvalidParameterKey,
        )
    }

    /// Create an argument-required error for a parameter item with no `=`.
    pub fn argument_required(key: &str) -> Self {
        Self::new(
            format!("parameter [{}] requires an argument", key.trim()),
            TagErrorKind::ParameterRequiresArgument,
        )
    }

    /// Create an invalid-boolean error.
    pub fn invalid_boolean(tag: &str, key: &str, value: &str) -> Self {
        Self::new(
            format!(
                "parameter [{}] of @{} expects true or false, got [{}]",
                key, tag, value
            ),
            TagErrorKind::InvalidBooleanValue,
        )
    }

    /// Create a missing-parameter error.
    pub fn missing_parameter(tag: &str, key: &str) -> Self {
        Self::new(
            format!("@{} requires parameter [{}]", tag, key),
            TagErrorKind::MissingParameter,
        )
    }
}
