use std::fmt::Display;
use thiserror::Error;

/// Message recorded when a failure carries no message of its own.
pub const DEFAULT_ERROR_MESSAGE: &str = "An error occurred";

/// A failed loader call.
///
/// The displayed message is never empty, so it can be shown to users as-is.
#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum LoadError {
    /// The loader failed with a message describing what went wrong.
    #[error("{0}")]
    Message(String),

    /// The loader failed without saying why.
    #[error("{}", DEFAULT_ERROR_MESSAGE)]
    Unspecified,
}

impl LoadError {
    /// Creates an error from a message, falling back to [`LoadError::Unspecified`]
    /// when the message is blank.
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.trim().is_empty() {
            LoadError::Unspecified
        } else {
            LoadError::Message(message)
        }
    }

    pub fn from_display<E: Display + ?Sized>(error: &E) -> Self {
        Self::new(error.to_string())
    }

    pub fn message(&self) -> String {
        self.to_string()
    }

    pub fn is_unspecified(&self) -> bool {
        matches!(self, LoadError::Unspecified)
    }
}

/// Misuse of a resource registry.
#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum RegistryError {
    #[error("Invalid key \"{0}\"")]
    InvalidKey(String),
}

/// A value that does not match the resource state shape.
#[cfg(feature = "serde")]
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("invalid resource state: {0}")]
    Invalid(#[from] serde_json::Error),

    #[error("resource state changed after validation: expected {expected}, got {actual}")]
    Mismatch { expected: String, actual: String },
}
