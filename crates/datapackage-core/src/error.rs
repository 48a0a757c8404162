//! Error types for the data package core library
//!
//! Structural problems in a descriptor are never errors here: they are
//! collected as issues by the validation reporter. This type covers the
//! hard failures only (resolving an unsupported type directly, decoding,
//! and file access).

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for data package operations
#[derive(Error, Debug)]
pub enum Error {
    /// A logical type name outside the resolution table
    #[error("The type '{value}' is not supported presently")]
    UnsupportedType {
        /// The literal value as it appeared in the descriptor
        value: String,
    },

    /// JSON decoding or encoding errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// YAML decoding or encoding errors
    #[error("YAML error: {message}")]
    Yaml {
        message: String,
        #[source]
        source: serde_yaml::Error,
    },

    /// IO errors while loading or storing a descriptor
    #[error("IO error for {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an unsupported type error for the given literal
    pub fn unsupported_type(value: impl Into<String>) -> Self {
        Self::UnsupportedType {
            value: value.into(),
        }
    }

    /// Create a JSON error with context
    pub fn json(message: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Json {
            message: message.into(),
            source,
        }
    }

    /// Create a YAML error with context
    pub fn yaml(message: impl Into<String>, source: serde_yaml::Error) -> Self {
        Self::Yaml {
            message: message.into(),
            source,
        }
    }

    /// Create an IO error for a path
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Check whether this is a type-resolution failure
    pub fn is_unsupported_type(&self) -> bool {
        matches!(self, Self::UnsupportedType { .. })
    }
}
