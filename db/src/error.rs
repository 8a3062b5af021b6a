//! Error types for signature table loading.
//!
//! Provides a unified error type covering all failure modes: I/O,
//! deserialization of the declarative source, and schema validation when
//! the table is turned into a registry.

use command_signature_core::SchemaError;
use thiserror::Error;

/// Errors that can occur while loading a signature table.
#[derive(Debug, Error)]
pub enum TableError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing or serialization failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The table deserialized but its signatures are malformed.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// All configured loader sources failed.
    #[error("no signature sources available")]
    NoSourcesAvailable,
}

/// Convenience alias for results with [`TableError`].
pub type Result<T> = std::result::Result<T, TableError>;
