//! Registry loading with a builder pattern and fallback chains.
//!
//! The declarative source is read exactly once, synchronously, before any
//! classification happens; the resulting [`SchemaRegistry`] is immutable
//! for the rest of the process lifetime.
//!
//! # Loading patterns
//!
//! ```no_run
//! use command_signature_db::{RegistryBuilder, from_json_file};
//!
//! // Load a single JSON table
//! let registry = from_json_file("signatures.json").unwrap();
//! assert!(registry.lookup("add_xocc_targets").is_some());
//!
//! // Use the builder for a fallback chain ending at the built-in table
//! let registry = RegistryBuilder::new()
//!     .from_json_file("signatures.json")
//!     .from_yaml_file("signatures.yaml")
//!     .with_builtin()
//!     .build()
//!     .unwrap();
//! ```

use std::path::{Path, PathBuf};

use command_signature_core::SchemaRegistry;

use crate::error::{Result, TableError};
use crate::table::SignatureTable;

/// The built-in signature table: the `add_xocc_*` FPGA build commands
/// (compile, link, and the combined target generators), embedded at build
/// time.
const BUILTIN_TABLE: &str = include_str!("../schemas/xocc.json");

/// Describes where a registry is to be loaded from.
#[derive(Debug, Clone)]
pub enum TableSource {
    /// A JSON signature table file.
    JsonFile(PathBuf),
    /// A YAML signature table file.
    YamlFile(PathBuf),
    /// The embedded built-in table.
    Builtin,
}

/// Loads a registry from a JSON signature table file.
///
/// # Errors
///
/// Returns [`TableError::Io`] if the file cannot be read,
/// [`TableError::Json`] if it is not a valid table, or
/// [`TableError::Schema`] if a signature fails validation.
pub fn from_json_file(path: impl AsRef<Path>) -> Result<SchemaRegistry> {
    let file = std::fs::File::open(path.as_ref())?;
    let reader = std::io::BufReader::new(file);
    let table: SignatureTable = serde_json::from_reader(reader)?;
    table.into_registry()
}

/// Loads a registry from a YAML signature table file.
///
/// # Errors
///
/// Returns [`TableError::Io`] if the file cannot be read,
/// [`TableError::Yaml`] if it is not a valid table, or
/// [`TableError::Schema`] if a signature fails validation.
pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<SchemaRegistry> {
    let file = std::fs::File::open(path.as_ref())?;
    let reader = std::io::BufReader::new(file);
    let table: SignatureTable = serde_yaml::from_reader(reader)?;
    table.into_registry()
}

/// Loads the embedded built-in table.
///
/// # Errors
///
/// Returns [`TableError::Json`] or [`TableError::Schema`] only if the
/// embedded data is defective, which a passing test suite rules out.
pub fn builtin() -> Result<SchemaRegistry> {
    let table: SignatureTable = serde_json::from_str(BUILTIN_TABLE)?;
    table.into_registry()
}

/// Builder configuring a fallback chain of table sources.
///
/// Sources are tried in the order they were added; the first that loads
/// successfully wins.
///
/// # Examples
///
/// ```
/// use command_signature_db::RegistryBuilder;
///
/// // Prefer a user table, fall back to the built-in one
/// let registry = RegistryBuilder::new()
///     .from_json_file("/nonexistent/signatures.json")
///     .with_builtin()
///     .build()
///     .unwrap();
/// assert!(registry.contains("add_xocc_link_target"));
/// ```
pub struct RegistryBuilder {
    sources: Vec<TableSource>,
}

impl RegistryBuilder {
    /// Creates a builder with no sources.
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
        }
    }

    /// Adds a JSON table file as a source.
    pub fn from_json_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.sources.push(TableSource::JsonFile(path.into()));
        self
    }

    /// Adds a YAML table file as a source.
    pub fn from_yaml_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.sources.push(TableSource::YamlFile(path.into()));
        self
    }

    /// Adds the embedded built-in table as a source.
    pub fn with_builtin(mut self) -> Self {
        self.sources.push(TableSource::Builtin);
        self
    }

    /// Attempts to load a registry from the configured sources in order.
    ///
    /// Returns the first successfully loaded registry. Failed sources are
    /// logged at debug level and skipped. If all sources fail, returns
    /// [`TableError::NoSourcesAvailable`].
    pub fn build(self) -> Result<SchemaRegistry> {
        if self.sources.is_empty() {
            return Err(TableError::NoSourcesAvailable);
        }

        for source in &self.sources {
            let result = match source {
                TableSource::JsonFile(path) => from_json_file(path),
                TableSource::YamlFile(path) => from_yaml_file(path),
                TableSource::Builtin => builtin(),
            };

            match result {
                Ok(registry) => return Ok(registry),
                Err(error) => {
                    tracing::debug!(?source, %error, "signature table source failed, trying next");
                }
            }
        }

        Err(TableError::NoSourcesAvailable)
    }
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}
