//! Immutable signature registry with O(1) lookup by command name.
//!
//! The registry is built once at startup from a declarative signature table
//! and never mutated afterwards. Because it holds plain immutable data it is
//! `Send + Sync` and can be read from any number of threads without
//! synchronization.

use std::collections::HashMap;

use crate::validate::validate_signature;
use crate::{CommandSignature, SchemaError};

/// Read-only mapping from command name to [`CommandSignature`].
///
/// [`lookup`](SchemaRegistry::lookup) returning `None` is a normal outcome:
/// the formatter falls back to generic argument handling for commands it has
/// no signature for. Load-time defects, by contrast, are fatal and surface
/// as [`SchemaError`].
///
/// # Examples
///
/// ```
/// use command_signature_core::{CommandSignature, SchemaRegistry};
///
/// let registry = SchemaRegistry::load(vec![
///     CommandSignature::new("add_xocc_compile_target", 1)
///         .with_flag("SAVE_TEMPS")
///         .with_keyword("TARGET", 1),
/// ])
/// .unwrap();
///
/// assert!(registry.lookup("add_xocc_compile_target").is_some());
/// assert!(registry.lookup("add_custom_target").is_none());
/// ```
#[derive(Debug, Clone)]
pub struct SchemaRegistry {
    signatures: HashMap<String, CommandSignature>,
}

impl SchemaRegistry {
    /// Builds a registry from an iterator of signatures.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::DuplicateCommand`] if two signatures share a
    /// name, or the first per-signature validation error (empty names,
    /// flag/keyword overlap) found by
    /// [`validate_signature`](crate::validate_signature).
    ///
    /// # Examples
    ///
    /// ```
    /// use command_signature_core::{CommandSignature, SchemaError, SchemaRegistry};
    ///
    /// let err = SchemaRegistry::load(vec![
    ///     CommandSignature::new("add_xocc_targets", 1),
    ///     CommandSignature::new("add_xocc_targets", 2),
    /// ])
    /// .unwrap_err();
    /// assert_eq!(err, SchemaError::DuplicateCommand("add_xocc_targets".into()));
    /// ```
    pub fn load(
        signatures: impl IntoIterator<Item = CommandSignature>,
    ) -> Result<Self, SchemaError> {
        let mut map = HashMap::new();

        for signature in signatures {
            if let Some(error) = validate_signature(&signature).into_iter().next() {
                return Err(error);
            }
            let name = signature.name.clone();
            if map.insert(name.clone(), signature).is_some() {
                return Err(SchemaError::DuplicateCommand(name));
            }
        }

        Ok(Self { signatures: map })
    }

    /// Looks up a signature by command name.
    ///
    /// `None` means the command is unknown to this registry, which callers
    /// treat as "format generically", never as a failure.
    pub fn lookup(&self, command: &str) -> Option<&CommandSignature> {
        self.signatures.get(command)
    }

    /// Returns `true` if the registry has a signature for `command`.
    pub fn contains(&self, command: &str) -> bool {
        self.signatures.contains_key(command)
    }

    /// Number of registered signatures.
    pub fn len(&self) -> usize {
        self.signatures.len()
    }

    /// Returns `true` if no signatures are registered.
    pub fn is_empty(&self) -> bool {
        self.signatures.is_empty()
    }

    /// Iterates over registered command names in arbitrary order.
    pub fn commands(&self) -> impl Iterator<Item = &str> {
        self.signatures.keys().map(String::as_str)
    }
}
