//! Declarative signature table, the on-disk shape of a registry.
//!
//! A table is a mapping from command name to a record of `pargs` (positional
//! count), `flags`, and `kwargs` (keyword name to arity, where arity is a
//! non-negative integer or the wildcard `"*"`). This mirrors the
//! configuration shape build-tool formatters use to declare signatures of
//! commands they cannot introspect.

use std::collections::{BTreeMap, BTreeSet};

use command_signature_core::{Arity, CommandSignature, SchemaRegistry};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// One command's record in a signature table.
///
/// # Examples
///
/// ```
/// use command_signature_db::SignatureSpec;
///
/// let spec: SignatureSpec = serde_json::from_str(
///     r#"{"pargs": 1, "flags": ["SAVE_TEMPS"], "kwargs": {"DRAM_MAPPING": "*"}}"#,
/// )
/// .unwrap();
/// assert_eq!(spec.pargs, 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureSpec {
    /// Required leading positional argument count.
    #[serde(default)]
    pub pargs: u32,
    /// Bare flag names.
    #[serde(default)]
    pub flags: BTreeSet<String>,
    /// Keyword names mapped to their arity.
    #[serde(default)]
    pub kwargs: BTreeMap<String, Arity>,
}

impl SignatureSpec {
    fn into_signature(self, name: &str) -> CommandSignature {
        CommandSignature {
            name: name.to_string(),
            positional_count: self.pargs,
            flags: self.flags,
            keyword_arities: self.kwargs,
        }
    }
}

/// A full signature table keyed by command name.
///
/// Serializes transparently as the command-to-record mapping, so a table
/// file contains nothing but the commands themselves.
///
/// # Examples
///
/// ```
/// use command_signature_db::SignatureTable;
///
/// let table: SignatureTable = serde_json::from_str(
///     r#"{"add_xocc_targets": {"pargs": 1, "kwargs": {"KERNEL": 1}}}"#,
/// )
/// .unwrap();
///
/// let registry = table.into_registry().unwrap();
/// assert!(registry.contains("add_xocc_targets"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SignatureTable {
    /// The command-to-record mapping.
    pub commands: BTreeMap<String, SignatureSpec>,
}

impl SignatureTable {
    /// Adds or replaces a command's record.
    pub fn insert(&mut self, name: &str, spec: SignatureSpec) {
        self.commands.insert(name.to_string(), spec);
    }

    /// Number of commands in the table.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Returns `true` if the table declares no commands.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Converts the table into a validated [`SchemaRegistry`].
    ///
    /// # Errors
    ///
    /// Returns [`TableError::Schema`](crate::TableError::Schema) if any
    /// signature is malformed; duplicate command names cannot occur since
    /// the table is keyed by name.
    pub fn into_registry(self) -> Result<SchemaRegistry> {
        let signatures = self
            .commands
            .into_iter()
            .map(|(name, spec)| spec.into_signature(&name));
        Ok(SchemaRegistry::load(signatures)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_into_registry() {
        let mut table = SignatureTable::default();
        table.insert(
            "add_xocc_compile_target",
            SignatureSpec {
                pargs: 1,
                flags: ["SAVE_TEMPS".to_string()].into(),
                kwargs: [("TARGET".to_string(), Arity::Fixed(1))].into(),
            },
        );

        let registry = table.into_registry().unwrap();
        let sig = registry.lookup("add_xocc_compile_target").unwrap();
        assert_eq!(sig.positional_count, 1);
        assert!(sig.is_flag("SAVE_TEMPS"));
        assert_eq!(sig.keyword_arity("TARGET"), Some(Arity::Fixed(1)));
    }

    #[test]
    fn test_table_rejects_flag_keyword_overlap() {
        let mut table = SignatureTable::default();
        table.insert(
            "add_xocc_targets",
            SignatureSpec {
                pargs: 1,
                flags: ["KERNEL".to_string()].into(),
                kwargs: [("KERNEL".to_string(), Arity::Fixed(1))].into(),
            },
        );

        assert!(table.into_registry().is_err());
    }

    #[test]
    fn test_missing_fields_default() {
        let table: SignatureTable =
            serde_json::from_str(r#"{"add_xocc_targets": {"pargs": 1}}"#).unwrap();
        let spec = &table.commands["add_xocc_targets"];
        assert!(spec.flags.is_empty());
        assert!(spec.kwargs.is_empty());
    }

    #[test]
    fn test_table_json_round_trip() {
        let mut table = SignatureTable::default();
        table.insert(
            "add_xocc_targets",
            SignatureSpec {
                pargs: 1,
                flags: BTreeSet::new(),
                kwargs: [
                    ("KERNEL".to_string(), Arity::Fixed(1)),
                    ("DRAM_MAPPING".to_string(), Arity::Variadic),
                ]
                .into(),
            },
        );

        let json = serde_json::to_string(&table).unwrap();
        let parsed: SignatureTable = serde_json::from_str(&json).unwrap();
        assert_eq!(table, parsed);
    }
}
