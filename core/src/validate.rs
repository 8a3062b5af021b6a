//! Signature validation.
//!
//! Validates structural invariants of command signatures before they enter a
//! registry: non-empty names, and disjoint flag/keyword sets (a token cannot
//! be classified as both a flag and a keyword).
//!
//! # Examples
//!
//! ```
//! use command_signature_core::*;
//!
//! let sig = CommandSignature::new("add_xocc_targets", 1)
//!     .with_keyword("KERNEL", 1)
//!     .with_variadic_keyword("DRAM_MAPPING");
//! assert!(validate_signature(&sig).is_empty());
//!
//! // Invalid: SAVE_TEMPS declared as both flag and keyword
//! let bad = CommandSignature::new("add_xocc_targets", 1)
//!     .with_flag("SAVE_TEMPS")
//!     .with_keyword("SAVE_TEMPS", 1);
//! assert!(!validate_signature(&bad).is_empty());
//! ```

use thiserror::Error;

use crate::CommandSignature;

/// Schema validation errors.
///
/// All variants are fatal at registry load time: a registry cannot be built
/// from a table containing any of these defects.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// Command name is empty or whitespace-only.
    #[error("signature command name cannot be empty")]
    EmptyCommandName,
    /// Two signatures in the same registry share a command name.
    #[error("duplicate command in registry: {0}")]
    DuplicateCommand(String),
    /// A flag or keyword name is empty.
    #[error("empty flag or keyword name in signature for {command}")]
    EmptyArgumentName {
        /// Command whose signature declares the empty name.
        command: String,
    },
    /// The same token is declared as both a flag and a keyword.
    #[error("{name} is declared as both a flag and a keyword in {command}")]
    FlagKeywordOverlap {
        /// Command whose signature declares the overlap.
        command: String,
        /// The overlapping token.
        name: String,
    },
}

/// Validates one command signature.
///
/// Checks for an empty command name, empty flag/keyword names, and tokens
/// declared as both a flag and a keyword. Returns the first defect found.
///
/// # Examples
///
/// ```
/// use command_signature_core::*;
///
/// let sig = CommandSignature::new("", 0);
/// assert_eq!(validate_signature(&sig), vec![SchemaError::EmptyCommandName]);
/// ```
pub fn validate_signature(signature: &CommandSignature) -> Vec<SchemaError> {
    let mut errors = Vec::new();

    if signature.name.trim().is_empty() {
        errors.push(SchemaError::EmptyCommandName);
        return errors;
    }

    for flag in &signature.flags {
        if flag.trim().is_empty() {
            errors.push(SchemaError::EmptyArgumentName {
                command: signature.name.clone(),
            });
            return errors;
        }
        if signature.keyword_arities.contains_key(flag) {
            errors.push(SchemaError::FlagKeywordOverlap {
                command: signature.name.clone(),
                name: flag.clone(),
            });
            return errors;
        }
    }

    for keyword in signature.keyword_arities.keys() {
        if keyword.trim().is_empty() {
            errors.push(SchemaError::EmptyArgumentName {
                command: signature.name.clone(),
            });
            return errors;
        }
    }

    errors
}
