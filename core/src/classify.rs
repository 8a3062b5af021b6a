//! Argument classification for custom build-command invocations.
//!
//! Given a [`CommandSignature`] and the flat token sequence following the
//! command name, [`classify`] partitions the tokens into positional
//! arguments, flags, and keyword-argument groups in a single left-to-right
//! pass. This is the piece a formatter needs before it can make any
//! line-wrapping decision: without the partition, a custom command's
//! argument list is just an opaque run of words.
//!
//! Classification never mutates shared state. Batch classification over many
//! invocations runs in parallel via [`classify_all`], since each invocation
//! is independent of every other.
//!
//! # Examples
//!
//! ```
//! use command_signature_core::{CommandSignature, classify};
//!
//! let sig = CommandSignature::new("add_xocc_compile_target", 1)
//!     .with_flag("SAVE_TEMPS")
//!     .with_keyword("TARGET", 1)
//!     .with_keyword("INPUT", 1);
//!
//! let tokens = ["mytarget", "TARGET", "out.bin", "SAVE_TEMPS", "INPUT", "a.cpp"];
//! let result = classify(&sig, &tokens).unwrap();
//!
//! assert_eq!(result.positionals, vec!["mytarget"]);
//! assert!(result.flags_present.contains("SAVE_TEMPS"));
//! assert_eq!(result.keyword_values["TARGET"], vec!["out.bin"]);
//! assert_eq!(result.keyword_values["INPUT"], vec!["a.cpp"]);
//! ```

use std::collections::{BTreeMap, BTreeSet};

use thiserror::Error;

use crate::{Arity, CommandSignature, SchemaRegistry};

/// Classification errors.
///
/// Each variant is recoverable per invocation: a malformed invocation is
/// reported and skipped by the caller, and never affects classification of
/// any other invocation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassifyError {
    /// Fewer tokens than the signature's required positional count.
    #[error("expected {expected} positional arguments, found {found}")]
    MissingPositionals {
        /// Positional count the signature declares.
        expected: usize,
        /// Tokens actually available.
        found: usize,
    },
    /// A fixed-arity keyword ran out of value tokens before its declared
    /// count, either at end of input or at the next recognized flag/keyword.
    #[error("keyword {keyword} expects {expected} values, found {found}")]
    KeywordArity {
        /// The keyword whose value list was cut short.
        keyword: String,
        /// Declared fixed arity.
        expected: usize,
        /// Values actually found.
        found: usize,
    },
    /// A token at a flag/keyword position matches neither.
    #[error("unrecognized token {token:?} at position {position}")]
    UnrecognizedToken {
        /// The offending token.
        token: String,
        /// Zero-based index of the token within the invocation's argument
        /// list (not counting the command name itself).
        position: usize,
    },
}

/// Structured breakdown of one classified invocation.
///
/// Constructed fresh per invocation by [`classify`]; the formatter consumes
/// it to decide wrapping and alignment, then discards it. Uses ordered
/// collections so iteration (and
/// [`canonical_tokens`](ClassifiedInvocation::canonical_tokens)) is
/// deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifiedInvocation {
    /// The leading positional arguments, in source order. Length always
    /// equals the signature's declared positional count.
    pub positionals: Vec<String>,
    /// Flags found anywhere after the positionals.
    pub flags_present: BTreeSet<String>,
    /// Keyword arguments mapped to their consumed value lists, in source
    /// order per keyword.
    pub keyword_values: BTreeMap<String, Vec<String>>,
}

impl ClassifiedInvocation {
    /// Reconstructs a canonical token sequence: positionals first, then each
    /// flag present, then each keyword followed by its values.
    ///
    /// Reclassifying the canonical sequence against the same signature
    /// yields an equal `ClassifiedInvocation`.
    ///
    /// # Examples
    ///
    /// ```
    /// use command_signature_core::{CommandSignature, classify};
    ///
    /// let sig = CommandSignature::new("add_xocc_targets", 1)
    ///     .with_keyword("KERNEL", 1)
    ///     .with_variadic_keyword("DRAM_MAPPING");
    ///
    /// let tokens = ["vadd", "DRAM_MAPPING", "a", "b", "KERNEL", "VecAdd"];
    /// let first = classify(&sig, &tokens).unwrap();
    /// let second = classify(&sig, &first.canonical_tokens()).unwrap();
    /// assert_eq!(first, second);
    /// ```
    pub fn canonical_tokens(&self) -> Vec<String> {
        let mut tokens = self.positionals.clone();
        tokens.extend(self.flags_present.iter().cloned());
        for (keyword, values) in &self.keyword_values {
            tokens.push(keyword.clone());
            tokens.extend(values.iter().cloned());
        }
        tokens
    }
}

/// Partitions an invocation's tokens according to its signature.
///
/// Single left-to-right pass: the first `positional_count` tokens become
/// positionals, then every remaining token must open a flag or keyword. A
/// fixed-arity keyword takes exactly its declared count of following tokens;
/// a variadic keyword takes everything up to the next recognized
/// flag/keyword token or end of input, whichever comes first.
///
/// A keyword repeated within one invocation keeps its last occurrence's
/// values; a warning is logged since the build language gives repeated
/// keywords no defined meaning.
///
/// # Errors
///
/// - [`ClassifyError::MissingPositionals`] if the token list is shorter than
///   the declared positional count.
/// - [`ClassifyError::KeywordArity`] if a fixed-arity keyword's value list
///   is cut short by end of input or another recognized token.
/// - [`ClassifyError::UnrecognizedToken`] for a stray token where a flag or
///   keyword was expected.
///
/// # Examples
///
/// ```
/// use command_signature_core::{ClassifyError, CommandSignature, classify};
///
/// let sig = CommandSignature::new("add_xocc_link_target", 2);
/// let err = classify(&sig, &["only-one"]).unwrap_err();
/// assert_eq!(err, ClassifyError::MissingPositionals { expected: 2, found: 1 });
/// ```
pub fn classify<S: AsRef<str>>(
    signature: &CommandSignature,
    tokens: &[S],
) -> Result<ClassifiedInvocation, ClassifyError> {
    let positional_count = signature.positional_count as usize;
    if tokens.len() < positional_count {
        return Err(ClassifyError::MissingPositionals {
            expected: positional_count,
            found: tokens.len(),
        });
    }

    let mut result = ClassifiedInvocation {
        positionals: tokens[..positional_count]
            .iter()
            .map(|t| t.as_ref().to_string())
            .collect(),
        ..Default::default()
    };

    let mut index = positional_count;
    while index < tokens.len() {
        let token = tokens[index].as_ref();

        if signature.is_flag(token) {
            result.flags_present.insert(token.to_string());
            index += 1;
            continue;
        }

        let Some(arity) = signature.keyword_arity(token) else {
            return Err(ClassifyError::UnrecognizedToken {
                token: token.to_string(),
                position: index,
            });
        };

        let mut values = Vec::new();
        index += 1;
        match arity {
            Arity::Fixed(count) => {
                let count = count as usize;
                while values.len() < count {
                    match tokens.get(index) {
                        Some(t) if !signature.is_recognized(t.as_ref()) => {
                            values.push(t.as_ref().to_string());
                            index += 1;
                        }
                        _ => {
                            return Err(ClassifyError::KeywordArity {
                                keyword: token.to_string(),
                                expected: count,
                                found: values.len(),
                            });
                        }
                    }
                }
            }
            Arity::Variadic => {
                while let Some(t) = tokens.get(index) {
                    if signature.is_recognized(t.as_ref()) {
                        break;
                    }
                    values.push(t.as_ref().to_string());
                    index += 1;
                }
            }
        }

        if result.keyword_values.insert(token.to_string(), values).is_some() {
            tracing::warn!(
                command = %signature.name,
                keyword = token,
                "keyword repeated within one invocation, keeping last occurrence"
            );
        }
    }

    Ok(result)
}

/// One parsed invocation awaiting classification: a command name plus the
/// raw tokens that followed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// The command name.
    pub command: String,
    /// Tokens following the command name, in source order.
    pub tokens: Vec<String>,
}

impl Invocation {
    /// Creates an invocation from a command name and its tokens.
    pub fn new(command: &str, tokens: &[&str]) -> Self {
        Self {
            command: command.to_string(),
            tokens: tokens.iter().map(|t| t.to_string()).collect(),
        }
    }
}

/// Classifies a batch of invocations in parallel.
///
/// Results are returned in input order. `None` marks an invocation whose
/// command has no signature in the registry; the caller formats those
/// generically. A classification failure in one invocation never affects any
/// other.
///
/// # Examples
///
/// ```
/// use command_signature_core::{CommandSignature, Invocation, SchemaRegistry, classify_all};
///
/// let registry = SchemaRegistry::load(vec![
///     CommandSignature::new("add_xocc_targets", 1).with_keyword("KERNEL", 1),
/// ])
/// .unwrap();
///
/// let results = classify_all(
///     &registry,
///     &[
///         Invocation::new("add_xocc_targets", &["vadd", "KERNEL", "VecAdd"]),
///         Invocation::new("add_library", &["vadd", "STATIC"]),
///     ],
/// );
///
/// assert!(results[0].as_ref().unwrap().is_ok());
/// assert!(results[1].is_none());
/// ```
pub fn classify_all(
    registry: &SchemaRegistry,
    invocations: &[Invocation],
) -> Vec<Option<Result<ClassifiedInvocation, ClassifyError>>> {
    use rayon::prelude::*;

    invocations
        .par_iter()
        .map(|invocation| {
            registry
                .lookup(&invocation.command)
                .map(|signature| classify(signature, &invocation.tokens))
        })
        .collect()
}
