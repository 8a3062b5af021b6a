//! Signature type definitions for custom build-command call shapes.
//!
//! This module defines the data model describing how a dynamically defined
//! build command is invoked: how many leading positional arguments it takes,
//! which bare flags it accepts, and which keyword arguments exist together
//! with the number of values each keyword consumes. The types serialize with
//! [`serde`] in the same shape as the declarative signature tables consumed
//! by the loader crate.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Number of values a keyword argument consumes.
///
/// A keyword either takes an exact count of following tokens, or is
/// variadic and consumes every following token up to the next recognized
/// flag/keyword token (or the end of the invocation).
///
/// On the wire this is a heterogeneous value: a non-negative integer for
/// [`Fixed`](Arity::Fixed), or the wildcard string `"*"` for
/// [`Variadic`](Arity::Variadic).
///
/// # Examples
///
/// ```
/// use command_signature_core::Arity;
///
/// let fixed: Arity = serde_json::from_str("1").unwrap();
/// assert_eq!(fixed, Arity::Fixed(1));
///
/// let variadic: Arity = serde_json::from_str("\"*\"").unwrap();
/// assert_eq!(variadic, Arity::Variadic);
/// assert!(variadic.is_variadic());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Exactly this many following values.
    Fixed(u32),
    /// All following values up to the next recognized flag/keyword token.
    Variadic,
}

impl Arity {
    /// Returns `true` for [`Arity::Variadic`].
    pub fn is_variadic(&self) -> bool {
        matches!(self, Arity::Variadic)
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Fixed(n) => write!(f, "{n}"),
            Arity::Variadic => f.write_str("*"),
        }
    }
}

impl Serialize for Arity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Arity::Fixed(n) => serializer.serialize_u32(*n),
            Arity::Variadic => serializer.serialize_str("*"),
        }
    }
}

struct ArityVisitor;

impl Visitor<'_> for ArityVisitor {
    type Value = Arity;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a non-negative integer or the wildcard \"*\"")
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Arity, E> {
        u32::try_from(value)
            .map(Arity::Fixed)
            .map_err(|_| E::custom(format!("keyword arity {value} out of range")))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Arity, E> {
        u32::try_from(value)
            .map(Arity::Fixed)
            .map_err(|_| E::custom(format!("keyword arity {value} must be non-negative")))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Arity, E> {
        match value {
            "*" => Ok(Arity::Variadic),
            other => Err(E::custom(format!(
                "unknown arity marker {other:?}, expected \"*\""
            ))),
        }
    }
}

impl<'de> Deserialize<'de> for Arity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ArityVisitor)
    }
}

/// Call shape of one custom build command.
///
/// Describes the signature an external formatter needs in order to tokenize
/// and pretty-print invocations of a command it cannot otherwise introspect:
/// the count of required leading positionals, the set of bare flags, and the
/// keyword-to-arity mapping.
///
/// Use [`new`](CommandSignature::new) and the builder methods to construct
/// signatures programmatically:
///
/// ```
/// use command_signature_core::{Arity, CommandSignature};
///
/// let sig = CommandSignature::new("add_xocc_compile_target", 1)
///     .with_flag("SAVE_TEMPS")
///     .with_keyword("TARGET", 1)
///     .with_keyword("INPUT", 1);
///
/// assert_eq!(sig.positional_count, 1);
/// assert!(sig.is_flag("SAVE_TEMPS"));
/// assert_eq!(sig.keyword_arity("TARGET"), Some(Arity::Fixed(1)));
/// assert!(!sig.is_recognized("OUTPUT"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandSignature {
    /// Command name, unique within a registry.
    pub name: String,
    /// Exact number of required leading positional arguments.
    pub positional_count: u32,
    /// Bare flag tokens. A flag toggles a boolean and consumes no values.
    #[serde(default)]
    pub flags: BTreeSet<String>,
    /// Keyword tokens mapped to the arity of their value lists.
    #[serde(default)]
    pub keyword_arities: BTreeMap<String, Arity>,
}

impl CommandSignature {
    /// Creates a signature with the given name and positional count, and no
    /// flags or keywords.
    pub fn new(name: &str, positional_count: u32) -> Self {
        Self {
            name: name.to_string(),
            positional_count,
            flags: BTreeSet::new(),
            keyword_arities: BTreeMap::new(),
        }
    }

    /// Adds a bare flag.
    pub fn with_flag(mut self, flag: &str) -> Self {
        self.flags.insert(flag.to_string());
        self
    }

    /// Adds a keyword consuming exactly `count` values.
    pub fn with_keyword(mut self, keyword: &str, count: u32) -> Self {
        self.keyword_arities
            .insert(keyword.to_string(), Arity::Fixed(count));
        self
    }

    /// Adds a variadic keyword.
    ///
    /// A variadic keyword consumes every following token up to the next
    /// recognized flag/keyword, so in practice it should be the last named
    /// argument of an invocation.
    pub fn with_variadic_keyword(mut self, keyword: &str) -> Self {
        self.keyword_arities
            .insert(keyword.to_string(), Arity::Variadic);
        self
    }

    /// Returns `true` if `token` is a declared flag of this signature.
    pub fn is_flag(&self, token: &str) -> bool {
        self.flags.contains(token)
    }

    /// Returns the declared arity if `token` is a keyword of this signature.
    pub fn keyword_arity(&self, token: &str) -> Option<Arity> {
        self.keyword_arities.get(token).copied()
    }

    /// Returns `true` if `token` is a declared flag or keyword.
    ///
    /// Used by the classifier to decide where variadic value consumption
    /// stops.
    pub fn is_recognized(&self, token: &str) -> bool {
        self.is_flag(token) || self.keyword_arities.contains_key(token)
    }
}
