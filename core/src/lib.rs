//! Signature registry and argument classifier for custom build commands.
//!
//! Declarative build languages for heterogeneous-hardware flows are
//! dynamically extensible: a custom command is just a named procedure with
//! no declared interface, so an external formatter cannot tell which of its
//! arguments are positionals, flags, or keyword groups. This crate supplies
//! the two pieces that close that gap:
//!
//! - [`SchemaRegistry`] — an immutable mapping from command name to
//!   [`CommandSignature`], built once at startup and read concurrently
//!   without synchronization.
//! - [`classify`] — the argument classifier: given a signature and one
//!   invocation's token list, partitions the tokens into a
//!   [`ClassifiedInvocation`] (positionals, flags present, keyword value
//!   lists), honoring fixed and variadic keyword arities.
//!
//! Validation ([`validate_signature`]) catches malformed signatures at load
//! time; per-invocation classification failures ([`ClassifyError`]) are
//! isolated and recoverable. [`classify_all`] classifies batches of
//! invocations in parallel.
//!
//! # Example
//!
//! ```
//! use command_signature_core::*;
//!
//! let registry = SchemaRegistry::load(vec![
//!     CommandSignature::new("add_xocc_targets", 1)
//!         .with_keyword("KERNEL", 1)
//!         .with_keyword("PLATFORM", 1)
//!         .with_variadic_keyword("DRAM_MAPPING"),
//! ])
//! .unwrap();
//!
//! let sig = registry.lookup("add_xocc_targets").unwrap();
//! let tokens = ["vadd", "KERNEL", "VecAdd", "DRAM_MAPPING", "a:DDR0", "b:DDR1"];
//! let result = classify(sig, &tokens).unwrap();
//!
//! assert_eq!(result.positionals, vec!["vadd"]);
//! assert_eq!(result.keyword_values["DRAM_MAPPING"], vec!["a:DDR0", "b:DDR1"]);
//! ```

mod classify;
mod registry;
mod types;
mod validate;

pub use classify::{ClassifiedInvocation, ClassifyError, Invocation, classify, classify_all};
pub use registry::SchemaRegistry;
pub use types::{Arity, CommandSignature};
pub use validate::{SchemaError, validate_signature};
