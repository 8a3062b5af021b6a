//! Declarative signature table loading for the command-signature registry.
//!
//! This crate is the plumbing around
//! [`command_signature_core`](command_signature_core): it reads a
//! declarative table of custom build-command signatures (JSON or YAML, in
//! the `pargs`/`flags`/`kwargs` shape used by build-tool formatter
//! configurations) and turns it into a validated, immutable
//! [`SchemaRegistry`](command_signature_core::SchemaRegistry). A built-in
//! table covering the `add_xocc_*` FPGA build commands ships embedded.
//!
//! # Quick start
//!
//! ```
//! use command_signature_core::classify;
//! use command_signature_db::RegistryBuilder;
//!
//! let registry = RegistryBuilder::new().with_builtin().build().unwrap();
//!
//! let sig = registry.lookup("add_xocc_targets").unwrap();
//! let result = classify(sig, &["vadd", "KERNEL", "VecAdd"]).unwrap();
//! assert_eq!(result.positionals, vec!["vadd"]);
//! ```

mod error;
mod loader;
mod table;

pub use error::{Result, TableError};
pub use loader::{RegistryBuilder, TableSource, builtin, from_json_file, from_yaml_file};
pub use table::{SignatureSpec, SignatureTable};
