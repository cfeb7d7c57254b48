//! # ysv-schema — YAML Validation Against JSON Schema
//!
//! Validates a YAML document against a JSON Schema (Draft 7) and reports
//! every violation with its location in the document and the schema keyword
//! that failed.
//!
//! ## Modules
//!
//! - [`document`] — safe YAML loading of the values document, strict JSON
//!   loading of the schema.
//! - [`engine`] — capability check and Draft 7 compilation, backed by the
//!   `jsonschema` crate behind the `engine` feature.
//! - [`validate`] — [`Violation`], [`InstancePath`], [`Violations`].
//! - [`check`] — [`check_files`], the whole check in one call.
//!
//! ## Crate Policy
//!
//! - Schema violations are results, not errors. [`CheckError`] is reserved
//!   for checks that could not run to a verdict.
//! - Inputs are never mutated. External `$ref`s are never fetched.
//! - No printing. Rendering and exit codes belong to the CLI.

pub mod check;
pub mod document;
pub mod engine;
pub mod error;
pub mod validate;

pub use check::check_files;
pub use document::{load_schema, load_values};
pub use engine::{CompiledSchema, SchemaEngine, ENGINE_INSTALL_HINT, ENGINE_NAME};
pub use error::{CheckError, DocumentRole};
pub use validate::{InstancePath, PathSegment, Violation, Violations};
