//! # ysv-cli — YAML Schema Validator CLI
//!
//! Provides the `ysv` command:
//!
//! ```bash
//! ysv values.yaml values.schema.json
//! ysv --format json values.yaml values.schema.json
//! ```
//!
//! Exit status is 0 when the document is valid and 1 for everything else:
//! usage errors, missing files, a build without the validation engine,
//! parse errors, schema violations and unexpected faults. The printed report
//! tells them apart.
//!
//! ## Crate Policy
//!
//! - Argument parsing is separated from the check itself.
//! - The check delegates to `ysv-schema`; no validation logic here.
//! - stdout carries the report only. Logs go to stderr.

pub mod args;
pub mod report;
pub mod run;

pub use args::{parse_args, Cli, Invocation, OutputFormat, USAGE};
pub use report::{Report, Verdict};
pub use run::run_check;
