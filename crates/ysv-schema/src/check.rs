//! # Check Pipeline
//!
//! One check, start to finish: both paths must exist, the engine must be
//! available, the schema must load as JSON, the values must load as YAML,
//! and the schema must compile. Only then is the document validated. The
//! first step that fails ends the check, so a missing file is never reported
//! as a parse error and a missing engine never as either.

use std::path::Path;

use crate::document::{load_schema, load_values};
use crate::engine::SchemaEngine;
use crate::error::{CheckError, DocumentRole};
use crate::validate::Violations;

/// Validate the YAML document at `values` against the JSON Schema at `schema`.
///
/// Returns every violation found; an empty [`Violations`] means the
/// document is valid.
///
/// # Errors
///
/// Returns the first [`CheckError`] raised, in this order:
/// [`CheckError::MissingFile`] (values, then schema),
/// [`CheckError::MissingDependency`], [`CheckError::JsonParse`],
/// [`CheckError::YamlParse`], [`CheckError::InvalidSchema`].
/// [`CheckError::Read`] can occur at either load step.
pub fn check_files(values: &Path, schema: &Path) -> Result<Violations, CheckError> {
    ensure_exists(values, DocumentRole::Values)?;
    ensure_exists(schema, DocumentRole::Schema)?;

    let engine = SchemaEngine::acquire()?;

    let schema_doc = load_schema(schema)?;
    let instance = load_values(values)?;
    let compiled = engine.compile(&schema_doc, schema)?;

    let violations = compiled.violations(&instance);
    tracing::debug!(
        values = %values.display(),
        schema = %schema.display(),
        count = violations.len(),
        "validated document"
    );
    Ok(violations)
}

fn ensure_exists(path: &Path, role: DocumentRole) -> Result<(), CheckError> {
    if path.exists() {
        Ok(())
    } else {
        Err(CheckError::MissingFile {
            role,
            path: path.to_path_buf(),
        })
    }
}
