//! # Validation Engine
//!
//! The Draft 7 validation engine is the `jsonschema` crate, compiled in
//! behind the `engine` cargo feature. [`SchemaEngine::acquire`] is the
//! capability check: a build without the feature reports
//! [`CheckError::MissingDependency`] with an install hint before any document
//! is parsed, instead of failing somewhere downstream.
//!
//! ## Schema Resolution
//!
//! Only `$ref`s inside the schema document (`#/definitions/...`) resolve.
//! The engine is given a retriever that refuses every external URI, so a
//! check never touches the network or any file other than its two inputs.

use std::path::Path;

use serde_json::Value;

use crate::error::CheckError;
use crate::validate::Violations;

/// Name of the engine crate, reported when it is missing.
pub const ENGINE_NAME: &str = "jsonschema";

/// Remediation for builds without the engine.
pub const ENGINE_INSTALL_HINT: &str =
    "reinstall with the validation engine enabled: cargo install ysv-cli --features engine";

/// Handle proving the validation engine is available.
#[derive(Debug, Clone, Copy)]
pub struct SchemaEngine {
    _available: (),
}

/// A schema compiled for Draft 7 validation.
pub struct CompiledSchema {
    #[cfg(feature = "engine")]
    inner: jsonschema::Validator,
    #[cfg(not(feature = "engine"))]
    never: std::convert::Infallible,
}

impl std::fmt::Debug for CompiledSchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompiledSchema")
            .field("draft", &"draft7")
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "engine")]
mod enabled {
    use super::*;

    use jsonschema::{Retrieve, Uri};

    /// Retriever that refuses every external reference.
    struct OfflineRetriever;

    impl Retrieve for OfflineRetriever {
        fn retrieve(
            &self,
            uri: &Uri<&str>,
        ) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
            Err(format!("external $ref is not resolved: {}", uri.as_str()).into())
        }
    }

    impl SchemaEngine {
        /// Acquire the validation engine.
        pub fn acquire() -> Result<Self, CheckError> {
            tracing::trace!(engine = ENGINE_NAME, "validation engine available");
            Ok(Self { _available: () })
        }

        /// Compile `schema` (loaded from `path`) into a Draft 7 validator.
        ///
        /// `format` is an annotation only: values are never checked against it.
        ///
        /// # Errors
        ///
        /// Returns [`CheckError::InvalidSchema`] if the document is not a
        /// valid Draft 7 schema or references an external schema.
        pub fn compile(&self, schema: &Value, path: &Path) -> Result<CompiledSchema, CheckError> {
            let inner = jsonschema::options()
                .with_draft(jsonschema::Draft::Draft7)
                .should_validate_formats(false)
                .with_retriever(OfflineRetriever)
                .build(schema)
                .map_err(|e| CheckError::InvalidSchema {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                })?;
            tracing::debug!(path = %path.display(), "compiled schema");
            Ok(CompiledSchema { inner })
        }
    }

    impl CompiledSchema {
        /// Collect every violation of this schema in `instance`, in the
        /// engine's traversal order.
        pub fn violations(&self, instance: &Value) -> Violations {
            self.inner
                .iter_errors(instance)
                .map(|err| {
                    crate::validate::Violation::from_locations(
                        instance,
                        &err.instance_path.to_string(),
                        &err.schema_path.to_string(),
                        err.to_string(),
                    )
                })
                .collect()
        }

        /// Whether `instance` satisfies this schema.
        pub fn is_valid(&self, instance: &Value) -> bool {
            self.inner.is_valid(instance)
        }
    }
}

#[cfg(not(feature = "engine"))]
mod disabled {
    use super::*;

    impl SchemaEngine {
        /// Acquire the validation engine.
        pub fn acquire() -> Result<Self, CheckError> {
            Err(CheckError::MissingDependency {
                engine: ENGINE_NAME,
                hint: ENGINE_INSTALL_HINT,
            })
        }

        /// Unreachable without the engine: [`SchemaEngine::acquire`] never
        /// succeeds.
        pub fn compile(&self, _schema: &Value, _path: &Path) -> Result<CompiledSchema, CheckError> {
            Err(CheckError::MissingDependency {
                engine: ENGINE_NAME,
                hint: ENGINE_INSTALL_HINT,
            })
        }
    }

    impl CompiledSchema {
        pub fn violations(&self, _instance: &Value) -> Violations {
            match self.never {}
        }

        pub fn is_valid(&self, _instance: &Value) -> bool {
            match self.never {}
        }
    }
}

#[cfg(all(test, feature = "engine"))]
mod tests {
    use super::*;
    use serde_json::json;

    fn compile(schema: Value) -> Result<CompiledSchema, CheckError> {
        SchemaEngine::acquire()
            .unwrap()
            .compile(&schema, Path::new("schema.json"))
    }

    #[test]
    fn acquire_succeeds_with_engine() {
        assert!(SchemaEngine::acquire().is_ok());
    }

    #[test]
    fn compile_simple_schema() {
        let compiled = compile(json!({"type": "object"})).unwrap();
        assert!(compiled.is_valid(&json!({"a": 1})));
        assert!(!compiled.is_valid(&json!([1])));
    }

    #[test]
    fn compile_rejects_invalid_schema() {
        let err = compile(json!({"type": 5})).unwrap_err();
        match err {
            CheckError::InvalidSchema { path, reason } => {
                assert_eq!(path, Path::new("schema.json"));
                assert!(!reason.is_empty());
            }
            other => panic!("expected InvalidSchema, got: {other}"),
        }
    }

    #[test]
    fn compile_refuses_external_ref() {
        let err = compile(json!({"$ref": "https://example.com/other.schema.json"})).unwrap_err();
        assert!(
            matches!(err, CheckError::InvalidSchema { .. }),
            "expected InvalidSchema, got: {err}"
        );
    }

    #[test]
    fn local_definitions_resolve() {
        let compiled = compile(json!({
            "definitions": {"port": {"type": "integer", "minimum": 1}},
            "properties": {"port": {"$ref": "#/definitions/port"}}
        }))
        .unwrap();
        assert!(compiled.is_valid(&json!({"port": 8080})));
        assert!(!compiled.is_valid(&json!({"port": 0})));
    }

    #[test]
    fn draft7_semantics_apply() {
        // `dependentRequired` is 2019-09+; Draft 7 ignores it.
        let compiled = compile(json!({
            "dependentRequired": {"a": ["b"]}
        }))
        .unwrap();
        assert!(compiled.is_valid(&json!({"a": 1})));
    }

    #[test]
    fn format_is_not_asserted() {
        let compiled = compile(json!({
            "properties": {
                "email": {"type": "string", "format": "email"},
                "when": {"type": "string", "format": "date"}
            }
        }))
        .unwrap();
        let doc = json!({"email": "notanemail", "when": "yesterday"});
        assert!(compiled.violations(&doc).is_empty());
        assert!(compiled.is_valid(&doc));
    }

    #[test]
    fn violations_are_exhaustive() {
        let compiled = compile(json!({
            "type": "object",
            "required": ["name", "port"],
            "properties": {"replicas": {"type": "integer"}}
        }))
        .unwrap();
        let violations = compiled.violations(&json!({"replicas": "three"}));
        assert_eq!(violations.len(), 3, "got: {violations}");
    }
}
