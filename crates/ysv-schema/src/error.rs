//! # Check Errors
//!
//! Every way a check can stop before producing a verdict. Schema violations
//! are not errors: a document that parses and fails its schema is a normal
//! outcome and is returned as [`crate::Violations`].
//!
//! Variants are listed in the order the pipeline can raise them. Each run
//! stops at the first one.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Which of the two input documents an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentRole {
    /// The YAML document under validation.
    Values,
    /// The JSON Schema document.
    Schema,
}

impl fmt::Display for DocumentRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Values => f.write_str("values"),
            Self::Schema => f.write_str("schema"),
        }
    }
}

/// Errors returned by [`crate::check_files`] and the loading steps it runs.
#[derive(Error, Debug)]
pub enum CheckError {
    /// An input path does not exist. Raised before any parsing.
    #[error("{role} file not found: {}", path.display())]
    MissingFile {
        /// Which input was missing.
        role: DocumentRole,
        /// The path as given.
        path: PathBuf,
    },

    /// The validation engine was not compiled into this build.
    #[error("JSON Schema validation engine '{engine}' is not available in this build")]
    MissingDependency {
        /// Name of the missing engine crate.
        engine: &'static str,
        /// How to get a build that has it.
        hint: &'static str,
    },

    /// The values file is not valid YAML, or uses constructs that safe
    /// loading refuses (unknown tags, non-scalar keys, non-finite floats).
    #[error("invalid YAML in {}: {reason}", path.display())]
    YamlParse {
        /// Path to the values file.
        path: PathBuf,
        /// Parser message.
        reason: String,
    },

    /// The schema file is not strict JSON.
    #[error("invalid JSON in {}: {reason}", path.display())]
    JsonParse {
        /// Path to the schema file.
        path: PathBuf,
        /// Parser message.
        reason: String,
    },

    /// The schema parsed as JSON but is not a usable Draft 7 schema.
    #[error("invalid JSON Schema in {}: {reason}", path.display())]
    InvalidSchema {
        /// Path to the schema file.
        path: PathBuf,
        /// Engine message.
        reason: String,
    },

    /// An existing path could not be read (a directory, permissions).
    #[error("cannot read {role} file {}: {source}", path.display())]
    Read {
        /// Which input failed.
        role: DocumentRole,
        /// The path as given.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl CheckError {
    /// Short stable name of the error kind, used by machine-readable output.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingFile { .. } => "missing_file",
            Self::MissingDependency { .. } => "missing_dependency",
            Self::YamlParse { .. } => "yaml_parse",
            Self::JsonParse { .. } => "json_parse",
            Self::InvalidSchema { .. } => "invalid_schema",
            Self::Read { .. } => "unexpected",
        }
    }

    /// Remediation hint, if the kind has one.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::MissingDependency { hint, .. } => Some(hint),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_names_role_and_path() {
        let err = CheckError::MissingFile {
            role: DocumentRole::Schema,
            path: PathBuf::from("conf/schema.json"),
        };
        assert_eq!(err.to_string(), "schema file not found: conf/schema.json");
        assert_eq!(err.kind(), "missing_file");
        assert!(err.hint().is_none());
    }

    #[test]
    fn missing_dependency_carries_hint() {
        let err = CheckError::MissingDependency {
            engine: "jsonschema",
            hint: "cargo install ysv-cli --features engine",
        };
        assert!(err.to_string().contains("jsonschema"));
        assert_eq!(err.hint(), Some("cargo install ysv-cli --features engine"));
    }

    #[test]
    fn parse_kinds_are_distinct() {
        let yaml = CheckError::YamlParse {
            path: PathBuf::from("values.yaml"),
            reason: "did not find expected key".into(),
        };
        let json = CheckError::JsonParse {
            path: PathBuf::from("schema.json"),
            reason: "trailing comma".into(),
        };
        assert_ne!(yaml.kind(), json.kind());
        assert!(yaml.to_string().starts_with("invalid YAML in values.yaml"));
        assert!(json.to_string().starts_with("invalid JSON in schema.json"));
    }

    #[test]
    fn read_failure_reports_as_unexpected() {
        let err = CheckError::Read {
            role: DocumentRole::Values,
            path: PathBuf::from("values.yaml"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.kind(), "unexpected");
        assert!(err.to_string().contains("cannot read values file"));
    }
}
