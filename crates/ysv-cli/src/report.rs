//! # Reporting
//!
//! Renders the result of a check for stdout, as text lines led by a status
//! glyph or as one JSON object. The violation list is always printed in
//! full.

use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;

use ysv_schema::{CheckError, InstancePath, Violations};

use crate::args::OutputFormat;

const PASS: &str = "✅";
const FAIL: &str = "❌";

/// How a check ended.
#[derive(Debug)]
pub enum Verdict {
    /// The document satisfies the schema.
    Valid,
    /// The document parsed and violates the schema.
    Invalid(Violations),
    /// The check stopped before validating.
    Failed(CheckError),
    /// A fault nothing else anticipated.
    Unexpected(String),
}

impl Verdict {
    /// Stable label, also the JSON `status`.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Valid => "valid",
            Self::Invalid(_) => "invalid",
            Self::Failed(_) | Self::Unexpected(_) => "error",
        }
    }

    /// Number of schema violations reported.
    pub fn error_count(&self) -> usize {
        match self {
            Self::Invalid(violations) => violations.len(),
            _ => 0,
        }
    }
}

/// The outcome of one invocation, with the inputs it concerned.
#[derive(Debug)]
pub struct Report {
    /// Values file path as given.
    pub values: PathBuf,
    /// Schema file path as given.
    pub schema: PathBuf,
    /// How the check ended.
    pub verdict: Verdict,
}

impl Report {
    /// 0 only for a valid document.
    pub fn exit_code(&self) -> u8 {
        match self.verdict {
            Verdict::Valid => 0,
            _ => 1,
        }
    }

    /// Render in the requested format, newline-terminated.
    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Text => Ok(self.render_text()),
            OutputFormat::Json => self.render_json(),
        }
    }

    /// Human-readable report.
    pub fn render_text(&self) -> String {
        let values = self.values.display();
        let mut out = String::new();

        match &self.verdict {
            Verdict::Valid => {
                let _ = writeln!(out, "{PASS} {values} is valid against {}", self.schema.display());
            }
            Verdict::Invalid(violations) => {
                let _ = writeln!(
                    out,
                    "{FAIL} {values} failed validation with {} error(s):",
                    violations.len()
                );
                for (i, v) in violations.iter().enumerate() {
                    let _ = writeln!(out, "  {}. Path: {}", i + 1, v.path);
                    let _ = writeln!(out, "     Message: {}", v.message);
                    if let Some(rule) = &v.rule {
                        let _ = writeln!(out, "     Rule: {rule}");
                    }
                }
            }
            Verdict::Failed(err) => {
                let _ = writeln!(out, "{FAIL} {}", describe(err));
                if let Some(hint) = err.hint() {
                    let _ = writeln!(out, "   Hint: {hint}");
                }
            }
            Verdict::Unexpected(message) => {
                let _ = writeln!(out, "{FAIL} Unexpected error: {message}");
            }
        }

        out
    }

    /// Machine-readable report.
    pub fn render_json(&self) -> Result<String> {
        let errors = match &self.verdict {
            Verdict::Invalid(violations) => violations
                .iter()
                .enumerate()
                .map(|(i, v)| JsonViolation {
                    index: i + 1,
                    path: &v.path,
                    path_display: v.path.to_string(),
                    message: &v.message,
                    rule: v.rule.as_deref(),
                })
                .collect(),
            _ => Vec::new(),
        };

        let error = match &self.verdict {
            Verdict::Failed(err) => Some(JsonError {
                kind: err.kind(),
                message: err.to_string(),
                hint: err.hint(),
            }),
            Verdict::Unexpected(message) => Some(JsonError {
                kind: "unexpected",
                message: message.clone(),
                hint: None,
            }),
            _ => None,
        };

        let report = JsonReport {
            status: self.verdict.label(),
            values: self.values.display().to_string(),
            schema: self.schema.display().to_string(),
            error_count: self.verdict.error_count(),
            errors,
            error,
        };

        let mut out = serde_json::to_string_pretty(&report).context("serializing JSON report")?;
        out.push('\n');
        Ok(out)
    }
}

/// One marked line per error kind. Read failures are not an expected kind
/// and carry the unexpected-error marker.
fn describe(err: &CheckError) -> String {
    match err {
        CheckError::MissingFile { .. } | CheckError::MissingDependency { .. } => {
            format!("Error: {err}")
        }
        CheckError::YamlParse { path, reason } => {
            format!("YAML parse error in {}: {reason}", path.display())
        }
        CheckError::JsonParse { path, reason } => {
            format!("JSON parse error in {}: {reason}", path.display())
        }
        CheckError::InvalidSchema { path, reason } => {
            format!("Invalid JSON Schema in {}: {reason}", path.display())
        }
        CheckError::Read { .. } => format!("Unexpected error: {err}"),
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    status: &'static str,
    values: String,
    schema: String,
    error_count: usize,
    errors: Vec<JsonViolation<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<JsonError>,
}

#[derive(Serialize)]
struct JsonViolation<'a> {
    index: usize,
    path: &'a InstancePath,
    path_display: String,
    message: &'a str,
    rule: Option<&'a str>,
}

#[derive(Serialize)]
struct JsonError {
    kind: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    hint: Option<&'static str>,
}
