//! # Violations
//!
//! Structured results of validating a document against a compiled schema.
//!
//! The engine locates each violation with two JSON Pointers: one into the
//! document and one into the schema. Both are decoded here:
//!
//! - the document pointer becomes an [`InstancePath`] of keys and indices,
//!   resolved against the document itself so that `"0"` under an object is a
//!   key and `0` under an array is an index;
//! - the schema pointer yields the Draft 7 keyword that raised the violation,
//!   when the pointer ends on one.

use std::fmt;

use serde::Serialize;
use serde_json::Value;

/// Keywords whose value is a map from names to subschemas.
const NAMED_SUBSCHEMA_KEYWORDS: &[&str] = &[
    "properties",
    "patternProperties",
    "definitions",
    "dependencies",
];

/// Keywords whose value may be an array of subschemas.
const INDEXED_SUBSCHEMA_KEYWORDS: &[&str] = &["allOf", "anyOf", "oneOf", "items"];

/// One step from a node to a child node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PathSegment {
    /// Property name in an object.
    Key(String),
    /// Position in an array.
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => f.write_str(key),
            Self::Index(index) => write!(f, "{index}"),
        }
    }
}

/// Location of a node, from the document root. Empty means the root itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct InstancePath(Vec<PathSegment>);

impl InstancePath {
    /// Placeholder rendered for the root path.
    pub const ROOT: &'static str = "(root)";

    /// Separator between rendered segments. Chosen to not clash with `.`
    /// or `/` in keys.
    pub const SEPARATOR: &'static str = " → ";

    /// Path of the document root.
    pub fn root() -> Self {
        Self::default()
    }

    /// Resolve a JSON Pointer against `instance`.
    ///
    /// Segments that step into an array and parse as an integer become
    /// indices; everything else is a key. Once the pointer leaves the
    /// document, remaining segments are kept as keys.
    pub fn resolve(instance: &Value, pointer: &str) -> Self {
        let mut segments = Vec::new();
        let mut node = Some(instance);

        for raw in split_pointer(pointer) {
            let token = unescape_token(raw);
            match node {
                Some(Value::Array(items)) => match token.parse::<usize>() {
                    Ok(index) => {
                        node = items.get(index);
                        segments.push(PathSegment::Index(index));
                    }
                    Err(_) => {
                        node = None;
                        segments.push(PathSegment::Key(token));
                    }
                },
                Some(Value::Object(map)) => {
                    node = map.get(&token);
                    segments.push(PathSegment::Key(token));
                }
                _ => {
                    node = None;
                    segments.push(PathSegment::Key(token));
                }
            }
        }

        Self(segments)
    }

    /// Whether this is the root path.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// The path's segments, outermost first.
    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }
}

impl From<Vec<PathSegment>> for InstancePath {
    fn from(segments: Vec<PathSegment>) -> Self {
        Self(segments)
    }
}

impl fmt::Display for InstancePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str(Self::ROOT);
        }
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(Self::SEPARATOR)?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

/// A single schema violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Where in the document the violation is.
    pub path: InstancePath,
    /// Human-readable description from the engine.
    pub message: String,
    /// The schema keyword that failed, e.g. `required` or `type`.
    pub rule: Option<String>,
}

impl Violation {
    /// Build a violation from the engine's document and schema pointers.
    pub fn from_locations(
        instance: &Value,
        instance_pointer: &str,
        schema_pointer: &str,
        message: String,
    ) -> Self {
        Self {
            path: InstancePath::resolve(instance, instance_pointer),
            message,
            rule: rule_from_schema_pointer(schema_pointer),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)?;
        if let Some(rule) = &self.rule {
            write!(f, " [{rule}]")?;
        }
        Ok(())
    }
}

/// All violations found in one document, in traversal order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Violations {
    violations: Vec<Violation>,
}

impl Violations {
    /// Returns the number of violations.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Returns true if the document satisfied the schema.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Iterate in traversal order.
    pub fn iter(&self) -> std::slice::Iter<'_, Violation> {
        self.violations.iter()
    }

    /// Returns a slice of all violations.
    pub fn as_slice(&self) -> &[Violation] {
        &self.violations
    }

    /// Consumes self and returns the inner Vec.
    pub fn into_inner(self) -> Vec<Violation> {
        self.violations
    }
}

impl FromIterator<Violation> for Violations {
    fn from_iter<I: IntoIterator<Item = Violation>>(iter: I) -> Self {
        Self {
            violations: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Violations {
    type Item = &'a Violation;
    type IntoIter = std::slice::Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.iter()
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "  {v}")?;
        }
        Ok(())
    }
}

/// The keyword a schema pointer ends on, if it ends on one.
///
/// `/properties/name/type` is `type`; `/required` is `required`;
/// `/properties/name` (a `false` subschema) names a property, not a keyword.
pub(crate) fn rule_from_schema_pointer(pointer: &str) -> Option<String> {
    let tokens: Vec<String> = split_pointer(pointer).map(unescape_token).collect();
    let mut rule = None;
    let mut names_subschema = false;

    for (i, token) in tokens.iter().enumerate() {
        if names_subschema {
            names_subschema = false;
            rule = None;
            continue;
        }
        let next_is_index = tokens
            .get(i + 1)
            .is_some_and(|next| next.parse::<usize>().is_ok());
        names_subschema = NAMED_SUBSCHEMA_KEYWORDS.contains(&token.as_str())
            || (INDEXED_SUBSCHEMA_KEYWORDS.contains(&token.as_str()) && next_is_index);
        rule = Some(token.clone());
    }

    rule
}

fn split_pointer(pointer: &str) -> impl Iterator<Item = &str> {
    pointer
        .strip_prefix('/')
        .map(|rest| rest.split('/'))
        .into_iter()
        .flatten()
}

fn unescape_token(token: &str) -> String {
    token.replace("~1", "/").replace("~0", "~")
}
