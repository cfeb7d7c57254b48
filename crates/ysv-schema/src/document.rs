//! # Document Loading
//!
//! Loads the two inputs of a check into `serde_json::Value` trees:
//!
//! - the values document as YAML, loaded safely: only plain scalars,
//!   sequences and mappings survive. Core-schema tags (`!!str`, `!!int`, ...)
//!   are unwrapped; any other tag is refused, as are mapping keys JSON cannot
//!   hold and floats JSON cannot represent.
//! - the schema document as strict JSON.
//!
//! Both loaders read bytes and leave UTF-8 decoding to the parser, so an
//! undecodable file is a parse error of the right kind rather than an I/O
//! failure.

use std::path::Path;

use serde_json::Value;

use crate::error::{CheckError, DocumentRole};

/// YAML 1.2 core-schema tags that carry no constructor semantics.
const CORE_TAGS: &[&str] = &["str", "int", "float", "bool", "null", "seq", "map"];

/// Long form prefix of core-schema tags.
const YAML_TAG_PREFIX: &str = "tag:yaml.org,2002:";

/// Load the values document at `path` as YAML and convert it to JSON.
///
/// # Errors
///
/// Returns [`CheckError::Read`] if the file cannot be read and
/// [`CheckError::YamlParse`] if it is not YAML that safe loading accepts.
pub fn load_values(path: &Path) -> Result<Value, CheckError> {
    let bytes = read(path, DocumentRole::Values)?;
    let yaml_err = |reason: String| CheckError::YamlParse {
        path: path.to_path_buf(),
        reason,
    };

    let yaml: serde_yaml::Value =
        serde_yaml::from_slice(&bytes).map_err(|e| yaml_err(e.to_string()))?;
    let value = yaml_to_json_value(&yaml).map_err(yaml_err)?;

    tracing::debug!(path = %path.display(), "loaded values document");
    Ok(value)
}

/// Load the schema document at `path` as strict JSON.
///
/// # Errors
///
/// Returns [`CheckError::Read`] if the file cannot be read and
/// [`CheckError::JsonParse`] if it is not valid JSON.
pub fn load_schema(path: &Path) -> Result<Value, CheckError> {
    let bytes = read(path, DocumentRole::Schema)?;
    let value: Value =
        serde_json::from_slice(&bytes).map_err(|e| CheckError::JsonParse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    tracing::debug!(path = %path.display(), "loaded schema document");
    Ok(value)
}

fn read(path: &Path, role: DocumentRole) -> Result<Vec<u8>, CheckError> {
    std::fs::read(path).map_err(|source| CheckError::Read {
        role,
        path: path.to_path_buf(),
        source,
    })
}

/// Convert a `serde_yaml::Value` to a `serde_json::Value`.
///
/// Fails on anything without a plain-data JSON equivalent: tags outside the
/// core schema, null or collection mapping keys, and non-finite floats.
pub(crate) fn yaml_to_json_value(yaml: &serde_yaml::Value) -> Result<Value, String> {
    match yaml {
        serde_yaml::Value::Null => Ok(Value::Null),
        serde_yaml::Value::Bool(b) => Ok(Value::Bool(*b)),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Value::Number(serde_json::Number::from(i)))
            } else if let Some(u) = n.as_u64() {
                Ok(Value::Number(serde_json::Number::from(u)))
            } else if let Some(f) = n.as_f64() {
                serde_json::Number::from_f64(f)
                    .map(Value::Number)
                    .ok_or_else(|| format!("cannot represent float {f} in JSON"))
            } else {
                Err(format!("unsupported YAML number: {n}"))
            }
        }
        serde_yaml::Value::String(s) => Ok(Value::String(s.clone())),
        serde_yaml::Value::Sequence(seq) => {
            let items: Result<Vec<Value>, String> =
                seq.iter().map(yaml_to_json_value).collect();
            Ok(Value::Array(items?))
        }
        serde_yaml::Value::Mapping(map) => {
            let mut json_map = serde_json::Map::new();
            for (k, v) in map {
                let key = match k {
                    serde_yaml::Value::String(s) => s.clone(),
                    serde_yaml::Value::Number(n) => n.to_string(),
                    serde_yaml::Value::Bool(b) => b.to_string(),
                    serde_yaml::Value::Null => {
                        return Err("null mapping keys are not supported".to_string())
                    }
                    _ => {
                        return Err(
                            "mapping keys must be strings, numbers or booleans".to_string()
                        )
                    }
                };
                json_map.insert(key, yaml_to_json_value(v)?);
            }
            Ok(Value::Object(json_map))
        }
        serde_yaml::Value::Tagged(tagged) => {
            let tag = tagged.tag.to_string();
            if is_core_tag(&tag) {
                yaml_to_json_value(&tagged.value)
            } else {
                Err(format!("tag {tag} is not allowed in safe loading"))
            }
        }
    }
}

fn is_core_tag(tag: &str) -> bool {
    let name = tag.trim_start_matches('!');
    let name = name.strip_prefix(YAML_TAG_PREFIX).unwrap_or(name);
    CORE_TAGS.contains(&name)
}
