//! # Document Parsing
//!
//! Parses YAML and JSON content documents into `serde_json::Value` so one
//! validation pipeline serves both formats. The file extension selects the
//! format.

use std::fmt;
use std::path::Path;

use serde_json::Value;

/// Serialization format of a content document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Yaml,
    Json,
}

impl DocumentFormat {
    /// Format for a file path, by extension (case-insensitive).
    ///
    /// Returns `None` for files that are not content documents
    /// (`README.md`, `.gitkeep`, ...).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// Parse document text into a JSON value tree.
    ///
    /// The error string is the underlying parser's message, which carries
    /// line and column information.
    pub fn parse(self, content: &str) -> Result<Value, String> {
        match self {
            Self::Yaml => {
                let yaml: serde_yaml::Value =
                    serde_yaml::from_str(content).map_err(|e| format!("invalid YAML: {e}"))?;
                yaml_to_json_value(yaml)
            }
            Self::Json => serde_json::from_str(content).map_err(|e| format!("invalid JSON: {e}")),
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Yaml => f.write_str("YAML"),
            Self::Json => f.write_str("JSON"),
        }
    }
}

/// The integer a float stands for, if it has no fractional part and fits
/// exactly.
fn integral(f: f64) -> Option<i64> {
    (f.is_finite() && f.fract() == 0.0 && f.abs() < 9.0e15).then_some(f as i64)
}

/// Rewrite every float with no fractional part as an integer, in place.
///
/// JSON Schema treats `12.0` as an integer, but the typed records do not;
/// narrowing first keeps validation and decoding in agreement.
pub fn narrow_integral_floats(value: &mut Value) {
    match value {
        Value::Number(n) if n.is_f64() => {
            if let Some(i) = n.as_f64().and_then(integral) {
                *n = serde_json::Number::from(i);
            }
        }
        Value::Array(items) => items.iter_mut().for_each(narrow_integral_floats),
        Value::Object(map) => map.values_mut().for_each(narrow_integral_floats),
        _ => {}
    }
}

/// Convert a `serde_yaml::Value` to a `serde_json::Value`.
///
/// Tags are stripped and the inner value converted, so `!!timestamp 2025-12-26`
/// arrives as its text. Floats with no fractional part become integers:
/// `frames: 12.0` and `frames: 12` validate identically.
fn yaml_to_json_value(yaml: serde_yaml::Value) -> Result<Value, String> {
    match yaml {
        serde_yaml::Value::Null => Ok(Value::Null),
        serde_yaml::Value::Bool(b) => Ok(Value::Bool(b)),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Value::Number(serde_json::Number::from(i)))
            } else if let Some(u) = n.as_u64() {
                Ok(Value::Number(serde_json::Number::from(u)))
            } else if let Some(f) = n.as_f64() {
                if let Some(i) = integral(f) {
                    Ok(Value::Number(serde_json::Number::from(i)))
                } else {
                    serde_json::Number::from_f64(f)
                        .map(Value::Number)
                        .ok_or_else(|| format!("cannot represent number {f} (NaN or infinite)"))
                }
            } else {
                Err(format!("unsupported YAML number: {n:?}"))
            }
        }
        serde_yaml::Value::String(s) => Ok(Value::String(s)),
        serde_yaml::Value::Sequence(seq) => {
            let items: Result<Vec<Value>, String> =
                seq.into_iter().map(yaml_to_json_value).collect();
            Ok(Value::Array(items?))
        }
        serde_yaml::Value::Mapping(map) => {
            let mut obj = serde_json::Map::new();
            for (k, v) in map {
                let key = match k {
                    serde_yaml::Value::String(s) => s,
                    serde_yaml::Value::Number(n) => n.to_string(),
                    serde_yaml::Value::Bool(b) => b.to_string(),
                    other => return Err(format!("unsupported YAML map key: {other:?}")),
                };
                obj.insert(key, yaml_to_json_value(v)?);
            }
            Ok(Value::Object(obj))
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_json_value(tagged.value),
    }
}
