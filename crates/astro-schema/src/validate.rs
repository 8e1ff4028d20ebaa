//! # Schema Validation
//!
//! Runtime validation of content documents against the JSON Schema
//! (Draft 2020-12) of their record kind, followed by typed decoding.
//!
//! ## Contract
//!
//! A document either decodes into its typed record or is rejected with a
//! [`ValidationViolations`] list naming every violated constraint in that
//! document: missing fields, wrong types, enum/range/pattern mismatches,
//! empty sequences, impossible calendar dates. Each violation carries the
//! JSON Pointer of the offending field.

use std::collections::HashMap;
use std::fmt;

use astro_core::{ContentRecord, RecordKind};
use jsonschema::Validator;
use serde_json::Value;
use thiserror::Error;

use crate::document::{narrow_integral_floats, DocumentFormat};
use crate::normalize::normalize_dates;

/// Error during schema validation.
#[derive(Error, Debug)]
pub enum SchemaValidationError {
    /// The document did not conform to the schema.
    #[error("validation failed against schema '{schema_name}':\n{violations}")]
    ValidationFailed {
        /// Name of the schema that was validated against.
        schema_name: String,
        /// Structured list of individual violations.
        violations: ValidationViolations,
    },

    /// The document text is not well-formed in its serialization format.
    #[error("{format} parse error: {reason}")]
    DocumentParse {
        /// Format the document was parsed as.
        format: DocumentFormat,
        /// Parser message, including line/column where available.
        reason: String,
    },

    /// An embedded schema could not be parsed or compiled.
    #[error("validator build error for schema '{schema_name}': {reason}")]
    ValidatorBuildError {
        /// Schema filename.
        schema_name: String,
        /// Reason the validator could not be built.
        reason: String,
    },
}

/// A single validation violation with structured context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// JSON Pointer path to the violating field in the instance.
    pub instance_path: String,
    /// JSON Pointer path within the schema that triggered the error.
    /// Empty for checks made outside the schema (calendar validity, decoding).
    pub schema_path: String,
    /// Human-readable description of the violation.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.instance_path.is_empty() {
            write!(f, "  (root): {}", self.message)
        } else {
            write!(f, "  {}: {}", self.instance_path, self.message)
        }
    }
}

/// Everything wrong with one document, shallowest field first.
///
/// Never empty: it only exists inside `ValidationFailed`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationViolations(Vec<Violation>);

impl ValidationViolations {
    /// Order by field path so a report lists a document top to bottom.
    fn sorted(mut found: Vec<Violation>) -> Self {
        found.sort_by(|a, b| a.instance_path.cmp(&b.instance_path));
        Self(found)
    }

    /// A violation of the document as a whole, outside any schema keyword.
    fn at_root(message: String) -> Self {
        Self(vec![Violation {
            instance_path: String::new(),
            schema_path: String::new(),
            message,
        }])
    }

    /// JSON Pointers of the offending fields, in report order. The document
    /// root is the empty pointer.
    pub fn fields(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.iter().map(|v| v.instance_path.as_str())
    }

    /// Whether any violation concerns the field at `instance_path` or below it.
    pub fn touches(&self, instance_path: &str) -> bool {
        self.fields().any(|field| field.starts_with(instance_path))
    }
}

impl fmt::Display for ValidationViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut lines = self.0.iter();
        if let Some(first) = lines.next() {
            write!(f, "{first}")?;
        }
        lines.try_for_each(|v| write!(f, "\n{v}"))
    }
}

/// Source text of the embedded schema for a record kind.
pub fn embedded_schema(kind: RecordKind) -> &'static str {
    match kind {
        RecordKind::Image => include_str!("../../../schemas/image.schema.json"),
        RecordKind::Object => include_str!("../../../schemas/object.schema.json"),
        RecordKind::Equipment => include_str!("../../../schemas/equipment.schema.json"),
        RecordKind::Location => include_str!("../../../schemas/location.schema.json"),
    }
}

/// Compiled validators for the four record kinds.
///
/// ## Thread Safety
///
/// `SchemaValidator` is `Send + Sync`; the loader shares one instance
/// across the concurrent per-kind directory loads. Compilation happens
/// once at construction.
pub struct SchemaValidator {
    validators: HashMap<RecordKind, Validator>,
}

impl fmt::Debug for SchemaValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut kinds: Vec<&RecordKind> = self.validators.keys().collect();
        kinds.sort();
        f.debug_struct("SchemaValidator")
            .field("kinds", &kinds)
            .finish()
    }
}

impl SchemaValidator {
    /// Compile the embedded schemas.
    ///
    /// # Errors
    ///
    /// Returns `SchemaValidationError::ValidatorBuildError` if an embedded
    /// schema is not valid JSON or not a valid Draft 2020-12 schema.
    pub fn new() -> Result<Self, SchemaValidationError> {
        let mut validators = HashMap::new();
        for kind in RecordKind::ALL {
            validators.insert(kind, build_validator(kind)?);
        }
        Ok(Self { validators })
    }

    /// Validate a parsed document of the given kind, normalizing its date
    /// fields in place first.
    ///
    /// # Errors
    ///
    /// Returns `SchemaValidationError::ValidationFailed` listing every
    /// violation found in the document.
    pub fn validate_document(
        &self,
        kind: RecordKind,
        instance: &mut Value,
    ) -> Result<(), SchemaValidationError> {
        narrow_integral_floats(instance);
        let mut errors = normalize_dates(kind, instance);

        if let Some(validator) = self.validators.get(&kind) {
            errors.extend(validator.iter_errors(&*instance).map(|e| Violation {
                instance_path: e.instance_path.to_string(),
                schema_path: e.schema_path.to_string(),
                message: e.to_string(),
            }));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SchemaValidationError::ValidationFailed {
                schema_name: kind.schema_name().to_string(),
                violations: ValidationViolations::sorted(errors),
            })
        }
    }

    /// Validate a parsed document and decode it into its typed record.
    pub fn decode<T: ContentRecord>(&self, mut instance: Value) -> Result<T, SchemaValidationError> {
        self.validate_document(T::KIND, &mut instance)?;

        // Integral floats were narrowed before validation, so every number
        // the schema accepts as an integer also decodes as one. Anything
        // left failing here is a mismatch between schema and record type.
        serde_json::from_value(instance).map_err(|e| SchemaValidationError::ValidationFailed {
            schema_name: T::KIND.schema_name().to_string(),
            violations: ValidationViolations::at_root(format!("cannot decode {}: {e}", T::KIND)),
        })
    }

    /// Parse document text in `format`, validate it, and decode it.
    ///
    /// # Errors
    ///
    /// Returns `SchemaValidationError::DocumentParse` for malformed text and
    /// `SchemaValidationError::ValidationFailed` for schema violations.
    pub fn decode_str<T: ContentRecord>(
        &self,
        content: &str,
        format: DocumentFormat,
    ) -> Result<T, SchemaValidationError> {
        let instance = format
            .parse(content)
            .map_err(|reason| SchemaValidationError::DocumentParse { format, reason })?;
        self.decode(instance)
    }
}

fn build_validator(kind: RecordKind) -> Result<Validator, SchemaValidationError> {
    let schema_name = kind.schema_name();
    let schema: Value = serde_json::from_str(embedded_schema(kind)).map_err(|e| {
        SchemaValidationError::ValidatorBuildError {
            schema_name: schema_name.to_string(),
            reason: format!("invalid JSON: {e}"),
        }
    })?;

    let mut opts = jsonschema::options();
    opts.with_draft(jsonschema::Draft::Draft202012);
    opts.build(&schema)
        .map_err(|e| SchemaValidationError::ValidatorBuildError {
            schema_name: schema_name.to_string(),
            reason: e.to_string(),
        })
}
