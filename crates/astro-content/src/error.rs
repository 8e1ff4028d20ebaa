//! Content loading errors.
//!
//! Every variant is fatal to a dataset load. Each carries enough context to
//! find and fix the offending document: the file, the field path, the
//! value.

use std::path::PathBuf;

use astro_core::RecordKind;
use astro_schema::{SchemaValidationError, ValidationViolations};
use thiserror::Error;

/// Errors that abort a content load.
#[derive(Debug, Error)]
pub enum ContentError {
    /// A content directory or document could not be read.
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A document is not well-formed in its serialization format.
    #[error("failed to parse {path}: {detail}")]
    ParseFailure { path: PathBuf, detail: String },

    /// A well-formed document violates its kind's schema.
    #[error("invalid {kind} document {path}:\n{violations}")]
    SchemaViolation {
        kind: RecordKind,
        path: PathBuf,
        violations: ValidationViolations,
    },

    /// Two records of one kind share an `id`.
    #[error("duplicate {kind} id {id:?} in {first} and {second}")]
    DuplicateIdentifier {
        kind: RecordKind,
        id: String,
        first: PathBuf,
        second: PathBuf,
    },

    /// Two records of one kind share a `slug`.
    #[error("duplicate {kind} slug {slug:?} used by {first_id:?} and {second_id:?}")]
    DuplicateSlug {
        kind: RecordKind,
        slug: String,
        first_id: String,
        second_id: String,
    },

    /// An image references a record that does not exist.
    #[error("image {image_id:?} {field} references unknown {target} {missing_id:?}")]
    DanglingReference {
        image_id: String,
        /// Document field holding the reference, e.g. `targets[1]`.
        field: String,
        target: RecordKind,
        missing_id: String,
    },

    /// The embedded schemas could not be compiled.
    #[error("schema setup failed: {0}")]
    Schema(#[from] SchemaValidationError),

    /// A collection load task panicked or was cancelled.
    #[error("content load task failed: {0}")]
    Task(String),
}

impl ContentError {
    /// True when the content itself is at fault and editing documents will
    /// fix it; false for I/O, setup and task failures.
    pub fn is_invalid_content(&self) -> bool {
        matches!(
            self,
            Self::ParseFailure { .. }
                | Self::SchemaViolation { .. }
                | Self::DuplicateIdentifier { .. }
                | Self::DuplicateSlug { .. }
                | Self::DanglingReference { .. }
        )
    }
}

/// Result type alias for content operations.
pub type ContentResult<T> = Result<T, ContentError>;
