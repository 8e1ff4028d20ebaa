//! # Directory Loader
//!
//! Reads every content document in one kind's directory, in lexicographic
//! file-name order, and validates each through the schema layer.
//!
//! Load order is significant: the integrity checker walks records in this
//! order, so "first duplicate" messages are reproducible, and images with
//! equal dates keep this order after sorting.
//!
//! Loading is fail-fast. The first unreadable, unparsable, or invalid
//! document aborts the load; nothing is skipped.

use std::path::{Path, PathBuf};

use astro_core::{ContentRecord, Equipment, Image, Location, Object};
use astro_schema::{DocumentFormat, SchemaValidationError, SchemaValidator};

use crate::error::{ContentError, ContentResult};

/// A validated record and the document it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedRecord<T> {
    pub source: PathBuf,
    pub record: T,
}

/// The four collections in load order, before integrity checks and sorting.
#[derive(Debug, Clone, Default)]
pub struct LoadedContent {
    pub images: Vec<LoadedRecord<Image>>,
    pub objects: Vec<LoadedRecord<Object>>,
    pub equipment: Vec<LoadedRecord<Equipment>>,
    pub locations: Vec<LoadedRecord<Location>>,
}

impl LoadedContent {
    /// Total number of documents across all collections.
    pub fn document_count(&self) -> usize {
        self.images.len() + self.objects.len() + self.equipment.len() + self.locations.len()
    }
}

/// Load and validate every document of kind `T` in `dir`.
///
/// A missing directory is an empty collection (logged at `warn`); any other
/// read error is fatal.
///
/// # Errors
///
/// - `ContentError::Read` if the directory or a document cannot be read.
/// - `ContentError::ParseFailure` if a document is malformed or not UTF-8.
/// - `ContentError::SchemaViolation` if a document fails validation.
pub fn load_collection<T: ContentRecord>(
    validator: &SchemaValidator,
    dir: &Path,
) -> ContentResult<Vec<LoadedRecord<T>>> {
    let files = document_files(dir)?;
    let mut records = Vec::with_capacity(files.len());

    for (path, format) in files {
        let bytes = std::fs::read(&path).map_err(|source| ContentError::Read {
            path: path.clone(),
            source,
        })?;
        let content = String::from_utf8(bytes).map_err(|e| ContentError::ParseFailure {
            path: path.clone(),
            detail: format!("invalid UTF-8: {e}"),
        })?;

        let record: T = validator
            .decode_str(&content, format)
            .map_err(|e| document_error::<T>(&path, e))?;

        tracing::debug!(
            kind = %T::KIND,
            id = record.id(),
            path = %path.display(),
            "loaded document"
        );
        records.push(LoadedRecord {
            source: path,
            record,
        });
    }

    tracing::info!(
        kind = %T::KIND,
        count = records.len(),
        dir = %dir.display(),
        "loaded collection"
    );
    Ok(records)
}

/// Content documents in `dir`, sorted by file name.
///
/// Subdirectories and files with unrecognized extensions are ignored.
pub fn document_files(dir: &Path) -> ContentResult<Vec<(PathBuf, DocumentFormat)>> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!(dir = %dir.display(), "content directory not found, treating as empty");
            return Ok(Vec::new());
        }
        Err(source) => {
            return Err(ContentError::Read {
                path: dir.to_path_buf(),
                source,
            })
        }
    };

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| ContentError::Read {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if let Some(format) = DocumentFormat::from_path(&path) {
            files.push((path, format));
        }
    }

    if files.is_empty() {
        tracing::warn!(dir = %dir.display(), "no YAML or JSON documents found");
    }
    files.sort_by(|(a, _), (b, _)| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

fn document_error<T: ContentRecord>(path: &Path, err: SchemaValidationError) -> ContentError {
    match err {
        SchemaValidationError::DocumentParse { reason, .. } => ContentError::ParseFailure {
            path: path.to_path_buf(),
            detail: reason,
        },
        SchemaValidationError::ValidationFailed { violations, .. } => {
            ContentError::SchemaViolation {
                kind: T::KIND,
                path: path.to_path_buf(),
                violations,
            }
        }
        other => ContentError::Schema(other),
    }
}
