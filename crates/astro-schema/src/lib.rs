//! # astro-schema: Schema Layer
//!
//! Turns a raw document (YAML or JSON text) into a validated, typed record.
//!
//! ## Pipeline
//!
//! 1. [`document`] parses the text and converts YAML into a
//!    `serde_json::Value` tree (tags stripped, integral floats narrowed).
//! 2. [`normalize`] rewrites date/time values in date fields to their
//!    `YYYY-MM-DD` calendar date. This runs *before* validation so the
//!    schema's date pattern sees the normalized text.
//! 3. [`validate`] narrows integral floats in the tree whatever its source
//!    format, checks it against the kind's JSON Schema and
//!    reports every violated constraint with its instance path, then
//!    decodes it into the `astro-core` record type.
//!
//! The schemas live in the repository's `schemas/` directory and are
//! compiled into the binary, so validation never touches the filesystem.
//!
//! ## Crate Policy
//!
//! - Depends only on `astro-core` internally.
//! - Expected validation failures are returned as values, never panics.

pub mod document;
pub mod normalize;
pub mod validate;

pub use document::DocumentFormat;
pub use validate::{SchemaValidationError, SchemaValidator, ValidationViolations, Violation};
