//! # Core Error Types
//!
//! Errors raised when constructing core values from raw input. Content
//! loading errors (parse failures, duplicates, dangling references) live
//! in `astro-content`.

use thiserror::Error;

/// Error constructing a core value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A date string was not a valid `YYYY-MM-DD` calendar date.
    #[error("invalid calendar date {value:?}: {reason}")]
    InvalidDate {
        /// The rejected input.
        value: String,
        /// Why it was rejected.
        reason: String,
    },
}
