//! # astro-content: Content Loading Engine
//!
//! Loads the four content collections from a content root, validates every
//! document, checks cross-collection integrity, and exposes the result as
//! an immutable, sorted, memoized [`Dataset`].
//!
//! ## Pipeline
//!
//! ```text
//! ContentStore::dataset()
//!   └─ load_dataset(root)                 (once per store)
//!        ├─ load_collection::<Image>       ┐
//!        ├─ load_collection::<Object>      │ concurrent, one per
//!        ├─ load_collection::<Equipment>   │ content subdirectory
//!        ├─ load_collection::<Location>    ┘
//!        └─ Dataset::assemble              (integrity check, then sort)
//! ```
//!
//! Every failure is fatal to the whole load: there is no partial dataset.
//! Point lookups on a loaded [`Dataset`] return `Option`, since absence is
//! an ordinary outcome there.
//!
//! The [`assets`] and [`integration`] modules are pure derivations over a
//! single validated [`astro_core::Image`].
//!
//! ## Crate Policy
//!
//! - Never writes to the content tree or to asset storage.
//! - No `.unwrap()` outside tests.

pub mod assets;
pub mod config;
pub mod dataset;
pub mod error;
pub mod integration;
pub mod integrity;
pub mod loader;

#[cfg(test)]
mod test_support;

pub use assets::{
    asset_key, asset_url, derivative_keys, key_url, skychart_key, skychart_url, AssetKind,
    DerivativeManifest,
};
pub use config::{AssetConfig, ConfigError, ContentConfig};
pub use dataset::{load_dataset, ContentStore, Dataset, DatasetResult};
pub use error::{ContentError, ContentResult};
pub use integration::{acquisition_integration, format_integration, image_total_integration};
pub use integrity::check_integrity;
pub use loader::{load_collection, LoadedContent, LoadedRecord};
