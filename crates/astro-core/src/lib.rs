//! # astro-core: Foundational Types for the Content Set
//!
//! Every other crate in the workspace depends on `astro-core`; it depends
//! on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for references.** `ImageId`, `ObjectId`,
//!    `EquipmentId`, `LocationId` and `Slug` are distinct types, so an
//!    image's `location_id` cannot be looked up in the object collection.
//!
//! 2. **One `RecordKind` enum.** Directory names, schema names and error
//!    messages all derive from it, and every `match` over it is exhaustive.
//!
//! 3. **Calendar dates, not timestamps.** `ContentDate` stores a
//!    `YYYY-MM-DD` calendar date; time-of-day input is normalized away by
//!    the schema layer before it reaches these types.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `astro-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod domain;
pub mod error;
pub mod identity;
pub mod record;
pub mod temporal;

pub use domain::{CaptureMode, CompositionType, EquipmentKind, RecordKind};
pub use error::CoreError;
pub use identity::{EquipmentId, ImageId, LocationId, ObjectId, Slug};
pub use record::{
    Acquisition, AngularSize, AssetVersion, CaptureParams, ContentRecord, Coordinates,
    Equipment, EquipmentRefs, Image, Location, Object, Seo, Skychart, SpecValue,
};
pub use temporal::ContentDate;
