//! # Content Records
//!
//! Typed shapes of the four record kinds. Values of these types only come
//! out of the schema layer, so field constraints (positive counts,
//! non-empty target lists, Bortle range, ...) already hold; these structs
//! do not re-check them.
//!
//! References between records are by `id` newtype. Whether they resolve
//! is checked across collections by `astro-content`.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::{CaptureMode, CompositionType, EquipmentKind, RecordKind};
use crate::identity::{EquipmentId, ImageId, LocationId, ObjectId, Slug};
use crate::temporal::ContentDate;

/// Behaviour shared by every record kind.
pub trait ContentRecord: DeserializeOwned + Send + Sync + 'static {
    /// The collection this record belongs to.
    const KIND: RecordKind;

    /// The record's `id`, unique within its kind.
    fn id(&self) -> &str;

    /// The record's URL-facing slug. `None` for kinds without one.
    fn slug(&self) -> Option<&Slug> {
        None
    }
}

// ---------------------------------------------------------------------------
// Image
// ---------------------------------------------------------------------------

/// An astrophotograph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub id: ImageId,
    pub title: String,
    /// Capture night (or final night, for multi-night projects).
    pub date: ContentDate,
    pub capture_mode: CaptureMode,
    pub composition_type: CompositionType,
    pub location_id: LocationId,
    /// Objects in the frame, in display order. Never empty.
    pub targets: Vec<ObjectId>,
    pub equipment: EquipmentRefs,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capture: Option<CaptureParams>,
    /// Capture sessions, in document order. Never empty.
    pub acquisitions: Vec<Acquisition>,
    pub assets: AssetVersion,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skychart: Option<Skychart>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seo: Option<Seo>,
}

impl Image {
    /// Whether `object_id` is one of this image's targets.
    pub fn targets_object(&self, object_id: &str) -> bool {
        self.targets.iter().any(|t| t.as_str() == object_id)
    }
}

impl ContentRecord for Image {
    const KIND: RecordKind = RecordKind::Image;

    fn id(&self) -> &str {
        self.id.as_str()
    }
}

/// The imaging train used for an image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipmentRefs {
    pub scope_id: EquipmentId,
    pub mount_id: EquipmentId,
    pub camera_id: EquipmentId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter_id: Option<EquipmentId>,
}

impl EquipmentRefs {
    /// Every equipment reference with the document field it came from.
    pub fn references(&self) -> Vec<(&'static str, &EquipmentId)> {
        let mut refs = vec![
            ("equipment.scope_id", &self.scope_id),
            ("equipment.mount_id", &self.mount_id),
            ("equipment.camera_id", &self.camera_id),
        ];
        if let Some(filter_id) = &self.filter_id {
            refs.push(("equipment.filter_id", filter_id));
        }
        refs
    }
}

/// Optional capture parameters. Each field is independently optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CaptureParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focal_length_mm: Option<f64>,
    /// Arcseconds per pixel.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pixel_scale: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gain: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// One capture session: `frames` sub-exposures of `exposure_s` seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Acquisition {
    pub date: ContentDate,
    pub frames: u32,
    pub exposure_s: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter_id: Option<EquipmentId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Version of the image's binary derivatives. Bumped whenever they are
/// regenerated; the storage keys embed it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetVersion {
    pub version: u32,
}

/// An annotated star chart rendered for the image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skychart {
    pub version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

/// Search-engine metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
}

// ---------------------------------------------------------------------------
// Object
// ---------------------------------------------------------------------------

/// A celestial object that images target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Object {
    pub id: ObjectId,
    pub slug: Slug,
    pub title: String,
    pub domain: CaptureMode,
    /// Free-form classification ("emission nebula", "planet", ...).
    pub object_type: String,
    /// Catalog name to designation, e.g. `messier: M42`, `ngc: 1976`.
    #[serde(
        default,
        deserialize_with = "deserialize_catalogs",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub catalogs: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constellation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub magnitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub angular_size: Option<AngularSize>,
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
}

impl ContentRecord for Object {
    const KIND: RecordKind = RecordKind::Object;

    fn id(&self) -> &str {
        self.id.as_str()
    }

    fn slug(&self) -> Option<&Slug> {
        Some(&self.slug)
    }
}

/// Equatorial coordinates as written in the document (e.g. `05h 35m 17s`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coordinates {
    pub ra: String,
    pub dec: String,
}

/// Apparent size in arcminutes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AngularSize {
    pub major_arcmin: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minor_arcmin: Option<f64>,
}

/// Catalog designations may be written as text or as bare numbers.
fn deserialize_catalogs<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Designation {
        Text(String),
        Number(serde_json::Number),
    }

    let raw = BTreeMap::<String, Designation>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .map(|(catalog, designation)| {
            let designation = match designation {
                Designation::Text(s) => s,
                Designation::Number(n) => n.to_string(),
            };
            (catalog, designation)
        })
        .collect())
}

// ---------------------------------------------------------------------------
// Equipment
// ---------------------------------------------------------------------------

/// A piece of imaging equipment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    pub id: EquipmentId,
    pub slug: Slug,
    pub kind: EquipmentKind,
    pub brand: String,
    pub model: String,
    pub summary: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub specs: BTreeMap<String, SpecValue>,
}

impl ContentRecord for Equipment {
    const KIND: RecordKind = RecordKind::Equipment;

    fn id(&self) -> &str {
        self.id.as_str()
    }

    fn slug(&self) -> Option<&Slug> {
        Some(&self.slug)
    }
}

/// A free-form equipment spec value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SpecValue {
    Flag(bool),
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for SpecValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flag(b) => write!(f, "{}", if *b { "yes" } else { "no" }),
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

// ---------------------------------------------------------------------------
// Location
// ---------------------------------------------------------------------------

/// An observing site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: LocationId,
    pub slug: Slug,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Bortle dark-sky class, 1 (darkest) to 9.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bortle: Option<u8>,
    /// IANA zone name, e.g. `Europe/Berlin`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ContentRecord for Location {
    const KIND: RecordKind = RecordKind::Location;

    fn id(&self) -> &str {
        self.id.as_str()
    }

    fn slug(&self) -> Option<&Slug> {
        Some(&self.slug)
    }
}
