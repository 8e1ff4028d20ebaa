//! # Record Kinds and Enumerations
//!
//! `RecordKind` names the four collections of the content set. The other
//! enums are the closed value sets of enumerated record fields. Their
//! serde representation is the snake_case spelling used in the documents.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The four kinds of record in the content set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    /// An astrophotograph with its acquisition log.
    Image,
    /// A celestial object (galaxy, nebula, planet, ...).
    Object,
    /// A piece of imaging equipment.
    Equipment,
    /// An observing site.
    Location,
}

impl RecordKind {
    /// All kinds, in the order collections are loaded and checked.
    pub const ALL: [RecordKind; 4] = [
        RecordKind::Image,
        RecordKind::Object,
        RecordKind::Equipment,
        RecordKind::Location,
    ];

    /// Singular lowercase name used in messages.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Object => "object",
            Self::Equipment => "equipment",
            Self::Location => "location",
        }
    }

    /// Name of the content subdirectory holding this kind's documents.
    pub fn dir_name(self) -> &'static str {
        match self {
            Self::Image => "images",
            Self::Object => "objects",
            Self::Equipment => "equipment",
            Self::Location => "locations",
        }
    }

    /// File name of the JSON Schema describing this kind.
    pub fn schema_name(self) -> &'static str {
        match self {
            Self::Image => "image.schema.json",
            Self::Object => "object.schema.json",
            Self::Equipment => "equipment.schema.json",
            Self::Location => "location.schema.json",
        }
    }

    /// Whether records of this kind carry a unique `slug`.
    pub fn has_slug(self) -> bool {
        !matches!(self, Self::Image)
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How an image was captured, and the domain an object belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaptureMode {
    DeepSky,
    SolarSystem,
}

impl CaptureMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DeepSky => "deep_sky",
            Self::SolarSystem => "solar_system",
        }
    }
}

impl fmt::Display for CaptureMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether an image is a single field or a stitched mosaic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompositionType {
    Single,
    Mosaic,
}

impl CompositionType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Mosaic => "mosaic",
        }
    }
}

impl fmt::Display for CompositionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Role of an equipment record in an imaging train.
///
/// Equipment sorts by the lexicographic spelling of its kind, which is
/// what `as_str` returns; the derived `Ord` is not used for that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentKind {
    Scope,
    Mount,
    Camera,
    Filter,
}

impl EquipmentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Scope => "scope",
            Self::Mount => "mount",
            Self::Camera => "camera",
            Self::Filter => "filter",
        }
    }
}

impl fmt::Display for EquipmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_kind_names() {
        assert_eq!(RecordKind::Image.dir_name(), "images");
        assert_eq!(RecordKind::Location.dir_name(), "locations");
        assert_eq!(RecordKind::Equipment.schema_name(), "equipment.schema.json");
        assert!(!RecordKind::Image.has_slug());
        assert!(RecordKind::Object.has_slug());
    }

    #[test]
    fn capture_mode_serde_is_snake_case() {
        let mode: CaptureMode = serde_json::from_str("\"solar_system\"").unwrap();
        assert_eq!(mode, CaptureMode::SolarSystem);
        assert_eq!(serde_json::to_string(&CaptureMode::DeepSky).unwrap(), "\"deep_sky\"");
    }

    #[test]
    fn unknown_capture_mode_rejected() {
        assert!(serde_json::from_str::<CaptureMode>("\"planetary\"").is_err());
    }

    #[test]
    fn equipment_kind_serde_matches_as_str() {
        for kind in [
            EquipmentKind::Scope,
            EquipmentKind::Mount,
            EquipmentKind::Camera,
            EquipmentKind::Filter,
        ] {
            assert_eq!(serde_json::to_value(kind).unwrap(), kind.as_str());
        }
        assert!(serde_json::from_str::<EquipmentKind>("\"focuser\"").is_err());
    }
}
