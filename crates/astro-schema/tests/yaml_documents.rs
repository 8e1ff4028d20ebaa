//! Integration test: decode realistic YAML content documents end to end
//! (parse → date normalization → schema validation → typed record).

use astro_core::{CaptureMode, CompositionType, Equipment, EquipmentKind, Image, Location, Object};
use astro_schema::{DocumentFormat, SchemaValidationError, SchemaValidator};

const IMAGE_YAML: &str = r#"
id: img_2025_m42
title: The Great Orion Nebula
date: 2025-12-26
capture_mode: deep_sky
composition_type: mosaic
location_id: loc_backyard
targets:
  - obj_m42
  - obj_m43
equipment:
  scope_id: eq_redcat51
  mount_id: eq_am5
  camera_id: eq_asi2600mc
capture:
  focal_length_mm: 250
  notes: Bortle 6, some high cloud after midnight
acquisitions:
  - date: 2025-12-25T23:40:00+01:00
    frames: 120
    exposure_s: 60
    filter_id: eq_lextreme
  - date: 2025-12-26
    frames: 155
    exposure_s: 45.0
assets:
  version: 3
seo:
  keywords: [orion, nebula, mosaic]
"#;

const OBJECT_YAML: &str = r#"
id: obj_m42
slug: orion-nebula
title: Orion Nebula
domain: deep_sky
object_type: emission nebula
catalogs:
  messier: M42
  ngc: 1976
constellation: Orion
coordinates:
  ra: 05h 35m 17s
  dec: -05° 23′ 28″
magnitude: 4.0
angular_size:
  major_arcmin: 85
  minor_arcmin: 60
description: |
  A diffuse nebula south of Orion's Belt.
aliases: [Great Orion Nebula]
"#;

const EQUIPMENT_YAML: &str = r#"
id: eq_asi2600mc
slug: zwo-asi2600mc-pro
kind: camera
brand: ZWO
model: ASI2600MC Pro
summary: Cooled APS-C one-shot-colour camera.
specs:
  sensor: Sony IMX571
  pixel_size_um: 3.76
  cooled: true
"#;

const LOCATION_JSON: &str = r#"{
  "id": "loc_backyard",
  "slug": "backyard",
  "name": "Backyard observatory",
  "latitude": 52.37,
  "longitude": 4.89,
  "bortle": 6,
  "timezone": "Europe/Amsterdam"
}"#;

#[test]
fn image_yaml_decodes_with_normalized_dates() {
    let validator = SchemaValidator::new().expect("schemas compile");
    let image: Image = validator
        .decode_str(IMAGE_YAML, DocumentFormat::Yaml)
        .expect("image is valid");

    assert_eq!(image.capture_mode, CaptureMode::DeepSky);
    assert_eq!(image.composition_type, CompositionType::Mosaic);
    assert_eq!(image.targets.len(), 2);
    // 23:40 at +01:00 is 22:40 UTC on the same night.
    assert_eq!(image.acquisitions[0].date.to_iso_date(), "2025-12-25");
    assert_eq!(image.acquisitions[1].exposure_s, 45.0);
    assert_eq!(image.assets.version, 3);
    assert!(image.skychart.is_none());
    assert_eq!(image.seo.map(|s| s.keywords.len()), Some(3));
}

#[test]
fn object_yaml_decodes() {
    let validator = SchemaValidator::new().expect("schemas compile");
    let object: Object = validator
        .decode_str(OBJECT_YAML, DocumentFormat::Yaml)
        .expect("object is valid");
    assert_eq!(object.slug.as_str(), "orion-nebula");
    assert_eq!(object.catalogs.get("ngc").map(String::as_str), Some("1976"));
    assert_eq!(object.angular_size.map(|a| a.major_arcmin), Some(85.0));
    assert_eq!(object.aliases, ["Great Orion Nebula"]);
}

#[test]
fn equipment_yaml_decodes() {
    let validator = SchemaValidator::new().expect("schemas compile");
    let equipment: Equipment = validator
        .decode_str(EQUIPMENT_YAML, DocumentFormat::Yaml)
        .expect("equipment is valid");
    assert_eq!(equipment.kind, EquipmentKind::Camera);
    assert_eq!(equipment.specs.len(), 3);
}

#[test]
fn location_json_decodes() {
    let validator = SchemaValidator::new().expect("schemas compile");
    let location: Location = validator
        .decode_str(LOCATION_JSON, DocumentFormat::Json)
        .expect("location is valid");
    assert_eq!(location.bortle, Some(6));
    assert_eq!(location.timezone.as_deref(), Some("Europe/Amsterdam"));
}

#[test]
fn document_of_wrong_kind_is_rejected() {
    let validator = SchemaValidator::new().expect("schemas compile");
    let err = validator
        .decode_str::<Location>(OBJECT_YAML, DocumentFormat::Yaml)
        .unwrap_err();
    match err {
        SchemaValidationError::ValidationFailed { schema_name, violations } => {
            assert_eq!(schema_name, "location.schema.json");
            assert!(violations.fields().count() > 1, "got: {violations}");
        }
        other => panic!("Expected ValidationFailed, got: {other}"),
    }
}

#[test]
fn scalar_document_is_a_schema_violation() {
    let validator = SchemaValidator::new().expect("schemas compile");
    let err = validator
        .decode_str::<Object>("just some text\n", DocumentFormat::Yaml)
        .unwrap_err();
    assert!(matches!(err, SchemaValidationError::ValidationFailed { .. }));
}
