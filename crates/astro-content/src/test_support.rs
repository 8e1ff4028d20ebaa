//! Record builders shared by unit tests.

use std::fs;
use std::path::{Path, PathBuf};

use astro_core::{
    Acquisition, AssetVersion, CaptureMode, CompositionType, ContentDate, Equipment, EquipmentId,
    EquipmentKind, EquipmentRefs, Image, ImageId, Location, LocationId, Object, ObjectId, Slug,
};

use crate::loader::{LoadedContent, LoadedRecord};

pub fn loaded<T>(file: &str, record: T) -> LoadedRecord<T> {
    LoadedRecord {
        source: PathBuf::from(file),
        record,
    }
}

pub fn object(id: &str, slug: &str) -> Object {
    Object {
        id: ObjectId::new(id),
        slug: Slug::new(slug),
        title: id.to_string(),
        domain: CaptureMode::DeepSky,
        object_type: "nebula".to_string(),
        catalogs: Default::default(),
        constellation: None,
        coordinates: None,
        magnitude: None,
        angular_size: None,
        description: "test object".to_string(),
        aliases: Vec::new(),
    }
}

pub fn equipment(id: &str, slug: &str, kind: EquipmentKind) -> Equipment {
    Equipment {
        id: EquipmentId::new(id),
        slug: Slug::new(slug),
        kind,
        brand: "Brand".to_string(),
        model: id.to_string(),
        summary: "test equipment".to_string(),
        specs: Default::default(),
    }
}

pub fn location(id: &str, slug: &str) -> Location {
    Location {
        id: LocationId::new(id),
        slug: Slug::new(slug),
        name: id.to_string(),
        latitude: 52.0,
        longitude: 4.0,
        bortle: None,
        timezone: None,
        description: None,
    }
}

pub fn date(s: &str) -> ContentDate {
    ContentDate::parse(s).unwrap()
}

/// An image dated 2025-12-26 targeting `obj_m42` from `loc_home`, shot
/// with `eq_scope`/`eq_mount`/`eq_camera`, one acquisition of 10x60s.
pub fn image(id: &str) -> Image {
    Image {
        id: ImageId::new(id),
        title: id.to_string(),
        date: date("2025-12-26"),
        capture_mode: CaptureMode::DeepSky,
        composition_type: CompositionType::Single,
        location_id: LocationId::new("loc_home"),
        targets: vec![ObjectId::new("obj_m42")],
        equipment: EquipmentRefs {
            scope_id: EquipmentId::new("eq_scope"),
            mount_id: EquipmentId::new("eq_mount"),
            camera_id: EquipmentId::new("eq_camera"),
            filter_id: None,
        },
        capture: None,
        acquisitions: vec![Acquisition {
            date: date("2025-12-26"),
            frames: 10,
            exposure_s: 60.0,
            filter_id: None,
            notes: None,
        }],
        assets: AssetVersion { version: 1 },
        skychart: None,
        seo: None,
    }
}

/// One image and every record it references.
pub fn content() -> LoadedContent {
    LoadedContent {
        images: vec![loaded("images/a.yaml", image("img_a"))],
        objects: vec![loaded("objects/m42.yaml", object("obj_m42", "orion-nebula"))],
        equipment: vec![
            loaded("equipment/camera.yaml", equipment("eq_camera", "camera", EquipmentKind::Camera)),
            loaded("equipment/mount.yaml", equipment("eq_mount", "mount", EquipmentKind::Mount)),
            loaded("equipment/scope.yaml", equipment("eq_scope", "scope", EquipmentKind::Scope)),
        ],
        locations: vec![loaded("locations/home.yaml", location("loc_home", "home"))],
    }
}

/// Write documents with the same ids and references as [`content`] under `root`.
pub fn write_content_tree(root: &Path) {
    let files: [(&str, &str); 6] = [
        ("images/a.yaml", IMAGE_YAML),
        ("objects/m42.yaml", OBJECT_YAML),
        (
            "equipment/camera.yml",
            "id: eq_camera\nslug: camera\nkind: camera\nbrand: ZWO\nmodel: ASI2600MC\nsummary: Colour camera.\n",
        ),
        (
            "equipment/mount.yaml",
            "id: eq_mount\nslug: mount\nkind: mount\nbrand: ZWO\nmodel: AM5\nsummary: Harmonic mount.\n",
        ),
        (
            "equipment/scope.json",
            r#"{"id": "eq_scope", "slug": "scope", "kind": "scope", "brand": "William Optics", "model": "RedCat 51", "summary": "Petzval refractor."}"#,
        ),
        (
            "locations/home.yaml",
            "id: loc_home\nslug: home\nname: Home\nlatitude: 52.37\nlongitude: 4.89\nbortle: 6\n",
        ),
    ];
    for (rel, body) in files {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, body).unwrap();
    }
}

const IMAGE_YAML: &str = "\
id: img_a
title: Orion Nebula
date: 2025-12-26
capture_mode: deep_sky
composition_type: single
location_id: loc_home
targets: [obj_m42]
equipment:
  scope_id: eq_scope
  mount_id: eq_mount
  camera_id: eq_camera
acquisitions:
  - date: 2025-12-26
    frames: 10
    exposure_s: 60
assets:
  version: 1
";

const OBJECT_YAML: &str = "\
id: obj_m42
slug: orion-nebula
title: Orion Nebula
domain: deep_sky
object_type: emission nebula
description: Bright nebula in Orion's sword.
";
