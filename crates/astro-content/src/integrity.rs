//! # Integrity Checker
//!
//! Cross-collection invariants that no single-document schema can see:
//!
//! 1. **Uniqueness**: `id` is unique within every kind; `slug` is unique
//!    within objects, equipment and locations.
//! 2. **Referential integrity**: every reference on every image names an
//!    existing record of the referenced kind (`location_id`, each
//!    `targets` entry, the equipment train, and acquisition filters).
//!
//! Records are visited in load order, so the first violation reported is
//! the same on every run. The checker never repairs or drops records.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::path::Path;

use astro_core::{ContentRecord, Image, RecordKind};

use crate::error::{ContentError, ContentResult};
use crate::loader::{LoadedContent, LoadedRecord};

/// Check uniqueness and referential integrity over all four collections.
///
/// # Errors
///
/// The first `DuplicateIdentifier`, `DuplicateSlug` or `DanglingReference`
/// encountered.
pub fn check_integrity(content: &LoadedContent) -> ContentResult<()> {
    check_unique(&content.images)?;
    check_unique(&content.objects)?;
    check_unique(&content.equipment)?;
    check_unique(&content.locations)?;

    let index = ReferenceIndex {
        objects: ids(&content.objects),
        equipment: ids(&content.equipment),
        locations: ids(&content.locations),
    };
    for loaded in &content.images {
        index.check_image(&loaded.record)?;
    }

    tracing::debug!(
        images = content.images.len(),
        objects = content.objects.len(),
        equipment = content.equipment.len(),
        locations = content.locations.len(),
        "integrity checks passed"
    );
    Ok(())
}

/// Check that `id` (and `slug`, where the kind has one) is unique.
pub fn check_unique<T: ContentRecord>(records: &[LoadedRecord<T>]) -> ContentResult<()> {
    let mut seen_ids: HashMap<&str, &Path> = HashMap::new();
    let mut seen_slugs: HashMap<&str, &str> = HashMap::new();

    for loaded in records {
        let id = loaded.record.id();
        match seen_ids.entry(id) {
            Entry::Occupied(first) => {
                return Err(ContentError::DuplicateIdentifier {
                    kind: T::KIND,
                    id: id.to_string(),
                    first: first.get().to_path_buf(),
                    second: loaded.source.clone(),
                });
            }
            Entry::Vacant(slot) => {
                slot.insert(&loaded.source);
            }
        }

        if let Some(slug) = loaded.record.slug() {
            match seen_slugs.entry(slug.as_str()) {
                Entry::Occupied(first_id) => {
                    return Err(ContentError::DuplicateSlug {
                        kind: T::KIND,
                        slug: slug.to_string(),
                        first_id: first_id.get().to_string(),
                        second_id: id.to_string(),
                    });
                }
                Entry::Vacant(slot) => {
                    slot.insert(id);
                }
            }
        }
    }
    Ok(())
}

fn ids<T: ContentRecord>(records: &[LoadedRecord<T>]) -> HashSet<&str> {
    records.iter().map(|r| r.record.id()).collect()
}

struct ReferenceIndex<'a> {
    objects: HashSet<&'a str>,
    equipment: HashSet<&'a str>,
    locations: HashSet<&'a str>,
}

impl ReferenceIndex<'_> {
    fn check_image(&self, image: &Image) -> ContentResult<()> {
        require(
            &self.locations,
            image,
            "location_id",
            RecordKind::Location,
            image.location_id.as_str(),
        )?;

        for (i, target) in image.targets.iter().enumerate() {
            require(
                &self.objects,
                image,
                &format!("targets[{i}]"),
                RecordKind::Object,
                target.as_str(),
            )?;
        }

        for (field, equipment_id) in image.equipment.references() {
            require(
                &self.equipment,
                image,
                field,
                RecordKind::Equipment,
                equipment_id.as_str(),
            )?;
        }

        for (i, acquisition) in image.acquisitions.iter().enumerate() {
            if let Some(filter_id) = &acquisition.filter_id {
                require(
                    &self.equipment,
                    image,
                    &format!("acquisitions[{i}].filter_id"),
                    RecordKind::Equipment,
                    filter_id.as_str(),
                )?;
            }
        }
        Ok(())
    }
}

fn require(
    known: &HashSet<&str>,
    image: &Image,
    field: &str,
    target: RecordKind,
    id: &str,
) -> ContentResult<()> {
    if known.contains(id) {
        Ok(())
    } else {
        Err(ContentError::DanglingReference {
            image_id: image.id.to_string(),
            field: field.to_string(),
            target,
            missing_id: id.to_string(),
        })
    }
}
