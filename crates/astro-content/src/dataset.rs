//! # Dataset Assembler
//!
//! Orchestrates a full content load and owns the canonical in-memory
//! dataset.
//!
//! ## Sort Orders
//!
//! | Collection | Order |
//! |------------|-------|
//! | images     | date descending; equal dates keep file-name order |
//! | objects    | title ascending |
//! | equipment  | kind ascending, then model ascending |
//! | locations  | name ascending |
//!
//! All string comparisons are byte-wise, so results do not depend on the
//! host locale.
//!
//! ## Memoization
//!
//! [`ContentStore`] is the process-scoped handle. The first call to
//! [`ContentStore::dataset`] runs the load; concurrent callers await that
//! same load, and later callers get the cached outcome. A failed load is
//! cached too: every caller sees the same error and nothing is re-read.
//! Tests build a fresh store per case instead of sharing one.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use astro_core::{ContentRecord, Equipment, Image, Location, Object, RecordKind};
use astro_schema::SchemaValidator;
use tokio::sync::OnceCell;

use crate::config::ContentConfig;
use crate::error::{ContentError, ContentResult};
use crate::integrity::check_integrity;
use crate::loader::{load_collection, LoadedContent, LoadedRecord};

/// Validated, cross-referenced, sorted content. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    images: Vec<Image>,
    objects: Vec<Object>,
    equipment: Vec<Equipment>,
    locations: Vec<Location>,
    document_count: usize,
}

impl Dataset {
    /// Check integrity over load-ordered content, then sort each collection.
    pub fn assemble(content: LoadedContent) -> ContentResult<Self> {
        check_integrity(&content)?;
        let document_count = content.document_count();

        let mut images = records(content.images);
        let mut objects = records(content.objects);
        let mut equipment = records(content.equipment);
        let mut locations = records(content.locations);

        // `sort_by` is stable: same-day images stay in load order.
        images.sort_by(|a, b| b.date.cmp(&a.date));
        objects.sort_by(|a, b| a.title.cmp(&b.title));
        equipment.sort_by(|a, b| {
            a.kind
                .as_str()
                .cmp(b.kind.as_str())
                .then_with(|| a.model.cmp(&b.model))
        });
        locations.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(Self {
            images,
            objects,
            equipment,
            locations,
            document_count,
        })
    }

    pub fn images(&self) -> &[Image] {
        &self.images
    }

    pub fn objects(&self) -> &[Object] {
        &self.objects
    }

    pub fn equipment(&self) -> &[Equipment] {
        &self.equipment
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    /// Number of documents the dataset was built from.
    pub fn document_count(&self) -> usize {
        self.document_count
    }

    pub fn image(&self, id: &str) -> Option<&Image> {
        self.images.iter().find(|i| i.id.as_str() == id)
    }

    pub fn object(&self, id: &str) -> Option<&Object> {
        self.objects.iter().find(|o| o.id.as_str() == id)
    }

    pub fn object_by_slug(&self, slug: &str) -> Option<&Object> {
        self.objects.iter().find(|o| o.slug.as_str() == slug)
    }

    pub fn equipment_by_id(&self, id: &str) -> Option<&Equipment> {
        self.equipment.iter().find(|e| e.id.as_str() == id)
    }

    pub fn equipment_by_slug(&self, slug: &str) -> Option<&Equipment> {
        self.equipment.iter().find(|e| e.slug.as_str() == slug)
    }

    pub fn location(&self, id: &str) -> Option<&Location> {
        self.locations.iter().find(|l| l.id.as_str() == id)
    }

    pub fn location_by_slug(&self, slug: &str) -> Option<&Location> {
        self.locations.iter().find(|l| l.slug.as_str() == slug)
    }

    /// Images whose `targets` include `object_id`, in canonical image order.
    /// Empty when nothing targets the object, or the object does not exist.
    pub fn images_for_object(&self, object_id: &str) -> Vec<&Image> {
        self.images
            .iter()
            .filter(|i| i.targets_object(object_id))
            .collect()
    }
}

fn records<T>(loaded: Vec<LoadedRecord<T>>) -> Vec<T> {
    loaded.into_iter().map(|l| l.record).collect()
}

/// Load, check and sort everything under `root`.
///
/// The four collections are loaded concurrently on the blocking pool; the
/// integrity check waits for all of them.
///
/// # Errors
///
/// The first error from any collection load, or the first integrity
/// violation.
pub async fn load_dataset(root: &Path) -> ContentResult<Dataset> {
    let validator = Arc::new(SchemaValidator::new()?);

    let (images, objects, equipment, locations) = tokio::try_join!(
        spawn_load::<Image>(&validator, root),
        spawn_load::<Object>(&validator, root),
        spawn_load::<Equipment>(&validator, root),
        spawn_load::<Location>(&validator, root),
    )?;

    let dataset = Dataset::assemble(LoadedContent {
        images,
        objects,
        equipment,
        locations,
    })?;

    tracing::info!(
        root = %root.display(),
        documents = dataset.document_count(),
        images = dataset.images().len(),
        objects = dataset.objects().len(),
        equipment = dataset.equipment().len(),
        locations = dataset.locations().len(),
        "content dataset assembled"
    );
    Ok(dataset)
}

async fn spawn_load<T: ContentRecord>(
    validator: &Arc<SchemaValidator>,
    root: &Path,
) -> ContentResult<Vec<LoadedRecord<T>>> {
    let validator = Arc::clone(validator);
    let dir = collection_dir(root, T::KIND);
    tokio::task::spawn_blocking(move || load_collection::<T>(&validator, &dir))
        .await
        .map_err(|e| ContentError::Task(format!("{} load: {e}", T::KIND)))?
}

/// The subdirectory of `root` holding documents of `kind`.
pub fn collection_dir(root: &Path, kind: RecordKind) -> PathBuf {
    root.join(kind.dir_name())
}

/// Outcome of the single memoized load. Errors are shared, not cloned.
pub type DatasetResult = Result<Arc<Dataset>, Arc<ContentError>>;

/// Process-scoped, init-on-first-use handle to the dataset under one root.
#[derive(Debug)]
pub struct ContentStore {
    root: PathBuf,
    cell: OnceCell<DatasetResult>,
}

impl ContentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            cell: OnceCell::new(),
        }
    }

    pub fn from_config(config: &ContentConfig) -> Self {
        Self::new(config.content_dir.clone())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The dataset, loading it on first use.
    pub async fn dataset(&self) -> DatasetResult {
        self.cell
            .get_or_init(|| async {
                load_dataset(&self.root)
                    .await
                    .map(Arc::new)
                    .map_err(|e| {
                        tracing::debug!(root = %self.root.display(), error = %e, "content load failed");
                        Arc::new(e)
                    })
            })
            .await
            .clone()
    }

    /// The cached outcome, if a load has completed. Never blocks.
    pub fn get(&self) -> Option<&DatasetResult> {
        self.cell.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{content, date, equipment, image, loaded, object, write_content_tree};
    use astro_core::{EquipmentKind, ObjectId};
    use std::fs;
    use tempfile::TempDir;

    fn image_ids(dataset: &Dataset) -> Vec<&str> {
        dataset.images().iter().map(|i| i.id.as_str()).collect()
    }

    #[test]
    fn objects_sorted_by_title() {
        let mut c = content();
        let mut orion = object("obj_m42", "orion-nebula");
        orion.title = "Orion Nebula".to_string();
        let mut andromeda = object("obj_m31", "andromeda-galaxy");
        andromeda.title = "Andromeda Galaxy".to_string();
        c.objects = vec![loaded("objects/a.yaml", orion), loaded("objects/b.yaml", andromeda)];

        let dataset = Dataset::assemble(c).unwrap();
        let titles: Vec<&str> = dataset.objects().iter().map(|o| o.title.as_str()).collect();
        assert_eq!(titles, ["Andromeda Galaxy", "Orion Nebula"]);
    }

    #[test]
    fn images_newest_first_with_stable_ties() {
        let mut c = content();
        let mut old = image("img_old");
        old.date = date("2024-03-01");
        let mut newest = image("img_new");
        newest.date = date("2026-01-02");
        c.images = vec![
            loaded("images/1.yaml", image("img_b")),
            loaded("images/2.yaml", old),
            loaded("images/3.yaml", image("img_a")),
            loaded("images/4.yaml", newest),
        ];

        let dataset = Dataset::assemble(c).unwrap();
        assert_eq!(image_ids(&dataset), ["img_new", "img_b", "img_a", "img_old"]);
    }

    #[test]
    fn equipment_sorted_by_kind_then_model() {
        let mut c = content();
        let mut wide = equipment("eq_zz_scope", "wide", EquipmentKind::Scope);
        wide.model = "Askar FRA400".to_string();
        c.equipment.push(loaded("equipment/wide.yaml", wide));
        c.equipment
            .push(loaded("equipment/ha.yaml", equipment("eq_ha", "ha", EquipmentKind::Filter)));

        let dataset = Dataset::assemble(c).unwrap();
        let order: Vec<(&str, &str)> = dataset
            .equipment()
            .iter()
            .map(|e| (e.kind.as_str(), e.model.as_str()))
            .collect();
        assert_eq!(
            order,
            [
                ("camera", "eq_camera"),
                ("filter", "eq_ha"),
                ("mount", "eq_mount"),
                ("scope", "Askar FRA400"),
                ("scope", "eq_scope"),
            ]
        );
    }

    #[test]
    fn lookups_return_none_when_absent() {
        let dataset = Dataset::assemble(content()).unwrap();
        assert!(dataset.image("img_a").is_some());
        assert!(dataset.image("img_zzz").is_none());
        assert_eq!(dataset.object_by_slug("orion-nebula").map(|o| o.id.as_str()), Some("obj_m42"));
        assert!(dataset.object_by_slug("crab-nebula").is_none());
        assert!(dataset.object("obj_m42").is_some());
        assert_eq!(dataset.equipment_by_slug("mount").map(|e| e.id.as_str()), Some("eq_mount"));
        assert!(dataset.equipment_by_id("eq_scope").is_some());
        assert!(dataset.location("loc_home").is_some());
        assert!(dataset.location_by_slug("home").is_some());
        assert!(dataset.location_by_slug("away").is_none());
        assert_eq!(dataset.document_count(), 6);
    }

    #[test]
    fn images_for_object_keeps_canonical_order() {
        let mut c = content();
        c.objects
            .push(loaded("objects/m43.yaml", object("obj_m43", "de-mairans-nebula")));
        let mut both = image("img_both");
        both.date = date("2026-02-01");
        both.targets.push(ObjectId::new("obj_m43"));
        let mut only_m43 = image("img_m43");
        only_m43.targets = vec![ObjectId::new("obj_m43")];
        c.images.push(loaded("images/b.yaml", both));
        c.images.push(loaded("images/c.yaml", only_m43));

        let dataset = Dataset::assemble(c).unwrap();
        let ids: Vec<&str> = dataset
            .images_for_object("obj_m42")
            .iter()
            .map(|i| i.id.as_str())
            .collect();
        assert_eq!(ids, ["img_both", "img_a"]);
        assert!(dataset.images_for_object("obj_none").is_empty());
    }

    #[test]
    fn integrity_failure_prevents_assembly() {
        let mut c = content();
        c.images[0].record.targets = vec![ObjectId::new("obj_missing")];
        assert!(matches!(
            Dataset::assemble(c),
            Err(ContentError::DanglingReference { .. })
        ));
    }

    #[tokio::test]
    async fn load_dataset_reads_all_collections() {
        let dir = TempDir::new().unwrap();
        write_content_tree(dir.path());

        let dataset = load_dataset(dir.path()).await.unwrap();
        assert_eq!(dataset.images().len(), 1);
        assert_eq!(dataset.objects().len(), 1);
        assert_eq!(dataset.equipment().len(), 3);
        assert_eq!(dataset.locations().len(), 1);
        assert_eq!(dataset.document_count(), 6);
    }

    #[tokio::test]
    async fn second_call_does_not_reread() {
        let dir = TempDir::new().unwrap();
        write_content_tree(dir.path());
        let store = ContentStore::new(dir.path());
        assert!(store.get().is_none());

        let first = store.dataset().await.unwrap();
        fs::remove_dir_all(dir.path().join("images")).unwrap();
        let second = store.dataset().await.unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.images().len(), 1);
        assert!(store.get().is_some());
    }

    #[tokio::test]
    async fn concurrent_callers_share_one_load() {
        let dir = TempDir::new().unwrap();
        write_content_tree(dir.path());
        let store = ContentStore::new(dir.path());

        let (a, b, c) = tokio::join!(store.dataset(), store.dataset(), store.dataset());
        let (a, b, c) = (a.unwrap(), b.unwrap(), c.unwrap());
        assert!(Arc::ptr_eq(&a, &b));
        assert!(Arc::ptr_eq(&b, &c));
    }

    #[tokio::test]
    async fn failure_is_memoized() {
        let dir = TempDir::new().unwrap();
        write_content_tree(dir.path());
        fs::remove_dir_all(dir.path().join("locations")).unwrap();
        let store = ContentStore::new(dir.path());

        let first = store.dataset().await.unwrap_err();
        assert!(matches!(*first, ContentError::DanglingReference { .. }));

        // Repairing the tree does not change the cached outcome.
        write_content_tree(dir.path());
        let second = store.dataset().await.unwrap_err();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn store_from_config_uses_content_dir() {
        let config = ContentConfig {
            content_dir: PathBuf::from("/srv/site/content"),
            ..ContentConfig::default()
        };
        let store = ContentStore::from_config(&config);
        assert_eq!(store.root(), Path::new("/srv/site/content"));
        assert_eq!(
            collection_dir(store.root(), RecordKind::Equipment),
            PathBuf::from("/srv/site/content/equipment")
        );
    }
}
