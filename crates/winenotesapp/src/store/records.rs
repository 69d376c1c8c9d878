use super::backend::StorageBackend;
use super::blobs::BlobStore;
use crate::error::{Result, WineError};
use crate::model::{Wine, WineBase, WineCollection};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

/// CRUD over the wine collection.
///
/// Every mutation is a read-modify-write of the whole collection, performed
/// while holding the write side of `lock`. Reads take the read side, so they
/// never interleave with a write in progress and always see a whole file.
pub struct RecordStore<B: StorageBackend> {
    backend: Arc<B>,
    blobs: BlobStore<B>,
    lock: RwLock<()>,
}

impl<B: StorageBackend> RecordStore<B> {
    pub fn with_backend(backend: B) -> Self {
        let backend = Arc::new(backend);
        Self {
            blobs: BlobStore::new(Arc::clone(&backend)),
            backend,
            lock: RwLock::new(()),
        }
    }

    pub fn with_url_prefix(mut self, prefix: &str) -> Self {
        self.blobs = self.blobs.with_url_prefix(prefix);
        self
    }

    /// The photo store sharing this store's backend.
    pub fn blobs(&self) -> &BlobStore<B> {
        &self.blobs
    }

    /// The underlying storage backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn read_guard(&self) -> Result<RwLockReadGuard<'_, ()>> {
        self.lock
            .read()
            .map_err(|_| WineError::Storage("lock poisoned".to_string()))
    }

    fn write_guard(&self) -> Result<RwLockWriteGuard<'_, ()>> {
        self.lock
            .write()
            .map_err(|_| WineError::Storage("lock poisoned".to_string()))
    }

    /// Absent data is an empty collection. Unreadable data is an error, so a
    /// write never replaces a file we failed to understand.
    fn load(&self) -> Result<WineCollection> {
        let collection = self.backend.load_collection()?.unwrap_or_default();
        if let Some(id) = collection.duplicate_id() {
            return Err(WineError::Storage(format!(
                "Duplicate wine id in collection: {}",
                id
            )));
        }
        Ok(collection)
    }

    fn persist(&self, collection: &mut WineCollection) -> Result<()> {
        collection.touch();
        self.backend.save_collection(collection)
    }

    /// All records in stored order.
    pub fn list(&self) -> Result<Vec<Wine>> {
        let _guard = self.read_guard()?;
        Ok(self.load()?.wines)
    }

    pub fn get(&self, id: &Uuid) -> Result<Wine> {
        let _guard = self.read_guard()?;
        self.load()?
            .get(id)
            .cloned()
            .ok_or(WineError::WineNotFound(*id))
    }

    /// Append a new record. Fields are expected to be validated already.
    pub fn create(&self, fields: WineBase) -> Result<Wine> {
        let _guard = self.write_guard()?;
        let mut collection = self.load()?;

        let mut wine = Wine::new(fields);
        while collection.contains(&wine.id) {
            wine.id = Uuid::new_v4();
        }
        collection.wines.push(wine.clone());
        self.persist(&mut collection)?;

        Ok(wine)
    }

    /// Replace every field except `id` and `created_at`.
    pub fn update(&self, id: &Uuid, fields: WineBase) -> Result<Wine> {
        let _guard = self.write_guard()?;
        let mut collection = self.load()?;

        let index = collection
            .position(id)
            .ok_or(WineError::WineNotFound(*id))?;
        collection.wines[index].replace_fields(fields);
        let updated = collection.wines[index].clone();
        self.persist(&mut collection)?;

        Ok(updated)
    }

    /// Remove a record and, best effort, the photo it references.
    /// Returns the removed record.
    pub fn delete(&self, id: &Uuid) -> Result<Wine> {
        let _guard = self.write_guard()?;
        let mut collection = self.load()?;

        let index = collection
            .position(id)
            .ok_or(WineError::WineNotFound(*id))?;
        let removed = collection.wines.remove(index);
        self.persist(&mut collection)?;

        // Record is gone; a leftover blob is only a leak
        if let Some(name) = removed.photo_name() {
            if let Err(e) = self.blobs.delete(name) {
                tracing::warn!(wine = %id, photo = %name, error = %e, "failed to delete photo");
            }
        }

        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::mem_backend::MemBackend;
    use std::thread;

    fn make_store() -> RecordStore<MemBackend> {
        RecordStore::with_backend(MemBackend::new())
    }

    fn barolo() -> WineBase {
        WineBase::new("Barolo", "red", "Piedmont", 9).with_vintage(2018)
    }

    // --- Basic CRUD Tests ---

    #[test]
    fn create_then_get_round_trips_fields() {
        let store = make_store();
        let created = store.create(barolo()).unwrap();

        let fetched = store.get(&created.id).unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.fields, barolo());
        assert_eq!(fetched.created_at, fetched.updated_at);
        assert!(fetched.fields.photo.is_none());
    }

    #[test]
    fn list_preserves_insertion_order_across_deletes() {
        let store = make_store();
        let names = ["a", "b", "c", "d"];
        let ids: Vec<Uuid> = names
            .iter()
            .map(|n| store.create(WineBase::new(*n, "red", "", 5)).unwrap().id)
            .collect();

        store.delete(&ids[1]).unwrap();

        let listed: Vec<String> = store
            .list()
            .unwrap()
            .into_iter()
            .map(|w| w.fields.name)
            .collect();
        assert_eq!(listed, vec!["a", "c", "d"]);
    }

    #[test]
    fn update_preserves_identity() {
        let store = make_store();
        let created = store.create(barolo()).unwrap();

        let updated = store
            .update(&created.id, barolo().with_notes("tar and roses"))
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at > created.updated_at);
        assert_eq!(store.get(&created.id).unwrap(), updated);
    }

    #[test]
    fn update_replaces_every_field() {
        let store = make_store();
        let created = store
            .create(barolo().with_price(40.0).with_notes("old"))
            .unwrap();

        let updated = store
            .update(&created.id, WineBase::new("Soave", "white", "Veneto", 6))
            .unwrap();

        assert_eq!(updated.fields.price, None);
        assert_eq!(updated.fields.notes, None);
        assert_eq!(updated.fields.vintage, None);
        assert_eq!(updated.fields.wine_type, "white");
    }

    #[test]
    fn missing_ids_are_not_found() {
        let store = make_store();
        let id = Uuid::new_v4();
        assert!(matches!(store.get(&id), Err(WineError::WineNotFound(_))));
        assert!(matches!(
            store.update(&id, barolo()),
            Err(WineError::WineNotFound(_))
        ));
        assert!(matches!(store.delete(&id), Err(WineError::WineNotFound(_))));
    }

    #[test]
    fn delete_then_get_is_not_found() {
        let store = make_store();
        let created = store.create(barolo()).unwrap();
        assert_eq!(store.list().unwrap().len(), 1);

        store.delete(&created.id).unwrap();

        assert!(store.list().unwrap().is_empty());
        assert!(matches!(
            store.get(&created.id),
            Err(WineError::WineNotFound(_))
        ));
    }

    // --- Cascade Tests ---

    #[test]
    fn delete_removes_referenced_photo() {
        let store = make_store();
        let photo = store.blobs().store(b"label", "label.png").unwrap();
        let wine = store.create(barolo().with_photo(&photo.url)).unwrap();

        store.delete(&wine.id).unwrap();

        assert!(matches!(
            store.blobs().resolve(&photo.filename),
            Err(WineError::PhotoNotFound(_))
        ));
    }

    #[test]
    fn delete_leaves_unrelated_photos() {
        let store = make_store();
        let keep = store.blobs().store(b"keep", "keep.png").unwrap();
        let wine = store.create(barolo()).unwrap();

        store.delete(&wine.id).unwrap();

        assert_eq!(store.blobs().resolve(&keep.filename).unwrap(), b"keep");
    }

    #[test]
    fn delete_succeeds_when_photo_is_missing_or_bogus() {
        let store = make_store();
        let missing = format!("{}.png", Uuid::new_v4());
        let a = store.create(barolo().with_photo(missing)).unwrap();
        let b = store.create(barolo().with_photo("../../etc/passwd")).unwrap();

        store.delete(&a.id).unwrap();
        store.delete(&b.id).unwrap();
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn delete_succeeds_when_blob_delete_fails() {
        let store = make_store();
        let photo = store.blobs().store(b"label", "label.png").unwrap();
        let wine = store.create(barolo().with_photo(&photo.filename)).unwrap();
        store.backend().set_simulate_blob_delete_error(true);

        store.delete(&wine.id).unwrap();

        assert!(store.list().unwrap().is_empty());
    }

    // --- Error Handling Tests ---

    #[test]
    fn write_failure_is_surfaced_and_changes_nothing() {
        let store = make_store();
        let existing = store.create(barolo()).unwrap();
        store.backend().set_simulate_write_error(true);

        assert!(store.create(barolo()).is_err());
        assert!(store.update(&existing.id, barolo()).is_err());
        assert!(store.delete(&existing.id).is_err());

        store.backend().set_simulate_write_error(false);
        assert_eq!(store.list().unwrap(), vec![existing]);
    }

    #[test]
    fn corrupt_collection_is_surfaced_on_read_and_write() {
        let store = make_store();
        store.create(barolo()).unwrap();
        let before = store.backend().raw_collection();
        store.backend().set_simulate_corruption(true);

        assert!(matches!(store.list(), Err(WineError::Corrupt { .. })));
        assert!(matches!(
            store.create(barolo()),
            Err(WineError::Corrupt { .. })
        ));
        // Nothing was overwritten
        assert_eq!(store.backend().raw_collection(), before);
    }

    #[test]
    fn duplicate_ids_on_disk_are_rejected() {
        let backend = MemBackend::new();
        let wine = Wine::new(barolo());
        backend
            .save_collection(&WineCollection {
                wines: vec![wine.clone(), wine],
                ..Default::default()
            })
            .unwrap();
        let store = RecordStore::with_backend(backend);

        assert!(matches!(store.list(), Err(WineError::Storage(_))));
    }

    // --- Concurrency Tests ---

    #[test]
    fn concurrent_creates_are_not_lost() {
        let store = Arc::new(make_store());

        let handles: Vec<_> = (0..50)
            .map(|i| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    store
                        .create(WineBase::new(format!("Wine {}", i), "red", "", 5))
                        .unwrap()
                })
            })
            .collect();
        let created: Vec<Wine> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        let listed = store.list().unwrap();
        assert_eq!(listed.len(), 50);
        for wine in created {
            assert!(listed.iter().any(|w| w.id == wine.id));
        }
    }

    #[test]
    fn concurrent_updates_and_deletes_stay_consistent() {
        let store = Arc::new(make_store());
        let ids: Vec<Uuid> = (0..20)
            .map(|i| store.create(WineBase::new(format!("{}", i), "", "", 5)).unwrap().id)
            .collect();

        let handles: Vec<_> = ids
            .iter()
            .enumerate()
            .map(|(i, id)| {
                let store = Arc::clone(&store);
                let id = *id;
                thread::spawn(move || {
                    if i % 2 == 0 {
                        store.delete(&id).map(|_| ())
                    } else {
                        store
                            .update(&id, WineBase::new("updated", "", "", 7))
                            .map(|_| ())
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap().unwrap();
        }

        let listed = store.list().unwrap();
        assert_eq!(listed.len(), 10);
        assert!(listed.iter().all(|w| w.fields.name == "updated"));
    }
}
