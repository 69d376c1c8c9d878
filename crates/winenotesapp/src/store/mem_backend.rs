use super::backend::StorageBackend;
use crate::error::{Result, WineError};
use crate::model::WineCollection;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

/// In-memory storage backend for testing.
///
/// Uses `Mutex` rather than `RefCell` because stores are shared across
/// request handlers and test threads.
#[derive(Default)]
pub struct MemBackend {
    collection: Mutex<Option<String>>,
    blobs: Mutex<BTreeMap<String, Vec<u8>>>,
    simulate_write_error: AtomicBool,
    simulate_corruption: AtomicBool,
    simulate_blob_delete_error: AtomicBool,
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>> {
    mutex
        .lock()
        .map_err(|_| WineError::Storage("lock poisoned".to_string()))
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.store(simulate, Ordering::SeqCst);
    }

    /// Make the stored collection unparseable, as if the file were truncated.
    pub fn set_simulate_corruption(&self, simulate: bool) {
        self.simulate_corruption.store(simulate, Ordering::SeqCst);
    }

    /// Make blob deletes fail, for cascade error handling tests.
    pub fn set_simulate_blob_delete_error(&self, simulate: bool) {
        self.simulate_blob_delete_error.store(simulate, Ordering::SeqCst);
    }

    /// Test helper: the raw serialized collection, if any.
    pub fn raw_collection(&self) -> Option<String> {
        self.collection.lock().ok().and_then(|c| c.clone())
    }

    fn check_writable(&self) -> Result<()> {
        if self.simulate_write_error.load(Ordering::SeqCst) {
            return Err(WineError::Storage("Simulated write error".to_string()));
        }
        Ok(())
    }
}

impl StorageBackend for MemBackend {
    fn load_collection(&self) -> Result<Option<WineCollection>> {
        let raw = lock(&self.collection)?.clone();
        let Some(raw) = raw else {
            return Ok(None);
        };
        let raw = if self.simulate_corruption.load(Ordering::SeqCst) {
            raw.get(..raw.len() / 2).unwrap_or("{").to_string()
        } else {
            raw
        };
        let collection = serde_json::from_str(&raw).map_err(|source| WineError::Corrupt {
            path: PathBuf::from("memory://wines.json"),
            source,
        })?;
        Ok(Some(collection))
    }

    fn save_collection(&self, collection: &WineCollection) -> Result<()> {
        self.check_writable()?;
        // Serialize to exercise the same encoding the file backend uses
        let raw = serde_json::to_string(collection).map_err(WineError::Serialization)?;
        *lock(&self.collection)? = Some(raw);
        Ok(())
    }

    fn write_blob(&self, name: &str, bytes: &[u8]) -> Result<()> {
        self.check_writable()?;
        let mut blobs = lock(&self.blobs)?;
        if blobs.contains_key(name) {
            return Err(WineError::Storage(format!("Blob already exists: {}", name)));
        }
        blobs.insert(name.to_string(), bytes.to_vec());
        Ok(())
    }

    fn read_blob(&self, name: &str) -> Result<Option<Vec<u8>>> {
        Ok(lock(&self.blobs)?.get(name).cloned())
    }

    fn delete_blob(&self, name: &str) -> Result<bool> {
        if self.simulate_blob_delete_error.load(Ordering::SeqCst) {
            return Err(WineError::Storage("Simulated blob delete error".to_string()));
        }
        Ok(lock(&self.blobs)?.remove(name).is_some())
    }

    fn list_blobs(&self) -> Result<Vec<String>> {
        Ok(lock(&self.blobs)?.keys().cloned().collect())
    }
}
