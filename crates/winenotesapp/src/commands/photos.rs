use crate::error::Result;
use crate::model::StoredPhoto;
use crate::store::backend::StorageBackend;
use crate::store::records::RecordStore;

/// Store an uploaded photo under a fresh name.
pub fn upload<B: StorageBackend>(
    store: &RecordStore<B>,
    bytes: &[u8],
    original_name: &str,
) -> Result<StoredPhoto> {
    store.blobs().store(bytes, original_name)
}

pub fn fetch<B: StorageBackend>(store: &RecordStore<B>, name: &str) -> Result<Vec<u8>> {
    store.blobs().resolve(name)
}
