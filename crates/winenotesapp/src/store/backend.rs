use crate::error::Result;
use crate::model::WineCollection;

/// Abstract interface for raw storage I/O.
/// This trait handles the "how" of storage (filesystem vs memory),
/// while RecordStore and BlobStore handle the "what" (locking, ids, cascade).
///
/// Implementations are shared between request handlers, hence `Send + Sync`.
pub trait StorageBackend: Send + Sync {
    // --- Collection Operations ---

    /// Load the collection envelope.
    /// Returns Ok(None) if nothing has been written yet.
    /// Returns Err if the data exists but cannot be read or parsed.
    fn load_collection(&self) -> Result<Option<WineCollection>>;

    /// Replace the whole collection.
    /// MUST be atomic (e.g. write to tmp then rename) so readers never see a partial file.
    fn save_collection(&self, collection: &WineCollection) -> Result<()>;

    // --- Blob Operations ---

    /// Write a new blob. Fails if a blob with this name already exists.
    fn write_blob(&self, name: &str, bytes: &[u8]) -> Result<()>;

    /// Read a blob. Returns Ok(None) if it does not exist.
    fn read_blob(&self, name: &str) -> Result<Option<Vec<u8>>>;

    /// Delete a blob. Returns Ok(false) if it was already gone.
    fn delete_blob(&self, name: &str) -> Result<bool>;

    /// Names of all stored blobs.
    fn list_blobs(&self) -> Result<Vec<String>>;
}
