use crate::error::Result;
use crate::model::Wine;
use crate::store::backend::StorageBackend;
use crate::store::records::RecordStore;
use uuid::Uuid;

/// Delete a wine. Its photo goes with it.
pub fn run<B: StorageBackend>(store: &RecordStore<B>, id: &Uuid) -> Result<Wine> {
    let removed = store.delete(id)?;
    tracing::info!(id = %removed.id, name = %removed.fields.name, "wine deleted");
    Ok(removed)
}
