use crate::error::Result;
use crate::model::{Wine, WineBase};
use crate::store::backend::StorageBackend;
use crate::store::records::RecordStore;
use uuid::Uuid;

/// Replace a wine's fields. Invalid fields are rejected before the id is
/// looked up.
pub fn run<B: StorageBackend>(
    store: &RecordStore<B>,
    id: &Uuid,
    fields: WineBase,
) -> Result<Wine> {
    fields.validate()?;
    let wine = store.update(id, fields)?;
    tracing::info!(id = %wine.id, "wine updated");
    Ok(wine)
}
