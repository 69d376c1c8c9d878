use crate::error::Result;
use crate::model::{Wine, WineBase};
use crate::store::backend::StorageBackend;
use crate::store::records::RecordStore;

pub fn run<B: StorageBackend>(store: &RecordStore<B>, fields: WineBase) -> Result<Wine> {
    fields.validate()?;
    let wine = store.create(fields)?;
    tracing::info!(id = %wine.id, name = %wine.fields.name, "wine created");
    Ok(wine)
}
