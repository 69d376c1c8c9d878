use crate::error::Result;
use crate::model::Wine;
use crate::store::backend::StorageBackend;
use crate::store::records::RecordStore;
use uuid::Uuid;

pub fn run<B: StorageBackend>(store: &RecordStore<B>, id: &Uuid) -> Result<Wine> {
    store.get(id)
}
