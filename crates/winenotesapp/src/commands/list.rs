use crate::error::Result;
use crate::model::Wine;
use crate::store::backend::StorageBackend;
use crate::store::records::RecordStore;

pub fn run<B: StorageBackend>(store: &RecordStore<B>) -> Result<Vec<Wine>> {
    store.list()
}
