use super::fs_backend::FsBackend;
use super::records::RecordStore;
use std::path::PathBuf;

pub type FileStore = RecordStore<FsBackend>;

impl FileStore {
    pub fn open(data_file: PathBuf, uploads_dir: PathBuf) -> Self {
        RecordStore::with_backend(FsBackend::new(data_file, uploads_dir))
    }
}
