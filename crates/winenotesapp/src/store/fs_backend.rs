use super::backend::StorageBackend;
use crate::error::{Result, WineError};
use crate::model::WineCollection;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub struct FsBackend {
    data_file: PathBuf,
    uploads_dir: PathBuf,
}

impl FsBackend {
    pub fn new(data_file: PathBuf, uploads_dir: PathBuf) -> Self {
        Self {
            data_file,
            uploads_dir,
        }
    }

    pub fn data_file(&self) -> &Path {
        &self.data_file
    }

    pub fn uploads_dir(&self) -> &Path {
        &self.uploads_dir
    }

    fn data_dir(&self) -> PathBuf {
        match self.data_file.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    fn blob_path(&self, name: &str) -> PathBuf {
        self.uploads_dir.join(name)
    }

    fn ensure_dir(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).map_err(WineError::Io)?;
        }
        Ok(())
    }
}

impl StorageBackend for FsBackend {
    fn load_collection(&self) -> Result<Option<WineCollection>> {
        let content = match fs::read_to_string(&self.data_file) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(WineError::Io(e)),
        };
        let collection: WineCollection =
            serde_json::from_str(&content).map_err(|source| WineError::Corrupt {
                path: self.data_file.clone(),
                source,
            })?;
        Ok(Some(collection))
    }

    fn save_collection(&self, collection: &WineCollection) -> Result<()> {
        let dir = self.data_dir();
        self.ensure_dir(&dir)?;

        let content =
            serde_json::to_string_pretty(collection).map_err(WineError::Serialization)?;

        // Atomic write: same directory so the rename never crosses filesystems
        let tmp_file = dir.join(format!(".wines-{}.tmp", Uuid::new_v4()));
        let written = fs::File::create(&tmp_file).and_then(|mut file| {
            file.write_all(content.as_bytes())?;
            file.sync_all()
        });
        if let Err(e) = written.and_then(|_| fs::rename(&tmp_file, &self.data_file)) {
            let _ = fs::remove_file(&tmp_file);
            return Err(WineError::Io(e));
        }

        tracing::debug!(
            path = %self.data_file.display(),
            wines = collection.wines.len(),
            "collection saved"
        );
        Ok(())
    }

    fn write_blob(&self, name: &str, bytes: &[u8]) -> Result<()> {
        self.ensure_dir(&self.uploads_dir)?;
        let path = self.blob_path(name);

        let mut file = match fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
        {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                return Err(WineError::Storage(format!("Blob already exists: {}", name)))
            }
            Err(e) => return Err(WineError::Io(e)),
        };
        if let Err(e) = file.write_all(bytes) {
            let _ = fs::remove_file(&path);
            return Err(WineError::Io(e));
        }
        Ok(())
    }

    fn read_blob(&self, name: &str) -> Result<Option<Vec<u8>>> {
        match fs::read(self.blob_path(name)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(WineError::Io(e)),
        }
    }

    fn delete_blob(&self, name: &str) -> Result<bool> {
        match fs::remove_file(self.blob_path(name)) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(WineError::Io(e)),
        }
    }

    fn list_blobs(&self) -> Result<Vec<String>> {
        if !self.uploads_dir.exists() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(&self.uploads_dir).map_err(WineError::Io)? {
            let entry = entry.map_err(WineError::Io)?;
            if !entry.file_type().map_err(WineError::Io)?.is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                if !name.starts_with('.') {
                    names.push(name.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }
}
