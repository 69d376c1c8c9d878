//! Photo storage by generated name.
//!
//! Every upload gets a fresh name `<uuid>.<ext>`, so blobs are never
//! overwritten and concurrent uploads never touch the same file. Names coming
//! back from callers are checked against that shape before any path is built.

use super::backend::StorageBackend;
use crate::error::{Result, WineError};
use crate::model::StoredPhoto;
use std::sync::Arc;
use uuid::Uuid;

pub const DEFAULT_EXTENSION: &str = "jpg";
pub const DEFAULT_URL_PREFIX: &str = "/api/uploads";
const MAX_EXTENSION_LEN: usize = 16;
const MAX_STORED_EXTENSION_LEN: usize = 64;

pub struct BlobStore<B: StorageBackend> {
    backend: Arc<B>,
    url_prefix: String,
}

impl<B: StorageBackend> Clone for BlobStore<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            url_prefix: self.url_prefix.clone(),
        }
    }
}

impl<B: StorageBackend> BlobStore<B> {
    pub fn new(backend: Arc<B>) -> Self {
        Self {
            backend,
            url_prefix: DEFAULT_URL_PREFIX.to_string(),
        }
    }

    pub fn with_url_prefix(mut self, prefix: &str) -> Self {
        self.url_prefix = prefix.trim_end_matches('/').to_string();
        self
    }

    pub fn url_for(&self, name: &str) -> String {
        format!("{}/{}", self.url_prefix, name)
    }

    /// Store bytes under a freshly generated name.
    pub fn store(&self, bytes: &[u8], original_name: &str) -> Result<StoredPhoto> {
        let filename = format!("{}.{}", Uuid::new_v4(), extension_for(original_name));
        self.backend.write_blob(&filename, bytes)?;
        tracing::info!(%filename, size = bytes.len(), "photo stored");

        Ok(StoredPhoto {
            url: self.url_for(&filename),
            filename,
        })
    }

    /// Remove a blob. Absence is not an error.
    pub fn delete(&self, name: &str) -> Result<()> {
        validate_blob_name(name)?;
        if self.backend.delete_blob(name)? {
            tracing::info!(%name, "photo deleted");
        } else {
            tracing::debug!(%name, "photo already absent");
        }
        Ok(())
    }

    /// Read the full contents of a blob.
    pub fn resolve(&self, name: &str) -> Result<Vec<u8>> {
        validate_blob_name(name)?;
        self.backend
            .read_blob(name)?
            .ok_or_else(|| WineError::PhotoNotFound(name.to_string()))
    }

    /// Names of every stored blob, including ones no record references.
    /// Other files in the uploads directory are left out.
    pub fn list(&self) -> Result<Vec<String>> {
        let mut names = self.backend.list_blobs()?;
        names.retain(|name| validate_blob_name(name).is_ok());
        Ok(names)
    }

    /// Files in the uploads directory whose names are not blob names.
    pub fn unrecognized(&self) -> Result<Vec<String>> {
        let mut names = self.backend.list_blobs()?;
        names.retain(|name| validate_blob_name(name).is_err());
        Ok(names)
    }
}

/// Extension of the uploaded file, lowercased, or `jpg` if it has none usable.
pub fn extension_for(original_name: &str) -> String {
    match original_name.rsplit_once('.') {
        Some((_, ext)) if is_valid_extension(ext) => ext.to_ascii_lowercase(),
        _ => DEFAULT_EXTENSION.to_string(),
    }
}

fn is_valid_extension(ext: &str) -> bool {
    !ext.is_empty()
        && ext.len() <= MAX_EXTENSION_LEN
        && ext.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Accept only names of the form `<uuid>.<ext>`.
///
/// New uploads always get a short alphanumeric extension, but older uploads
/// kept whatever followed the last `.` of the client's filename (`.my-pic`).
/// Those stay reachable; an extension only has to be a single path segment.
pub fn validate_blob_name(name: &str) -> Result<()> {
    let invalid = || WineError::InvalidPhotoName(name.to_string());
    let (stem, ext) = name.split_once('.').ok_or_else(invalid)?;
    // Hyphenated form only; braced and urn forms parse too
    let hyphenated = stem.len() == 36 && Uuid::try_parse(stem).is_ok();
    if !hyphenated || !is_stored_extension(ext) {
        return Err(invalid());
    }
    Ok(())
}

fn is_stored_extension(ext: &str) -> bool {
    !ext.is_empty()
        && ext.len() <= MAX_STORED_EXTENSION_LEN
        && !ext
            .chars()
            .any(|c| matches!(c, '.' | '/' | '\\' | ':') || c.is_control())
}
