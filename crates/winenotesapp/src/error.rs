use std::path::PathBuf;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum WineError {
    #[error("Wine not found: {0}")]
    WineNotFound(Uuid),

    #[error("Wine not found: {0}")]
    InvalidWineId(String),

    #[error("Photo not found: {0}")]
    PhotoNotFound(String),

    #[error("Photo not found: {0}")]
    InvalidPhotoName(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Store error: {0}")]
    Storage(String),

    #[error("Corrupt data file {}: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// The three outcomes callers are expected to distinguish.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Validation,
    StorageUnavailable,
}

impl WineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            WineError::WineNotFound(_)
            | WineError::InvalidWineId(_)
            | WineError::PhotoNotFound(_)
            | WineError::InvalidPhotoName(_) => ErrorKind::NotFound,
            WineError::Validation(_) => ErrorKind::Validation,
            WineError::Storage(_)
            | WineError::Corrupt { .. }
            | WineError::Io(_)
            | WineError::Serialization(_) => ErrorKind::StorageUnavailable,
        }
    }
}

pub type Result<T> = std::result::Result<T, WineError>;
