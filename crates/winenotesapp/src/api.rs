//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single
//! entry point for any front end (the HTTP service, the CLI, tests).
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Dispatches** to the appropriate command function
//! - **Normalizes inputs**: ids arrive as strings from URLs and are parsed
//!   here. A string that is not a UUID cannot name a wine, so it is reported
//!   as not found rather than as a malformed request.
//! - **Returns structured types** (`Result<Wine>`, `Result<StoredPhoto>`, ...)
//!
//! ## Sharing
//!
//! `WineApi` takes `&self` everywhere and is `Send + Sync`, so a front end can
//! hold one instance behind an `Arc` and call it from many threads. Write
//! serialization is handled by the store.
//!
//! ## Generic Over StorageBackend
//!
//! - Production: `WineApi<FsBackend>` (built by [`crate::init::initialize`])
//! - Testing: `WineApi<MemBackend>`

use crate::commands;
use crate::error::{Result, WineError};
use crate::model::{StoredPhoto, Wine, WineBase};
use crate::store::backend::StorageBackend;
use crate::store::records::RecordStore;
use uuid::Uuid;

pub struct WineApi<B: StorageBackend> {
    store: RecordStore<B>,
}

impl<B: StorageBackend> WineApi<B> {
    pub fn new(store: RecordStore<B>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &RecordStore<B> {
        &self.store
    }

    pub fn list_wines(&self) -> Result<Vec<Wine>> {
        commands::list::run(&self.store)
    }

    pub fn get_wine(&self, id: &str) -> Result<Wine> {
        commands::get::run(&self.store, &parse_wine_id(id)?)
    }

    pub fn create_wine(&self, fields: WineBase) -> Result<Wine> {
        commands::create::run(&self.store, fields)
    }

    pub fn update_wine(&self, id: &str, fields: WineBase) -> Result<Wine> {
        // Validate before resolving the id, same order as the command
        fields.validate()?;
        commands::update::run(&self.store, &parse_wine_id(id)?, fields)
    }

    pub fn delete_wine(&self, id: &str) -> Result<Wine> {
        commands::delete::run(&self.store, &parse_wine_id(id)?)
    }

    pub fn upload_photo(&self, bytes: &[u8], filename: &str) -> Result<StoredPhoto> {
        commands::photos::upload(&self.store, bytes, filename)
    }

    pub fn get_photo(&self, name: &str) -> Result<Vec<u8>> {
        commands::photos::fetch(&self.store, name)
    }

    pub fn doctor(&self, fix: bool) -> Result<commands::doctor::DoctorResult> {
        commands::doctor::run(&self.store, fix)
    }
}

fn parse_wine_id(raw: &str) -> Result<Uuid> {
    Uuid::try_parse(raw.trim()).map_err(|_| WineError::InvalidWineId(raw.to_string()))
}
