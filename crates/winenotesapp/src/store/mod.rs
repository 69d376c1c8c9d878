//! # Storage Layer
//!
//! This module owns everything winenotes keeps on disk: the wine collection
//! and the uploaded photos.
//!
//! ## Components
//!
//! - [`records::RecordStore`]: CRUD over the collection. Depends on the blob
//!   store only to cascade a record's photo on delete.
//! - [`blobs::BlobStore`]: photos stored under generated names. Knows nothing
//!   about records.
//! - [`backend::StorageBackend`]: raw I/O shared by both, with a filesystem
//!   implementation ([`fs_backend::FsBackend`]) and an in-memory one for tests
//!   ([`mem_backend::MemBackend`]).
//!
//! ## Consistency
//!
//! The data file is the system of record and is always rewritten whole.
//! Two rules keep it consistent under concurrent requests:
//!
//! 1. **Single writer**: create, update and delete hold the store's write
//!    lock for the entire read-modify-write, so no mutation is lost.
//! 2. **Atomic replace**: the backend writes a temp file and renames it over
//!    the data file, so a reader sees either the old or the new collection.
//!
//! A missing data file is an empty collection. A data file that exists but
//! cannot be parsed is reported as an error and is never overwritten.
//!
//! ## Photo Lifecycle
//!
//! A photo is uploaded first and referenced by a record afterwards. Deleting
//! the record deletes the photo (best effort). Photos that were never
//! attached, or were replaced by an update, stay on disk until a `doctor`
//! sweep removes them.
//!
//! ## Storage Layout
//!
//! ```text
//! data/
//! ├── wines.json          # Collection envelope
//! └── uploads/
//!     └── {uuid}.{ext}    # Photos
//! ```

pub mod backend;
pub mod blobs;
pub mod fs;
pub mod fs_backend;
pub mod mem_backend;
pub mod memory;
pub mod records;
