//! # winenotes Architecture
//!
//! winenotes keeps personal notes about wines (name, type, region, vintage,
//! rating, price, free text) with an optional label photo. This crate is the
//! **UI-agnostic core**; the HTTP service and CLI in the `winenotes` binary
//! are thin clients of it.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Front ends (winenotes binary: HTTP routes, CLI)            │
//! │  - Decode requests, encode responses, map errors to status  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade, parses ids, dispatches to commands          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Validation and business rules                            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - RecordStore (collection CRUD, single writer)             │
//! │  - BlobStore (photos by generated name)                     │
//! │  - FsBackend (production), MemBackend (testing)             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## No I/O Assumptions in Core
//!
//! From `api.rs` inward, code takes Rust values and returns `Result`s. It
//! never writes to stdout, never exits the process and knows nothing about
//! HTTP. Logging goes through `tracing`; the front end decides where it ends
//! up.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Business logic for each operation
//! - [`store`]: Persistence of records and photos
//! - [`model`]: Core data types (`Wine`, `WineBase`, `WineCollection`)
//! - [`config`]: Layered configuration
//! - [`init`]: Builds the production API from configuration
//! - [`error`]: Error types and their caller-facing classification

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod init;
pub mod model;
pub mod store;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;
