//! # Command Layer
//!
//! Business rules for each operation, one submodule per command. Commands sit
//! between the API facade and the storage layer:
//!
//! - Field validation happens here, before a store is asked to persist
//!   anything. Stores assume their input is valid.
//! - Commands take and return plain Rust types. They never touch HTTP,
//!   stdout or process exit codes.
//! - Outcomes are logged through `tracing`.
//!
//! ## Testing Strategy
//!
//! Command tests use `InMemoryStore`, so they cover business logic without
//! the filesystem. Filesystem behavior is tested in `store::fs_backend` and
//! the integration tests.
//!
//! ## Command Modules
//!
//! - [`list`]: All wines, in stored order
//! - [`get`]: One wine by id
//! - [`create`]: Validate and add a wine
//! - [`update`]: Validate and replace a wine's fields
//! - [`delete`]: Remove a wine and its photo
//! - [`photos`]: Upload and fetch photos
//! - [`doctor`]: Find and sweep photos no wine references

use serde::Serialize;

pub mod create;
pub mod delete;
pub mod doctor;
pub mod get;
pub mod list;
pub mod photos;
pub mod update;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}
