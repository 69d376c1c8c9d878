//! # Context Initialization
//!
//! Builds the production [`WineApi`] from a resolved [`WineConfig`]. Front
//! ends load configuration however they like (flags, env, file) and hand the
//! result here; nothing in this module reads the environment itself.
//!
//! Directories are not created up front. The file backend creates the data
//! and uploads directories on first write, so a read-only inspection (such as
//! `doctor` without `--fix`) leaves the filesystem untouched.

use crate::api::WineApi;
use crate::config::WineConfig;
use crate::store::fs::FileStore;
use crate::store::fs_backend::FsBackend;

pub struct WineContext {
    pub api: WineApi<FsBackend>,
    pub config: WineConfig,
}

pub fn initialize(config: WineConfig) -> WineContext {
    let store = FileStore::open(config.data_file_path(), config.uploads_path())
        .with_url_prefix(&config.uploads_url_prefix);
    tracing::debug!(
        data_file = %config.data_file_path().display(),
        uploads = %config.uploads_path().display(),
        "store initialized"
    );

    WineContext {
        api: WineApi::new(store),
        config,
    }
}
