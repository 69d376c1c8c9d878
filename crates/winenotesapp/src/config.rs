//! # Configuration
//!
//! winenotes configuration is managed by [`confique`], which layers
//! environment variables over an optional TOML file over compiled defaults.
//!
//! ## Resolution Order
//!
//! 1. **Environment variables**: `WINENOTES_DATA_DIR`, `PORT`, etc.
//! 2. **Config file**: passed with `--config` (a missing file is ignored).
//! 3. **Compiled Defaults**: via `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Env | Default | Description |
//! |-----|-----|---------|-------------|
//! | `data_dir` | `WINENOTES_DATA_DIR` | `data` | Root for all persisted state |
//! | `data_file` | `WINENOTES_DATA_FILE` | `wines.json` | Collection file, relative to `data_dir` |
//! | `uploads_dir` | `WINENOTES_UPLOADS_DIR` | `uploads` | Photo directory, relative to `data_dir` |
//! | `host` | `WINENOTES_HOST` | `0.0.0.0` | Listen address |
//! | `port` | `PORT` | `8000` | Listen port |
//! | `uploads_url_prefix` | `WINENOTES_UPLOADS_URL_PREFIX` | `/api/uploads` | URL prefix returned for uploads |
//! | `max_upload_bytes` | `WINENOTES_MAX_UPLOAD_BYTES` | `10485760` | Request body limit for uploads |

use confique::Config;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for winenotes, optionally stored in `winenotes.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct WineConfig {
    /// Directory holding the data file and the uploads directory.
    #[config(default = "data", env = "WINENOTES_DATA_DIR")]
    pub data_dir: PathBuf,

    /// Collection file name. Absolute paths ignore `data_dir`.
    #[config(default = "wines.json", env = "WINENOTES_DATA_FILE")]
    pub data_file: PathBuf,

    /// Photo directory. Absolute paths ignore `data_dir`.
    #[config(default = "uploads", env = "WINENOTES_UPLOADS_DIR")]
    pub uploads_dir: PathBuf,

    #[config(default = "0.0.0.0", env = "WINENOTES_HOST")]
    pub host: String,

    #[config(default = 8000, env = "PORT")]
    pub port: u16,

    #[config(default = "/api/uploads", env = "WINENOTES_UPLOADS_URL_PREFIX")]
    pub uploads_url_prefix: String,

    #[config(default = 10485760, env = "WINENOTES_MAX_UPLOAD_BYTES")]
    pub max_upload_bytes: usize,
}

impl Default for WineConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            data_file: PathBuf::from("wines.json"),
            uploads_dir: PathBuf::from("uploads"),
            host: "0.0.0.0".to_string(),
            port: 8000,
            uploads_url_prefix: "/api/uploads".to_string(),
            max_upload_bytes: 10 * 1024 * 1024,
        }
    }
}

impl WineConfig {
    /// Load from the environment and, if given, a TOML file.
    pub fn load(file: Option<&Path>) -> Result<Self, confique::Error> {
        let mut builder = Self::builder().env();
        if let Some(path) = file {
            builder = builder.file(path);
        }
        builder.load()
    }

    /// Override the data directory, e.g. from a command-line flag.
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    pub fn data_file_path(&self) -> PathBuf {
        self.data_dir.join(&self.data_file)
    }

    pub fn uploads_path(&self) -> PathBuf {
        self.data_dir.join(&self.uploads_dir)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
