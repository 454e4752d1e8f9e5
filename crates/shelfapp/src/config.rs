//! # Configuration
//!
//! Configuration is managed by [`confique`], which handles layered loading
//! from environment variables, an optional TOML file and compiled defaults.
//!
//! ## Resolution Order
//!
//! 1. **Environment variables**: `SHELF_DATA_DIR`, `SHELF_SLOT`, etc.
//! 2. **Config file**: the TOML file passed to [`ShelfConfig::load`], if it exists.
//! 3. **Compiled Defaults**: Built-in fallbacks via `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `data_dir` | OS data directory | Directory holding the collection file |
//! | `slot` | `books` | Name of the collection file (`<slot>.json`) |
//! | `date_format` | `%Y/%-m/%-d` | chrono format used for `dateAdded` |
//! | `lookup_endpoint` | Google Books volumes API | Endpoint for book lookup |
//! | `log_level` | `INFO` | Max log level |
//! | `log_json` | `false` | Emit logs as JSON lines |

use crate::error::{Result, ShelfError};
use crate::logging::LogConfig;
use crate::lookup::{GoogleBooksClient, GOOGLE_BOOKS_ENDPOINT};
use crate::store::book_store::DEFAULT_DATE_FORMAT;
use crate::store::fs_backend::DEFAULT_SLOT;
use confique::Config;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for shelf, optionally stored in `shelf.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ShelfConfig {
    /// Directory holding the collection file. When absent, the OS data
    /// directory for "shelf" is used.
    #[config(env = "SHELF_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Name of the persistence slot.
    #[config(env = "SHELF_SLOT", default = "books")]
    pub slot: String,

    #[config(env = "SHELF_DATE_FORMAT", default = "%Y/%-m/%-d")]
    pub date_format: String,

    #[config(
        env = "SHELF_LOOKUP_ENDPOINT",
        default = "https://www.googleapis.com/books/v1/volumes"
    )]
    pub lookup_endpoint: String,

    /// One of TRACE, DEBUG, INFO, WARN, ERROR.
    #[config(env = "SHELF_LOG_LEVEL", default = "INFO")]
    pub log_level: String,

    #[config(env = "SHELF_LOG_JSON", default = false)]
    pub log_json: bool,
}

impl Default for ShelfConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            slot: DEFAULT_SLOT.to_string(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            lookup_endpoint: GOOGLE_BOOKS_ENDPOINT.to_string(),
            log_level: "INFO".to_string(),
            log_json: false,
        }
    }
}

impl ShelfConfig {
    /// Loads env vars over `file` (if given and present) over defaults.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let mut builder = ShelfConfig::builder().env();
        if let Some(path) = file {
            builder = builder.file(path);
        }
        builder.load().map_err(ShelfError::Config)
    }

    /// Directory holding the collection file.
    pub fn data_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }
        ProjectDirs::from("", "", "shelf")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .ok_or_else(|| ShelfError::Store("No data directory available".to_string()))
    }

    pub fn slot_path(&self) -> Result<PathBuf> {
        Ok(self.data_dir()?.join(format!("{}.json", self.slot)))
    }

    /// Lookup client pointed at `lookup_endpoint`.
    pub fn lookup_client(&self) -> GoogleBooksClient {
        GoogleBooksClient::with_endpoint(&self.lookup_endpoint)
    }

    pub fn logging(&self) -> LogConfig {
        LogConfig {
            level: self.log_level.clone(),
            json: self.log_json,
        }
    }
}
