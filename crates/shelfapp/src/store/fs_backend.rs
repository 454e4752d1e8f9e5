use super::backend::SlotBackend;
use crate::error::{Result, ShelfError};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub const DEFAULT_SLOT: &str = "books";

/// Keeps the collection in a single JSON file, `<root>/<slot>.json`.
pub struct FsBackend {
    root: PathBuf,
    slot: String,
}

impl FsBackend {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            slot: DEFAULT_SLOT.to_string(),
        }
    }

    pub fn with_slot(mut self, slot: &str) -> Self {
        self.slot = slot.trim_end_matches(".json").to_string();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn slot(&self) -> &str {
        &self.slot
    }

    pub fn slot_path(&self) -> PathBuf {
        self.root.join(format!("{}.json", self.slot))
    }

    fn ensure_dir(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).map_err(ShelfError::Io)?;
        }
        Ok(())
    }
}

impl SlotBackend for FsBackend {
    fn read_slot(&self) -> Result<Option<String>> {
        let path = self.slot_path();
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path).map_err(ShelfError::Io)?;
        Ok(Some(content))
    }

    fn write_slot(&self, text: &str) -> Result<()> {
        self.ensure_dir(&self.root)?;

        // Atomic write
        let tmp_path = self
            .root
            .join(format!(".{}-{}.tmp", self.slot, Uuid::new_v4()));
        fs::write(&tmp_path, text).map_err(ShelfError::Io)?;
        fs::rename(&tmp_path, self.slot_path()).map_err(ShelfError::Io)?;

        Ok(())
    }

    fn describe(&self) -> String {
        self.slot_path().display().to_string()
    }
}
